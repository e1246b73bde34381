//! HID class control requests.
//!
//! Only three class requests carry meaning for a gamepad with a single
//! input report: GET_REPORT, GET_IDLE and SET_IDLE. Everything else,
//! class or vendor, is acknowledged with a zero-length answer so the host
//! sees "nothing to report" rather than a STALL.
//!
//! SETUP packet (8 bytes, little-endian):
//! ```text
//! Byte 0:   bmRequestType  bit 7 = direction, bits 5-6 = type, bits 0-4 = recipient
//! Byte 1:   bRequest
//! Byte 2-3: wValue         (GET_REPORT: type/ID, SET_IDLE: rate in high byte)
//! Byte 4-5: wIndex         (interface)
//! Byte 6-7: wLength        (max bytes the host accepts)
//! ```

use crate::hid::layout::ActiveLayout;
use crate::hid::report::{Report, REPORT_SIZE};
use crate::trace::TraceEvent;

/// HID class request codes.
pub mod request {
    pub const GET_REPORT: u8 = 0x01;
    pub const GET_IDLE: u8 = 0x02;
    pub const GET_PROTOCOL: u8 = 0x03;
    pub const SET_REPORT: u8 = 0x09;
    pub const SET_IDLE: u8 = 0x0A;
    pub const SET_PROTOCOL: u8 = 0x0B;
}

/// Request type field of `bmRequestType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RequestType {
    Standard,
    Class,
    Vendor,
    Reserved,
}

impl From<u8> for RequestType {
    fn from(bm_request_type: u8) -> Self {
        match (bm_request_type >> 5) & 0x03 {
            0 => RequestType::Standard,
            1 => RequestType::Class,
            2 => RequestType::Vendor,
            _ => RequestType::Reserved,
        }
    }
}

/// A decoded SETUP packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRequest {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
}

impl ControlRequest {
    /// Direction bit of `bmRequestType`: device-to-host.
    pub const DIR_IN: u8 = 0x80;
    /// Type bits of `bmRequestType` for a class request.
    pub const TYPE_CLASS: u8 = 0x20;
    /// Type bits of `bmRequestType` for a vendor request.
    pub const TYPE_VENDOR: u8 = 0x40;
    /// Recipient bits of `bmRequestType`: interface.
    pub const RECIPIENT_INTERFACE: u8 = 0x01;

    /// Decode the 8 raw SETUP bytes.
    pub const fn from_setup_bytes(data: [u8; 8]) -> Self {
        Self {
            request_type: data[0],
            request: data[1],
            value: u16::from_le_bytes([data[2], data[3]]),
            index: u16::from_le_bytes([data[4], data[5]]),
            length: u16::from_le_bytes([data[6], data[7]]),
        }
    }

    /// Class request to an interface, as a HID host sends it.
    pub const fn class(request: u8, value: u16, index: u16, length: u16) -> Self {
        let dir = match request {
            request::GET_REPORT | request::GET_IDLE | request::GET_PROTOCOL => Self::DIR_IN,
            _ => 0,
        };
        Self {
            request_type: dir | Self::TYPE_CLASS | Self::RECIPIENT_INTERFACE,
            request,
            value,
            index,
            length,
        }
    }

    pub fn kind(&self) -> RequestType {
        RequestType::from(self.request_type)
    }

    /// `true` for every request the device answers itself: class,
    /// vendor and reserved types, to any recipient. Standard requests
    /// belong to the USB stack.
    pub fn answered_by_device(&self) -> bool {
        self.kind() != RequestType::Standard
    }

    /// High byte of `wValue`.
    pub const fn value_high(&self) -> u8 {
        (self.value >> 8) as u8
    }
}

/// Responder for HID class requests. Owns the idle rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlRequestHandler {
    idle_rate: u8,
}

impl ControlRequestHandler {
    pub const fn new() -> Self {
        Self { idle_rate: 0 }
    }

    /// Last value stored by SET_IDLE. Stored only; nothing resends on it.
    pub const fn idle_rate(&self) -> u8 {
        self.idle_rate
    }

    /// Answer one request.
    ///
    /// Data for the host is written to `buf`; the return value is how many
    /// bytes of it to send. Zero means "no data" and is still a success.
    /// Answers are cut to `wLength` and to `buf`.
    pub fn handle(&mut self, req: &ControlRequest, report: &Report, buf: &mut [u8]) -> usize {
        if req.kind() != RequestType::Class {
            return 0;
        }

        crate::trace_event!(TraceEvent::ControlRequest, req.request);

        let limit = buf.len().min(req.length as usize);
        match req.request {
            // Single report, so wValue (type / ID) is not inspected.
            request::GET_REPORT => {
                let bytes = report.to_bytes();
                let n = limit.min(REPORT_SIZE);
                buf[..n].copy_from_slice(&bytes[..n]);
                n
            }
            request::GET_IDLE => {
                if limit == 0 {
                    return 0;
                }
                buf[0] = self.idle_rate;
                1
            }
            request::SET_IDLE => {
                self.idle_rate = req.value_high();
                0
            }
            _ => 0,
        }
    }
}

/// Device state shared by the poll loop and the control-request path:
/// the latest report and the idle rate.
///
/// The poll loop is the only writer of the report; control requests only
/// read it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceState {
    report: Report,
    control: ControlRequestHandler,
}

impl DeviceState {
    /// Starts out holding the all-released report of the active layout.
    pub const fn new() -> Self {
        Self {
            report: Report::released::<ActiveLayout>(),
            control: ControlRequestHandler::new(),
        }
    }

    /// Latest report produced by the poll loop.
    pub const fn report(&self) -> Report {
        self.report
    }

    pub const fn idle_rate(&self) -> u8 {
        self.control.idle_rate()
    }

    /// Replace the current report.
    pub fn publish(&mut self, report: Report) {
        self.report = report;
    }

    /// Answer a control request against the current report.
    pub fn control_request(&mut self, req: &ControlRequest, buf: &mut [u8]) -> usize {
        self.control.handle(req, &self.report, buf)
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            stick: 0x20,
            buttons_low: 0x81,
            buttons_high: 0x02,
        }
    }

    #[test]
    fn setup_bytes_decode_little_endian() {
        let req = ControlRequest::from_setup_bytes([0x21, 0x0A, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(req.kind(), RequestType::Class);
        assert_eq!(req.request, request::SET_IDLE);
        assert_eq!(req.value, 0x2A00);
        assert_eq!(req.value_high(), 0x2A);
        assert_eq!(req.index, 0);
        assert_eq!(req.length, 0);

        let req = ControlRequest::from_setup_bytes([0xA1, 0x01, 0x00, 0x01, 0x00, 0x00, 0x03, 0x00]);
        assert_eq!(req.request_type & ControlRequest::DIR_IN, ControlRequest::DIR_IN);
        assert_eq!(req.length, 3);
    }

    #[test]
    fn request_type_decoding() {
        assert_eq!(RequestType::from(0x80), RequestType::Standard);
        assert_eq!(RequestType::from(0xA1), RequestType::Class);
        assert_eq!(RequestType::from(0xC0), RequestType::Vendor);
        assert_eq!(RequestType::from(0x60), RequestType::Reserved);
    }

    #[test]
    fn every_non_standard_request_is_answered_by_device() {
        // Class to device, interface 3, endpoint and other; vendor; reserved.
        for bm in [0x20, 0xA0, 0x21, 0xA2, 0x23, 0x40, 0xC1, 0x60] {
            let req = ControlRequest::from_setup_bytes([bm, 0x01, 0, 0, 3, 0, 8, 0]);
            assert!(req.answered_by_device(), "bmRequestType {:#x}", bm);
        }
        for bm in [0x00, 0x80, 0x81, 0x82] {
            let req = ControlRequest::from_setup_bytes([bm, 0x06, 0, 0x22, 0, 0, 0x40, 0]);
            assert!(!req.answered_by_device(), "bmRequestType {:#x}", bm);
        }
    }

    #[test]
    fn class_request_to_other_recipient_gets_empty_success() {
        let mut state = DeviceState::new();
        let mut buf = [0u8; 8];

        // SET_REPORT to interface 1 and an unknown class request to the device.
        for setup in [
            [0x21, request::SET_REPORT, 0, 2, 1, 0, 0, 0],
            [0xA0, 0x42, 0, 0, 0, 0, 8, 0],
        ] {
            let req = ControlRequest::from_setup_bytes(setup);
            assert!(req.answered_by_device());
            assert_eq!(state.control_request(&req, &mut buf), 0);
        }
    }

    #[test]
    fn class_constructor_sets_direction() {
        let get = ControlRequest::class(request::GET_REPORT, 0x0100, 0, 3);
        assert_eq!(get.request_type, 0xA1);
        let set = ControlRequest::class(request::SET_IDLE, 0, 0, 0);
        assert_eq!(set.request_type, 0x21);
    }

    #[test]
    fn fresh_state_answers_get_report_with_released_stick() {
        let mut state = DeviceState::new();
        let mut buf = [0u8; 8];
        let n = state.control_request(&ControlRequest::class(request::GET_REPORT, 0x0100, 0, 8), &mut buf);
        assert_eq!(&buf[..n], &Report::released::<ActiveLayout>().to_bytes());
        assert_eq!(DeviceState::default(), state);
    }

    #[cfg(not(feature = "button-axis"))]
    #[test]
    fn fresh_state_reports_hat_null_not_north() {
        let mut state = DeviceState::new();
        let mut buf = [0u8; 3];
        let n = state.control_request(&ControlRequest::class(request::GET_REPORT, 0x0100, 0, 3), &mut buf);
        assert_eq!(n, REPORT_SIZE);
        assert_eq!(buf, [0x80, 0x00, 0x00]);
    }

    #[test]
    fn get_report_returns_current_report() {
        let mut state = DeviceState::new();
        state.publish(sample_report());

        let mut buf = [0u8; 8];
        let n = state.control_request(&ControlRequest::class(request::GET_REPORT, 0x0100, 0, 8), &mut buf);
        assert_eq!(n, REPORT_SIZE);
        assert_eq!(&buf[..n], &[0x20, 0x81, 0x02]);
        // Reading does not disturb the report.
        assert_eq!(state.report(), sample_report());
    }

    #[test]
    fn get_report_ignores_report_type_and_id() {
        let mut state = DeviceState::new();
        state.publish(sample_report());

        for value in [0x0000, 0x0100, 0x0301, 0xFFFF] {
            let mut buf = [0u8; 3];
            let n = state.control_request(&ControlRequest::class(request::GET_REPORT, value, 0, 3), &mut buf);
            assert_eq!(n, 3);
            assert_eq!(buf, sample_report().to_bytes());
        }
    }

    #[test]
    fn get_report_truncates_to_w_length() {
        let mut state = DeviceState::new();
        state.publish(sample_report());

        let mut buf = [0u8; 8];
        let n = state.control_request(&ControlRequest::class(request::GET_REPORT, 0x0100, 0, 2), &mut buf);
        assert_eq!(n, 2);
        assert_eq!(&buf[..2], &[0x20, 0x81]);
    }

    #[test]
    fn set_idle_then_get_idle() {
        let mut state = DeviceState::new();
        let mut buf = [0u8; 8];

        let n = state.control_request(&ControlRequest::class(request::SET_IDLE, 0x2A00, 0, 0), &mut buf);
        assert_eq!(n, 0);
        assert_eq!(state.idle_rate(), 0x2A);

        let n = state.control_request(&ControlRequest::class(request::GET_IDLE, 0, 0, 1), &mut buf);
        assert_eq!(n, 1);
        assert_eq!(buf[0], 0x2A);
    }

    #[test]
    fn set_idle_uses_high_byte_only() {
        let mut state = DeviceState::new();
        let mut buf = [0u8; 1];
        state.control_request(&ControlRequest::class(request::SET_IDLE, 0x7D05, 0, 0), &mut buf);
        assert_eq!(state.idle_rate(), 0x7D);
    }

    #[test]
    fn get_idle_with_zero_length_sends_nothing() {
        let mut state = DeviceState::new();
        let mut buf = [0xEEu8; 1];
        let n = state.control_request(&ControlRequest::class(request::GET_IDLE, 0, 0, 0), &mut buf);
        assert_eq!(n, 0);
        assert_eq!(buf[0], 0xEE);
    }

    #[test]
    fn unsupported_class_requests_answer_empty() {
        let mut state = DeviceState::new();
        state.publish(sample_report());
        let mut buf = [0u8; 8];

        for code in [
            request::GET_PROTOCOL,
            request::SET_REPORT,
            request::SET_PROTOCOL,
            0x00,
            0x7F,
            0xFF,
        ] {
            let n = state.control_request(&ControlRequest::class(code, 0x0100, 0, 8), &mut buf);
            assert_eq!(n, 0, "request {:#x}", code);
        }
        assert_eq!(state.idle_rate(), 0);
        assert_eq!(state.report(), sample_report());
    }

    #[test]
    fn non_class_requests_answer_empty() {
        let mut state = DeviceState::new();
        state.publish(sample_report());
        let mut buf = [0u8; 8];

        // Vendor GET_REPORT look-alike and a standard request with the same code.
        for bm in [0xC0, 0xC1, 0x80, 0x81, 0xE1] {
            let req = ControlRequest::from_setup_bytes([bm, request::GET_REPORT, 0, 1, 0, 0, 8, 0]);
            assert_eq!(state.control_request(&req, &mut buf), 0);
        }
        // Vendor SET_IDLE look-alike must not touch the idle rate.
        let req = ControlRequest::from_setup_bytes([0x40, request::SET_IDLE, 0, 0x55, 0, 0, 0, 0]);
        assert_eq!(state.control_request(&req, &mut buf), 0);
        assert_eq!(state.idle_rate(), 0);
    }
}
