//! EP0 class and vendor requests.
//!
//! Registered with the builder ahead of the HID class so it sees every
//! non-standard request first, whatever the recipient. Answers come from
//! [`DeviceState::control_request`]; requests it does not know are
//! accepted with a zero-length reply rather than stalled. Standard
//! requests (GET_DESCRIPTOR included) fall through to the stack and the
//! HID class.

use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::driver::Direction;
use embassy_usb::Handler;
use padstick::ControlRequest;

use super::SharedDeviceState;

pub struct ClassRequestHandler {
    state: &'static SharedDeviceState,
}

impl ClassRequestHandler {
    pub const fn new(state: &'static SharedDeviceState) -> Self {
        Self { state }
    }

    fn accepts(req: &Request) -> bool {
        setup_packet(req).answered_by_device()
    }

    fn dispatch(&self, req: &Request, buf: &mut [u8]) -> usize {
        let setup = setup_packet(req);
        self.state
            .lock(|state| state.borrow_mut().control_request(&setup, buf))
    }
}

/// Rebuild the raw SETUP fields from embassy's decoded request.
fn setup_packet(req: &Request) -> ControlRequest {
    let direction = match req.direction {
        Direction::In => ControlRequest::DIR_IN,
        Direction::Out => 0,
    };
    let kind = match req.request_type {
        RequestType::Standard => 0x00,
        RequestType::Class => ControlRequest::TYPE_CLASS,
        RequestType::Vendor => ControlRequest::TYPE_VENDOR,
        RequestType::Reserved => 0x60,
    };
    let recipient = match req.recipient {
        Recipient::Device => 0x00,
        Recipient::Interface => ControlRequest::RECIPIENT_INTERFACE,
        Recipient::Endpoint => 0x02,
        Recipient::Other => 0x03,
        _ => 0x1F,
    };

    ControlRequest {
        request_type: direction | kind | recipient,
        request: req.request,
        value: req.value,
        index: req.index,
        length: req.length,
    }
}

impl Handler for ClassRequestHandler {
    fn control_out(&mut self, req: Request, _data: &[u8]) -> Option<OutResponse> {
        if !Self::accepts(&req) {
            return None;
        }
        self.dispatch(&req, &mut []);
        Some(OutResponse::Accepted)
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if !Self::accepts(&req) {
            return None;
        }
        let n = self.dispatch(&req, buf);
        Some(InResponse::Accepted(&buf[..n]))
    }
}
