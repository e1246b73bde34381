//! USB device subsystem: one HID interface with one interrupt IN endpoint.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The poll loop never touches the stack directly: it
//! hands finished reports to a single-slot channel that the writer task
//! drains into the endpoint, and it publishes the same report to
//! [`DEVICE_STATE`] where the control handler answers GET_REPORT from.
//!
//! ```text
//!   PollLoop ──submit──▶ REPORT_CHANNEL (1) ──▶ report_writer_task ──▶ EP1 IN
//!      │
//!      └──store──▶ DEVICE_STATE ◀── ClassRequestHandler ◀── EP0 SETUP
//! ```

pub mod control;
pub mod hid_device;

use core::cell::RefCell;

use defmt::warn;
use embassy_nrf::peripherals;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_usb::class::hid::HidWriter;
use embassy_usb::UsbDevice;
use padstick::config::USB_HID_MAX_PACKET;
use padstick::hid::REPORT_SIZE;
use padstick::{DeviceState, Report, ReportStore, Transport};

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type UsbDev = UsbDevice<'static, UsbDriver>;
pub type ReportWriter = HidWriter<'static, UsbDriver, { USB_HID_MAX_PACKET as usize }>;

pub type SharedDeviceState = Mutex<CriticalSectionRawMutex, RefCell<DeviceState>>;

/// Last report and idle rate, shared between the poll loop and EP0.
pub static DEVICE_STATE: SharedDeviceState = Mutex::new(RefCell::new(DeviceState::new()));

/// The interrupt IN slot. Capacity 1: a full channel means "not ready".
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, [u8; REPORT_SIZE], 1> =
    Channel::new();

/// Raised once the detach hold is over; the device task waits on it
/// before enabling the pull-up.
pub static CONNECT_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// [`Transport`] backed by the embassy USB tasks.
pub struct UsbTransport;

impl Transport for UsbTransport {
    fn poll(&mut self) {
        // Bus events are serviced by the device task between iterations.
    }

    fn is_ready_to_submit(&mut self) -> bool {
        REPORT_CHANNEL.is_empty()
    }

    fn submit(&mut self, report: &[u8]) {
        let mut bytes = [0u8; REPORT_SIZE];
        let n = report.len().min(REPORT_SIZE);
        bytes[..n].copy_from_slice(&report[..n]);

        if REPORT_CHANNEL.try_send(bytes).is_err() {
            warn!("report slot busy, report dropped");
        }
    }

    fn connect(&mut self) {
        CONNECT_SIGNAL.signal(());
    }

    fn disconnect(&mut self) {
        // The device task has not attached yet; holding the signal low
        // keeps the D+ pull-up off.
        CONNECT_SIGNAL.reset();
    }
}

/// [`ReportStore`] writing into [`DEVICE_STATE`].
pub struct SharedStore(&'static SharedDeviceState);

impl SharedStore {
    pub const fn new(state: &'static SharedDeviceState) -> Self {
        Self(state)
    }
}

impl ReportStore for SharedStore {
    fn store(&mut self, report: Report) {
        self.0.lock(|state| state.borrow_mut().publish(report));
    }
}
