//! USB HID gamepad device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one HID interface whose report descriptor is
//! the active stick layout's.

use super::control::ClassRequestHandler;
use super::{ReportWriter, UsbDev, CONNECT_SIGNAL, DEVICE_STATE, REPORT_CHANNEL};
use crate::error::Error;
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config};
use padstick::config;
use padstick::{ActiveLayout, StickLayout};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

static HID_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();
static CONTROL_HANDLER: StaticCell<ClassRequestHandler> = StaticCell::new();

/// Build result containing the USB device runner and the HID writer.
pub struct UsbHidDevice {
    pub device: UsbDev,
    pub writer: ReportWriter,
}

/// Initialise the USB stack and create the HID gamepad interface.
///
/// Must be called exactly once. All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 128]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    // Handlers are consulted in registration order: this one must come
    // before the HID class adds its own.
    builder.handler(CONTROL_HANDLER.init(ClassRequestHandler::new(&DEVICE_STATE)));

    let hid_state = HID_STATE.init(State::new());
    let hid_config = HidConfig {
        report_descriptor: ActiveLayout::REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: config::USB_HID_MAX_PACKET,
    };
    let writer = HidWriter::new(&mut builder, hid_state, hid_config);

    let device = builder.build();

    info!(
        "USB HID gamepad initialised ({=str}, {=u16:#06x}:{=u16:#06x})",
        ActiveLayout::NAME,
        config::USB_VID,
        config::USB_PID
    );

    UsbHidDevice { device, writer }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// Stays detached until the poll loop has finished its disconnect hold,
/// then handles enumeration, suspend/resume and EP0 forever.
pub async fn run_usb_device(mut device: UsbDev) -> ! {
    info!("USB device task started - waiting for attach");
    CONNECT_SIGNAL.wait().await;
    info!("USB attach");
    device.run().await
}

/// Report forwarding task - drains the report slot into the interrupt
/// IN endpoint.
pub async fn report_writer_task(mut writer: ReportWriter) -> ! {
    writer.ready().await;
    info!("HID endpoint configured - forwarding reports");

    loop {
        let report = REPORT_CHANNEL.receive().await;
        if let Err(e) = writer.write(&report).await {
            warn!("USB report write failed: {}", Error::from(e));
        }
    }
}
