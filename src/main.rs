//! padstick - USB HID gamepad firmware for the nRF52840.
//!
//! Samples a four-way digital stick and ten buttons, resolves the stick
//! to one of nine direction codes and sends a 3-byte HID report over the
//! chip's USB device controller.
//!
//! # Architecture
//!
//! ```text
//!  ┌──────────────┐  sample   ┌──────────────┐  slot (1)  ┌──────────────┐
//!  │  GPIO ports  │ ────────▶ │   PollLoop   │ ─────────▶ │  HID writer  │
//!  │  (pull-ups)  │           │  (main task) │            │  (EP1 IN)    │
//!  └──────────────┘           └──────┬───────┘            └──────────────┘
//!                                    │ feed / store
//!                          ┌─────────┴─────────┐
//!                          │ WDT  DEVICE_STATE │ ◀── EP0 class requests
//!                          └───────────────────┘
//! ```

#![no_std]
#![no_main]

mod board;
mod error;
mod usb;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::config::{Config, HfclkSource};
use embassy_nrf::gpio::Pin as _;
use embassy_time::Delay;
use padstick::hid::descriptor::DescriptorSummary;
use padstick::hid::REPORT_SIZE;
use padstick::{ActiveLayout, PollLoop, StickLayout};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::task]
async fn usb_task(device: usb::UsbDev) -> ! {
    usb::hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn report_writer(writer: usb::ReportWriter) -> ! {
    usb::hid_device::report_writer_task(writer).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("padstick starting");

    // USB needs the external high-frequency crystal.
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(config);

    // - Watchdog: first, so a hang anywhere below resets the chip -------
    let watchdog = match board::start_watchdog(p.WDT) {
        Ok(wdt) => wdt,
        Err(e) => defmt::panic!("watchdog start failed: {}", e),
    };

    // - Inputs -------------------------------------------------------
    let ports = board::input_ports(board::BoardPins {
        stick: [
            p.P0_03.degrade(),
            p.P0_04.degrade(),
            p.P0_28.degrade(),
            p.P0_29.degrade(),
        ],
        group_b: [p.P0_30.degrade(), p.P0_31.degrade()],
        group_a_low: [
            p.P1_01.degrade(),
            p.P1_02.degrade(),
            p.P1_03.degrade(),
            p.P1_04.degrade(),
            p.P1_05.degrade(),
            p.P1_06.degrade(),
        ],
        group_a_high: [p.P1_07.degrade(), p.P1_08.degrade()],
    });

    // - Report layout --------------------------------------------------
    let summary = DescriptorSummary::parse(ActiveLayout::REPORT_DESCRIPTOR);
    info!(
        "report layout {=str}: {} input bits, {} buttons, hat={}",
        ActiveLayout::NAME,
        summary.input_bits,
        summary.buttons,
        summary.has_hat_switch
    );
    defmt::assert_eq!(summary.input_bytes(), REPORT_SIZE);

    // - USB ------------------------------------------------------------
    let usb = usb::hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(report_writer(usb.writer)));

    // - Poll loop ------------------------------------------------------
    let mut poll: PollLoop<ActiveLayout, _, _, _, _> = PollLoop::new(
        usb::UsbTransport,
        watchdog,
        ports,
        usb::SharedStore::new(&usb::DEVICE_STATE),
    );

    poll.bring_up(&mut Delay);
    info!("entering poll loop");

    loop {
        poll.iterate();
        yield_now().await;
    }
}
