//! Host-testable core of the padstick gamepad firmware.
//!
//! Everything with decision logic lives here and builds without any
//! embedded hardware: stick resolution, report packing, HID class
//! request handling and the poll loop. The firmware binary (`main.rs`,
//! `embedded` feature) plugs the nRF52840 pins, watchdog and USB stack
//! into the traits defined here.
//!
//! Usage: `cargo test` (host) or `cargo test --features button-axis`
//! for the D-pad report layout.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].

#![cfg_attr(not(test), no_std)]

pub mod trace;

pub mod config;
pub mod control;
pub mod hid;
pub mod input;
pub mod poll;

pub use control::{ControlRequest, ControlRequestHandler, DeviceState};
pub use hid::{ActiveLayout, DirectionCode, PortSnapshot, Report, StickLayout, StickSample};
pub use input::{DigitalInputPort, InputPorts, InputSampler, PinGroup};
pub use poll::{Heartbeat, PollLoop, ReportStore, Transport};
