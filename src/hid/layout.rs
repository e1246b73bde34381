//! Report layouts - how the stick lands in report byte 0.
//!
//! Two layouts are supported and one is picked at build time:
//!
//! - [`HatSwitch`] (default): the stick is resolved to a single 8-way
//!   hat switch value.
//! - [`ButtonAxis`] (`button-axis` feature): the four stick lines are
//!   reported as D-pad up/down/right/left buttons, unresolved.
//!
//! Both descriptors describe the same 3-byte report:
//!
//! ```text
//! Byte 0: bits 0-3 reserved (0), bits 4-7 stick
//! Byte 1: buttons 1-8
//! Byte 2: buttons 9-10 in bits 0-1, bits 2-7 padding (0)
//! ```

use super::direction::{self, DirectionCode, StickSample};

/// A report layout: its descriptor and the stick encoding it implies.
pub trait StickLayout {
    /// Value the stick is reduced to before packing.
    type Code: Copy + Eq + core::fmt::Debug;

    /// Short name for logs.
    const NAME: &'static str;

    /// HID report descriptor sent at enumeration.
    const REPORT_DESCRIPTOR: &'static [u8];

    /// Stick nibble with nothing pressed.
    const RELEASED_NIBBLE: u8;

    /// Reduce a stick sample to this layout's code.
    fn encode(sample: StickSample) -> Self::Code;

    /// 4-bit value stored in the upper nibble of byte 0.
    fn nibble(code: Self::Code) -> u8;
}

/// 8-way hat switch with a null state.
#[derive(Clone, Copy, Debug)]
pub struct HatSwitch;

/// Four independent D-pad buttons.
#[derive(Clone, Copy, Debug)]
pub struct ButtonAxis;

/// Layout compiled into the firmware.
#[cfg(not(feature = "button-axis"))]
pub type ActiveLayout = HatSwitch;

/// Layout compiled into the firmware.
#[cfg(feature = "button-axis")]
pub type ActiveLayout = ButtonAxis;

impl StickLayout for HatSwitch {
    type Code = DirectionCode;

    const NAME: &'static str = "hat-switch";

    const REPORT_DESCRIPTOR: &'static [u8] = HAT_SWITCH_REPORT_DESCRIPTOR;

    const RELEASED_NIBBLE: u8 = DirectionCode::Released.bits();

    fn encode(sample: StickSample) -> DirectionCode {
        direction::encode(sample)
    }

    fn nibble(code: DirectionCode) -> u8 {
        code.bits()
    }
}

impl StickLayout for ButtonAxis {
    type Code = StickSample;

    const NAME: &'static str = "button-axis";

    const REPORT_DESCRIPTOR: &'static [u8] = BUTTON_AXIS_REPORT_DESCRIPTOR;

    const RELEASED_NIBBLE: u8 = StickSample::RELEASED.bits();

    fn encode(sample: StickSample) -> StickSample {
        sample
    }

    fn nibble(code: StickSample) -> u8 {
        code.bits()
    }
}

/// Gamepad with a hat switch in the upper nibble of byte 0 and ten buttons.
#[rustfmt::skip]
pub const HAT_SWITCH_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x05,       // Usage (Game Pad)
    0xA1, 0x01,       // Collection (Application)
    //
    //   - Reserved nibble -
    0x75, 0x04,       //   Report Size (4)
    0x95, 0x01,       //   Report Count (1)
    0x81, 0x03,       //   Input (Constant, Variable, Absolute)
    //
    //   - Hat switch (4 bits, 8 = null) -
    0x09, 0x39,       //   Usage (Hat Switch)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x07,       //   Logical Maximum (7)
    0x35, 0x00,       //   Physical Minimum (0)
    0x46, 0x3B, 0x01, //   Physical Maximum (315)
    0x65, 0x14,       //   Unit (English Rotation: Degrees)
    0x75, 0x04,       //   Report Size (4)
    0x95, 0x01,       //   Report Count (1)
    0x81, 0x42,       //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00,       //   Unit (None)
    //
    //   - Buttons 1-10 + 6 bits padding -
    0x05, 0x09,       //   Usage Page (Button)
    0x19, 0x01,       //   Usage Minimum (Button 1)
    0x29, 0x0A,       //   Usage Maximum (Button 10)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x0A,       //   Report Count (10)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x95, 0x06,       //   Report Count (6)
    0x81, 0x03,       //   Input (Constant, Variable, Absolute)
    //
    0xC0,             // End Collection
];

/// Gamepad with D-pad up/down/right/left in the upper nibble of byte 0 and
/// ten buttons.
#[rustfmt::skip]
pub const BUTTON_AXIS_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x05,       // Usage (Game Pad)
    0xA1, 0x01,       // Collection (Application)
    //
    //   - Reserved nibble -
    0x75, 0x04,       //   Report Size (4)
    0x95, 0x01,       //   Report Count (1)
    0x81, 0x03,       //   Input (Constant, Variable, Absolute)
    //
    //   - D-pad (one bit per direction) -
    0x09, 0x90,       //   Usage (D-pad Up)
    0x09, 0x91,       //   Usage (D-pad Down)
    0x09, 0x92,       //   Usage (D-pad Right)
    0x09, 0x93,       //   Usage (D-pad Left)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x04,       //   Report Count (4)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    //
    //   - Buttons 1-10 + 6 bits padding -
    0x05, 0x09,       //   Usage Page (Button)
    0x19, 0x01,       //   Usage Minimum (Button 1)
    0x29, 0x0A,       //   Usage Maximum (Button 10)
    0x15, 0x00,       //   Logical Minimum (0)
    0x25, 0x01,       //   Logical Maximum (1)
    0x75, 0x01,       //   Report Size (1)
    0x95, 0x0A,       //   Report Count (10)
    0x81, 0x02,       //   Input (Data, Variable, Absolute)
    0x95, 0x06,       //   Report Count (6)
    0x81, 0x03,       //   Input (Constant, Variable, Absolute)
    //
    0xC0,             // End Collection
];
