//! The 3-byte gamepad input report and its assembly from port snapshots.
//!
//! Layout (3 bytes):
//! ```text
//! Byte 0: bits 4-7 = stick (hat code or D-pad bits), bits 0-3 = 0
//! Byte 1: buttons B0..B7, bit n = Bn pressed
//! Byte 2: bit 0 = B8, bit 1 = B9, bits 2-7 = 0
//! ```

use super::direction::StickSample;
use super::layout::StickLayout;
use crate::config::{GROUP_A_HIGH_MASK, GROUP_A_LOW_MASK, GROUP_B_MASK, GROUP_B_SHIFT};

/// Report size in bytes.
pub const REPORT_SIZE: usize = 3;

/// One sample of the three input ports, exactly as read (active-low).
///
/// Produced fresh every report cycle and never kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortSnapshot {
    /// Stick lines plus button group B.
    pub stick: u8,
    /// Button group A, low port.
    pub buttons_low: u8,
    /// Button group A, high port.
    pub buttons_high: u8,
}

impl PortSnapshot {
    /// Every line high: nothing pressed.
    pub const RELEASED: Self = Self {
        stick: 0xFF,
        buttons_low: 0xFF,
        buttons_high: 0xFF,
    };

    /// Active-high stick flags from this snapshot.
    pub const fn stick_sample(&self) -> StickSample {
        StickSample::from_port(self.stick)
    }
}

/// Gamepad input report as sent on the interrupt IN endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report {
    /// Stick value in the upper nibble, reserved lower nibble.
    pub stick: u8,
    /// Buttons B0..B7.
    pub buttons_low: u8,
    /// Buttons B8..B9.
    pub buttons_high: u8,
}

impl Report {
    /// Report for a device with nothing pressed, in layout `L`.
    pub const fn released<L: StickLayout>() -> Self {
        Self {
            stick: (L::RELEASED_NIBBLE & 0x0F) << 4,
            buttons_low: 0,
            buttons_high: 0,
        }
    }

    /// Stick value from the upper nibble of byte 0.
    pub const fn stick_nibble(&self) -> u8 {
        self.stick >> 4
    }

    /// Wire bytes.
    pub const fn to_bytes(&self) -> [u8; REPORT_SIZE] {
        [self.stick, self.buttons_low, self.buttons_high]
    }
}

/// Pack a stick code and the raw button ports into a report.
///
/// Button lines are active-low, so each group is complemented after
/// masking. Port bits that carry the reset line or USB data never reach
/// the report.
pub fn assemble<L: StickLayout>(code: L::Code, ports: &PortSnapshot) -> Report {
    let group_a = (ports.buttons_low & GROUP_A_LOW_MASK) | (ports.buttons_high & GROUP_A_HIGH_MASK);
    let group_b = !ports.stick & GROUP_B_MASK;

    Report {
        stick: (L::nibble(code) & 0x0F) << 4,
        buttons_low: !group_a & (GROUP_A_LOW_MASK | GROUP_A_HIGH_MASK),
        buttons_high: group_b >> GROUP_B_SHIFT,
    }
}
