//! Stick sampling and direction resolution.
//!
//! The four stick lines arrive active-low. [`StickSample`] flips them to
//! active-high once at the port boundary; everything downstream works on
//! "pressed = 1".

use crate::config::{STICK_EAST_BIT, STICK_MASK, STICK_NORTH_BIT, STICK_SOUTH_BIT, STICK_WEST_BIT};

/// Eight-way hat switch position, or released.
///
/// The discriminants are the 4-bit values the host sees; 8 lies outside
/// the descriptor's logical range and reads as the null state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DirectionCode {
    North = 0x0,
    NorthEast = 0x1,
    East = 0x2,
    SouthEast = 0x3,
    South = 0x4,
    SouthWest = 0x5,
    West = 0x6,
    NorthWest = 0x7,
    Released = 0x8,
}

impl DirectionCode {
    /// Every code, in wire order.
    pub const ALL: [DirectionCode; 9] = [
        DirectionCode::North,
        DirectionCode::NorthEast,
        DirectionCode::East,
        DirectionCode::SouthEast,
        DirectionCode::South,
        DirectionCode::SouthWest,
        DirectionCode::West,
        DirectionCode::NorthWest,
        DirectionCode::Released,
    ];

    /// 4-bit wire value.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Active-high view of the four stick lines.
///
/// Bit positions follow the stick port wiring in [`crate::config`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickSample(u8);

impl StickSample {
    /// Nothing pressed.
    pub const RELEASED: Self = Self(0);

    pub const NORTH: Self = Self(1 << STICK_NORTH_BIT);
    pub const SOUTH: Self = Self(1 << STICK_SOUTH_BIT);
    pub const EAST: Self = Self(1 << STICK_EAST_BIT);
    pub const WEST: Self = Self(1 << STICK_WEST_BIT);

    /// Convert a raw, active-low stick port snapshot.
    ///
    /// Bits outside the stick lines (group B buttons, unused pins) are
    /// dropped.
    pub const fn from_port(raw: u8) -> Self {
        Self(!raw & STICK_MASK)
    }

    /// Build from already active-high flags.
    pub const fn from_active(bits: u8) -> Self {
        Self(bits & STICK_MASK)
    }

    /// Active-high flags, stick lines only.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Combine two samples (both lines pressed).
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn north(self) -> bool {
        self.0 & Self::NORTH.0 != 0
    }

    pub const fn south(self) -> bool {
        self.0 & Self::SOUTH.0 != 0
    }

    pub const fn east(self) -> bool {
        self.0 & Self::EAST.0 != 0
    }

    pub const fn west(self) -> bool {
        self.0 & Self::WEST.0 != 0
    }
}

/// Resolve a stick sample into a hat switch position.
///
/// East beats west, and within a diagonal north beats south. North and
/// south together with no horizontal line matches neither vertical guard
/// and falls through to `Released`.
pub fn encode(sample: StickSample) -> DirectionCode {
    if sample.east() {
        if sample.north() {
            DirectionCode::NorthEast
        } else if sample.south() {
            DirectionCode::SouthEast
        } else {
            DirectionCode::East
        }
    } else if sample.west() {
        if sample.north() {
            DirectionCode::NorthWest
        } else if sample.south() {
            DirectionCode::SouthWest
        } else {
            DirectionCode::West
        }
    } else if sample.north() && !sample.south() {
        DirectionCode::North
    } else if sample.south() && !sample.north() {
        DirectionCode::South
    } else {
        DirectionCode::Released
    }
}
