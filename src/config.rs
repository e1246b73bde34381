//! Application-wide constants and compile-time configuration.
//!
//! Pin wiring, port masks, timing parameters and USB identity live here
//! so they can be tuned in one place. The report layout itself is chosen
//! with the `button-axis` cargo feature (see [`crate::hid::layout`]).

// USB

/// USB VID/PID borrowed from a Logitech mouse for demonstration only.
/// Never ship hardware with these IDs; allocate your own pair.
pub const USB_VID: u16 = 0x046D;
pub const USB_PID: u16 = 0xC00E;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "padstick";
pub const USB_PRODUCT: &str = "padstick HID gamepad";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Bus power budget (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// Interrupt IN endpoint polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

/// Max packet size of the interrupt IN endpoint.
pub const USB_HID_MAX_PACKET: u16 = 8;

/// How long the device stays detached before signalling presence (ms).
/// Must exceed the host's 250 ms attach debounce to force a clean
/// re-enumeration after a watchdog reset.
pub const DISCONNECT_HOLD_MS: u32 = 255;

// Watchdog

/// Watchdog period. The poll loop feeds it every iteration.
pub const WATCHDOG_TIMEOUT_SECS: u32 = 1;

/// Watchdog counter frequency (32.768 kHz LFCLK).
pub const WATCHDOG_TICKS_PER_SEC: u32 = 32_768;

// Input ports
//
// Three 8-bit port snapshots are sampled every report cycle. All lines
// are active-low with pull-ups, so a released control reads 1.
//
//   Stick port:    .   .  B9  B8  W   E   S   N
//   Buttons low:   .   R  B5  B4  B3  B2  B1  B0     (R = reset line)
//   Buttons high:  B7  B6  .   .   .   D+  .   D-    (D+/D- = USB data)

/// Stick port bit carrying north / up.
pub const STICK_NORTH_BIT: u8 = 0;
/// Stick port bit carrying south / down.
pub const STICK_SOUTH_BIT: u8 = 1;
/// Stick port bit carrying east / right.
pub const STICK_EAST_BIT: u8 = 2;
/// Stick port bit carrying west / left.
pub const STICK_WEST_BIT: u8 = 3;

/// The four directional lines of the stick port.
pub const STICK_MASK: u8 = (1 << STICK_NORTH_BIT)
    | (1 << STICK_SOUTH_BIT)
    | (1 << STICK_EAST_BIT)
    | (1 << STICK_WEST_BIT);

/// Button group A lines on the low buttons port (bit 6 is the reset line).
pub const GROUP_A_LOW_MASK: u8 = 0x3F;

/// Button group A lines on the high buttons port (low bits carry USB data).
pub const GROUP_A_HIGH_MASK: u8 = 0xC0;

/// Button group B lines (B8, B9) sit on the stick port above the stick.
pub const GROUP_B_MASK: u8 = 0x30;

/// Shift that moves group B down to bits 0-1 of report byte 2.
pub const GROUP_B_SHIFT: u8 = 4;
