//! Firmware error type.
//!
//! The core in the library is infallible; these are bring-up and USB
//! endpoint failures seen by the binary. No `alloc`, all variants are
//! fixed-size and implement `defmt::Format` for on-target logging.

use defmt::Format;
use embassy_usb::driver::EndpointError;

/// Top-level error type used by the firmware tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Error {
    // Watchdog
    /// The watchdog was already running with a different configuration
    /// (it survives a soft reset and cannot be reconfigured).
    WatchdogUnavailable,

    // USB
    /// The interrupt IN endpoint is disabled (bus reset or unconfigured).
    EndpointDisabled,

    /// Report larger than the endpoint's max packet size.
    BufferOverflow,
}

// Convenience conversions

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::BufferOverflow => Error::BufferOverflow,
            EndpointError::Disabled => Error::EndpointDisabled,
        }
    }
}
