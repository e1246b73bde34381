//! Fire-and-forget trace points.
//!
//! Each point carries the one-byte debug code used on the bench
//! (`0x00` init, `0x01` loop start, ...). With the `defmt` feature the
//! points go out over RTT at `trace` level; without it they compile away.

/// State transitions worth tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TraceEvent {
    InitStart = 0x00,
    LoopStart = 0x01,
    LoopIterate = 0x02,
    ReportPrepared = 0x03,
    ControlRequest = 0x50,
}

impl TraceEvent {
    /// Debug code emitted with the event.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Emit a trace point, optionally with one byte of payload.
///
/// # Example
///
/// ```rust
/// use padstick::trace::TraceEvent;
///
/// padstick::trace_event!(TraceEvent::LoopStart);
/// padstick::trace_event!(TraceEvent::ControlRequest, 0x0A_u8);
/// ```
#[macro_export]
macro_rules! trace_event {
    ($event:expr) => {{
        let event: $crate::trace::TraceEvent = $event;
        #[cfg(feature = "defmt")]
        defmt::trace!("[{=u8:#x}] {}", event.code(), event);
        let _ = event;
    }};
    ($event:expr, $payload:expr) => {{
        let event: $crate::trace::TraceEvent = $event;
        let payload: u8 = $payload;
        #[cfg(feature = "defmt")]
        defmt::trace!("[{=u8:#x}] {} {=u8:#x}", event.code(), event, payload);
        let _ = (event, payload);
    }};
}
