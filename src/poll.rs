//! The cooperative poll loop.
//!
//! One iteration:
//!
//! 1. Feed the watchdog. Always, before anything else.
//! 2. Let the transport service the bus (non-blocking).
//! 3. If the transport can take a report: sample the ports, resolve the
//!    stick, pack the report, store it for GET_REPORT and submit it.
//!
//! Nothing here blocks or fails. If an iteration never comes back the
//! watchdog resets the device; that is the only recovery path.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;

use crate::config::DISCONNECT_HOLD_MS;
use crate::control::DeviceState;
use crate::hid::{self, Report, StickLayout};
use crate::input::InputSampler;
use crate::trace::TraceEvent;

/// USB transport as seen from the poll loop.
pub trait Transport {
    /// Advance the transport state machine. Must not block.
    fn poll(&mut self);

    /// `true` when the interrupt IN slot can take a new report.
    fn is_ready_to_submit(&mut self) -> bool;

    /// Hand a report to the transport. Only called after
    /// [`is_ready_to_submit`](Self::is_ready_to_submit) returned `true`.
    fn submit(&mut self, report: &[u8]);

    /// Signal device presence to the host.
    fn connect(&mut self);

    /// Detach from the host.
    fn disconnect(&mut self);
}

/// Liveness signal to an external supervisor (the watchdog).
pub trait Heartbeat {
    fn feed(&mut self);
}

impl<F> Heartbeat for F
where
    F: FnMut(),
{
    fn feed(&mut self) {
        self()
    }
}

/// Where the poll loop leaves each report for the control-request path.
pub trait ReportStore {
    fn store(&mut self, report: Report);
}

impl ReportStore for DeviceState {
    fn store(&mut self, report: Report) {
        self.publish(report);
    }
}

impl<T: ReportStore + ?Sized> ReportStore for &mut T {
    fn store(&mut self, report: Report) {
        (**self).store(report);
    }
}

/// Drives sampling and report submission for layout `L`.
pub struct PollLoop<L, T, H, I, S> {
    transport: T,
    heartbeat: H,
    inputs: I,
    store: S,
    _layout: PhantomData<L>,
}

impl<L, T, H, I, S> PollLoop<L, T, H, I, S>
where
    L: StickLayout,
    T: Transport,
    H: Heartbeat,
    I: InputSampler,
    S: ReportStore,
{
    /// Create the loop. The store starts out holding the all-released
    /// report so GET_REPORT has a sane answer before the first poll.
    pub fn new(transport: T, heartbeat: H, inputs: I, mut store: S) -> Self {
        store.store(Report::released::<L>());
        Self {
            transport,
            heartbeat,
            inputs,
            store,
            _layout: PhantomData,
        }
    }

    /// Force a clean re-enumeration: detach, stay detached for
    /// [`DISCONNECT_HOLD_MS`] while feeding the watchdog, then attach.
    pub fn bring_up<D: DelayNs>(&mut self, delay: &mut D) {
        crate::trace_event!(TraceEvent::InitStart);

        self.transport.disconnect();
        for _ in 0..DISCONNECT_HOLD_MS {
            self.heartbeat.feed();
            delay.delay_ms(1);
        }
        self.transport.connect();

        crate::trace_event!(TraceEvent::LoopStart);
    }

    /// Run one iteration. Returns the report if one was submitted.
    pub fn iterate(&mut self) -> Option<Report> {
        crate::trace_event!(TraceEvent::LoopIterate);
        self.heartbeat.feed();
        self.transport.poll();

        if !self.transport.is_ready_to_submit() {
            return None;
        }

        let ports = self.inputs.sample();
        let report = hid::report_from_ports::<L>(&ports);
        crate::trace_event!(TraceEvent::ReportPrepared);

        self.store.store(report);
        self.transport.submit(&report.to_bytes());
        Some(report)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
