//! Integration tests for padstick host-testable logic.
//!
//! Drives the public API the way the firmware does: ports in, poll loop,
//! transport out, control requests against the same device state.

use heapless::Vec;
use padstick::control::request;
use padstick::hid::{ButtonAxis, HatSwitch, REPORT_SIZE};
use padstick::{
    ActiveLayout, ControlRequest, DeviceState, DirectionCode, InputPorts, PollLoop, Report,
    StickLayout, Transport,
};

// ═══════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════

/// Transport that is ready on a fixed schedule and records submissions.
struct ScriptedTransport {
    ready: &'static [bool],
    step: usize,
    submitted: Vec<[u8; REPORT_SIZE], 16>,
}

impl ScriptedTransport {
    fn new(ready: &'static [bool]) -> Self {
        Self {
            ready,
            step: 0,
            submitted: Vec::new(),
        }
    }

    fn always_ready() -> Self {
        Self::new(&[true])
    }
}

impl Transport for ScriptedTransport {
    fn poll(&mut self) {}

    fn is_ready_to_submit(&mut self) -> bool {
        let ready = self.ready[self.step % self.ready.len()];
        self.step += 1;
        ready
    }

    fn submit(&mut self, report: &[u8]) {
        let mut bytes = [0u8; REPORT_SIZE];
        bytes.copy_from_slice(report);
        let _ = self.submitted.push(bytes);
    }

    fn connect(&mut self) {}

    fn disconnect(&mut self) {}
}

/// Wire levels of the three ports (active-low, idle = 0xFF).
fn ports(
    stick: u8,
    low: u8,
    high: u8,
) -> InputPorts<impl FnMut() -> u8, impl FnMut() -> u8, impl FnMut() -> u8> {
    InputPorts::new(move || stick, move || low, move || high)
}

fn poll_once<L: StickLayout>(stick: u8, low: u8, high: u8) -> [u8; REPORT_SIZE] {
    let mut state = DeviceState::new();
    let mut poll: PollLoop<L, _, _, _, _> = PollLoop::new(
        ScriptedTransport::always_ready(),
        || {},
        ports(stick, low, high),
        &mut state,
    );
    let report = poll.iterate().expect("transport is always ready");
    assert_eq!(poll.transport().submitted.as_slice(), &[report.to_bytes()]);
    report.to_bytes()
}

fn get_report(state: &mut DeviceState) -> Vec<u8, 8> {
    let mut buf = [0u8; 8];
    let req = ControlRequest::class(request::GET_REPORT, 0x0100, 0, 8);
    let n = state.control_request(&req, &mut buf);
    Vec::from_slice(&buf[..n]).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// End-to-end scenarios
// ═══════════════════════════════════════════════════════════════════

#[test]
fn east_only_reports_0x20() {
    // East line (bit 2) pulled low, everything else idle.
    assert_eq!(poll_once::<HatSwitch>(!0b0000_0100, 0xFF, 0xFF), [0x20, 0x00, 0x00]);
}

#[test]
fn east_and_north_reports_north_east() {
    assert_eq!(poll_once::<HatSwitch>(!0b0000_0101, 0xFF, 0xFF), [0x10, 0x00, 0x00]);
}

#[test]
fn two_group_a_buttons_set_exactly_their_bits() {
    // B1 on the low port, B7 on the high port.
    let bytes = poll_once::<HatSwitch>(0xFF, !0b0000_0010, !0b1000_0000);
    assert_eq!(bytes[0] >> 4, DirectionCode::Released.bits());
    assert_eq!(bytes[1], 0b1000_0010);
    assert_eq!(bytes[2], 0x00);
}

#[test]
fn set_idle_then_get_idle_round_trips() {
    let mut state = DeviceState::new();
    let mut buf = [0u8; 8];

    let set = ControlRequest::class(request::SET_IDLE, 0x2A00, 0, 0);
    assert_eq!(state.control_request(&set, &mut buf), 0);

    let get = ControlRequest::class(request::GET_IDLE, 0, 0, 1);
    assert_eq!(state.control_request(&get, &mut buf), 1);
    assert_eq!(buf[0], 0x2A);
}

// ═══════════════════════════════════════════════════════════════════
// Poll loop and control path sharing state
// ═══════════════════════════════════════════════════════════════════

#[test]
fn get_report_answers_with_last_polled_report() {
    let mut state = DeviceState::new();
    assert_eq!(
        get_report(&mut state).as_slice(),
        &Report::released::<ActiveLayout>().to_bytes()
    );

    {
        let mut poll: PollLoop<HatSwitch, _, _, _, _> = PollLoop::new(
            ScriptedTransport::always_ready(),
            || {},
            ports(!0b0000_1010, !0b0000_0001, 0xFF),
            &mut state,
        );
        poll.iterate();
    }

    // South + west = SW (5), B0 held.
    assert_eq!(get_report(&mut state).as_slice(), &[0x50, 0x01, 0x00]);
}

#[test]
fn heartbeat_fed_every_iteration_regardless_of_readiness() {
    static SCHEDULE: [bool; 4] = [false, true, false, false];
    let mut feeds = 0u32;
    let submitted;
    {
        let mut poll: PollLoop<HatSwitch, _, _, _, _> = PollLoop::new(
            ScriptedTransport::new(&SCHEDULE),
            || feeds += 1,
            ports(0xFF, 0xFF, 0xFF),
            DeviceState::new(),
        );
        for _ in 0..12 {
            poll.iterate();
        }
        submitted = poll.transport().submitted.len();
    }
    assert_eq!(feeds, 12);
    assert_eq!(submitted, 3);
}

#[test]
fn button_axis_layout_end_to_end() {
    // North + east pressed, B8 held on the stick port.
    let bytes = poll_once::<ButtonAxis>(!0b0001_0101, 0xFF, 0xFF);
    assert_eq!(bytes, [0x50, 0x00, 0x01]);
}

#[test]
fn active_layout_descriptor_matches_report_size() {
    let summary =
        padstick::hid::descriptor::DescriptorSummary::parse(ActiveLayout::REPORT_DESCRIPTOR);
    assert_eq!(summary.input_bytes(), REPORT_SIZE);
    assert_eq!(summary.buttons, 10);
}
