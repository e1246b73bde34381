//! HID report types: stick encoding, report layouts and the wire report.

pub mod descriptor;
pub mod direction;
pub mod layout;
pub mod report;


pub use direction::{encode, DirectionCode, StickSample};
pub use layout::{ActiveLayout, ButtonAxis, HatSwitch, StickLayout};
pub use report::{assemble, PortSnapshot, Report, REPORT_SIZE};

/// Sample-to-report in one step: resolve the stick, then pack.
pub fn report_from_ports<L: StickLayout>(ports: &PortSnapshot) -> Report {
    let code = L::encode(ports.stick_sample());
    assemble::<L>(code, ports)
}
