//! nRF52840 board wiring: input pins and the hardware watchdog.
//!
//! Default assignment (nRF52840-DK headers, adjust for your PCB):
//!
//! ```text
//!   Stick   N  → P0.03    S  → P0.04    E  → P0.28    W  → P0.29
//!   Group B B8 → P0.30    B9 → P0.31
//!   Group A B0 → P1.01    B1 → P1.02    B2 → P1.03    B3 → P1.04
//!           B4 → P1.05    B5 → P1.06    B6 → P1.07    B7 → P1.08
//! ```
//!
//! All lines are active-low with the internal pull-up enabled.

use crate::error::Error;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_nrf::peripherals;
use embassy_nrf::wdt::{self, WatchdogHandle};
use padstick::config::{
    GROUP_B_SHIFT, STICK_EAST_BIT, STICK_NORTH_BIT, STICK_SOUTH_BIT, STICK_WEST_BIT,
    WATCHDOG_TICKS_PER_SEC, WATCHDOG_TIMEOUT_SECS,
};
use padstick::{Heartbeat, InputPorts, PinGroup};

pub type StickPort = PinGroup<Input<'static>, 6>;
pub type ButtonsLowPort = PinGroup<Input<'static>, 6>;
pub type ButtonsHighPort = PinGroup<Input<'static>, 2>;
pub type Ports = InputPorts<StickPort, ButtonsLowPort, ButtonsHighPort>;

/// Physical pins, grouped by port.
pub struct BoardPins {
    /// North, south, east, west.
    pub stick: [AnyPin; 4],
    /// B8, B9.
    pub group_b: [AnyPin; 2],
    /// B0..B5.
    pub group_a_low: [AnyPin; 6],
    /// B6, B7.
    pub group_a_high: [AnyPin; 2],
}

fn pulled_up(pin: AnyPin) -> Input<'static> {
    Input::new(pin, Pull::Up)
}

/// Configure every line as an input with pull-up and group them into ports.
pub fn input_ports(pins: BoardPins) -> Ports {
    let [north, south, east, west] = pins.stick;
    let [b8, b9] = pins.group_b;
    let [b0, b1, b2, b3, b4, b5] = pins.group_a_low;
    let [b6, b7] = pins.group_a_high;

    let stick = PinGroup::new([
        (STICK_NORTH_BIT, pulled_up(north)),
        (STICK_SOUTH_BIT, pulled_up(south)),
        (STICK_EAST_BIT, pulled_up(east)),
        (STICK_WEST_BIT, pulled_up(west)),
        (GROUP_B_SHIFT, pulled_up(b8)),
        (GROUP_B_SHIFT + 1, pulled_up(b9)),
    ]);
    let buttons_low = PinGroup::new([
        (0, pulled_up(b0)),
        (1, pulled_up(b1)),
        (2, pulled_up(b2)),
        (3, pulled_up(b3)),
        (4, pulled_up(b4)),
        (5, pulled_up(b5)),
    ]);
    let buttons_high = PinGroup::new([(6, pulled_up(b6)), (7, pulled_up(b7))]);

    InputPorts::new(stick, buttons_low, buttons_high)
}

/// Hardware watchdog handle fed by the poll loop.
pub struct Watchdog(WatchdogHandle);

impl Heartbeat for Watchdog {
    fn feed(&mut self) {
        self.0.pet();
    }
}

/// Start the watchdog with a [`WATCHDOG_TIMEOUT_SECS`] period.
///
/// Once started it cannot be stopped; only a reset clears it.
pub fn start_watchdog(wdt: peripherals::WDT) -> Result<Watchdog, Error> {
    let mut config = wdt::Config::default();
    config.timeout_ticks = WATCHDOG_TICKS_PER_SEC * WATCHDOG_TIMEOUT_SECS;

    match wdt::Watchdog::try_new(wdt, config) {
        Ok((_wdt, [handle])) => Ok(Watchdog(handle)),
        Err(_) => Err(Error::WatchdogUnavailable),
    }
}
