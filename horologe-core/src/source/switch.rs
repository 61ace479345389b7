//! Mode switch source
//!
//! The single front-panel switch: press to bump the selected value, double
//! press to step through setup, long press to move to the next field.

use horologe_hal::{KeyPress, KeySwitch};
use horologe_protocol::{AdjustDirection, Command, SelectDirection};

use super::InputSource;

/// Command source for the debounced mode switch
pub struct SwitchSource<K> {
    switch: K,
}

impl<K: KeySwitch> SwitchSource<K> {
    pub fn new(switch: K) -> Self {
        Self { switch }
    }
}

/// Command for a classified switch event
pub fn command_for(press: KeyPress) -> Option<Command> {
    match press {
        KeyPress::None => None,
        KeyPress::Press => Some(Command::adjust(AdjustDirection::Up)),
        KeyPress::DoublePress => Some(Command::enter_setup()),
        KeyPress::LongPress => Some(Command::select(SelectDirection::Next)),
    }
}

impl<K: KeySwitch> InputSource for SwitchSource<K> {
    fn init(&mut self) {
        self.switch.begin();
        self.switch.set_repeat(false);
    }

    fn poll_once(&mut self) -> Option<Command> {
        let press = self.switch.read();
        if press != KeyPress::None {
            trace!("Switch {}", press);
        }
        command_for(press)
    }
}
