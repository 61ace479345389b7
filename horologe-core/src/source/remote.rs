//! Infrared remote source
//!
//! Remote key codes are looked up in a fixed key map. A key either maps
//! straight to a command, or is a digit that is accumulated until a command
//! whose data comes from the accumulator consumes it (EQ followed by digits
//! sets the brightness, for instance: `1 2 8 EQ`).

use horologe_hal::ir::{IR_NO_SIGNAL, IR_REPEAT};
use horologe_hal::IrReceiver;
use horologe_protocol::{
    AdjustDirection, Command, CommandKind, DemoMode, FaceMode, SelectDirection,
};

use super::InputSource;

/// Largest value the digit accumulator holds
pub const ACCUMULATOR_MAX: u8 = 255;

/// Where a mapped command gets its data from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyData {
    /// Fixed data value
    Fixed(u32),
    /// Take (and clear) the digit accumulator
    Accumulator,
}

/// What a remote key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// Issue a command
    Command(CommandKind, KeyData),
    /// Append a decimal digit to the accumulator
    Digit(u8),
}

/// One entry of the key map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: u32,
    pub action: KeyAction,
}

const fn bind(code: u32, kind: CommandKind, data: u32) -> KeyBinding {
    KeyBinding {
        code,
        action: KeyAction::Command(kind, KeyData::Fixed(data)),
    }
}

const fn digit(code: u32, value: u8) -> KeyBinding {
    KeyBinding {
        code,
        action: KeyAction::Digit(value),
    }
}

/// Key map for the common 21-key NEC "car MP3" remote
pub static DEFAULT_KEYMAP: [KeyBinding; 21] = [
    bind(0xFFA25D, CommandKind::Reset, 0),       // On/Off
    bind(0xFF629D, CommandKind::EnterSetup, 0),  // Mode
    bind(0xFFE21D, CommandKind::LampTest, 0),    // Mute
    bind(0xFF22DD, CommandKind::SetClockFace, FaceMode::Cycle as u32), // >||
    bind(0xFF02FD, CommandKind::Select, SelectDirection::Prev as u32), // |<<
    bind(0xFFC23D, CommandKind::Select, SelectDirection::Next as u32), // >>|
    KeyBinding {
        code: 0xFFE01F, // EQ
        action: KeyAction::Command(CommandKind::SetBrightness, KeyData::Accumulator),
    },
    bind(0xFFA857, CommandKind::AdjustValue, AdjustDirection::Down as u32), // -
    bind(0xFF906F, CommandKind::AdjustValue, AdjustDirection::Up as u32),   // +
    bind(0xFF9867, CommandKind::Demo, DemoMode::Cycle as u32), // Shuffle
    bind(0xFFB04F, CommandKind::Demo, DemoMode::Off as u32),   // U/SD
    digit(0xFF6897, 0),
    digit(0xFF30CF, 1),
    digit(0xFF18E7, 2),
    digit(0xFF7A85, 3),
    digit(0xFF10EF, 4),
    digit(0xFF38C7, 5),
    digit(0xFF5AA5, 6),
    digit(0xFF42BD, 7),
    digit(0xFF4AB5, 8),
    digit(0xFF52AD, 9),
];

/// Look up a raw code in a key map
///
/// Receiver housekeeping codes (no signal, repeat) never match.
pub fn decode(keymap: &[KeyBinding], code: u32) -> Option<KeyAction> {
    if code == IR_NO_SIGNAL || code == IR_REPEAT {
        return None;
    }

    keymap
        .iter()
        .find(|binding| binding.code == code)
        .map(|binding| binding.action)
}

/// Decimal digit accumulator, saturating at [`ACCUMULATOR_MAX`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigitAccumulator {
    value: u8,
}

impl DigitAccumulator {
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Shift in one decimal digit
    pub fn push(&mut self, digit: u8) {
        let next = self.value as u16 * 10 + digit.min(9) as u16;
        self.value = next.min(ACCUMULATOR_MAX as u16) as u8;
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Read and clear
    pub fn take(&mut self) -> u8 {
        core::mem::take(&mut self.value)
    }
}

/// Command source for the IR remote
pub struct RemoteSource<I> {
    receiver: I,
    keymap: &'static [KeyBinding],
    accumulator: DigitAccumulator,
}

impl<I: IrReceiver> RemoteSource<I> {
    /// Create a remote source using [`DEFAULT_KEYMAP`]
    pub fn new(receiver: I) -> Self {
        Self::with_keymap(receiver, &DEFAULT_KEYMAP)
    }

    /// Create a remote source with a custom key map
    pub fn with_keymap(receiver: I, keymap: &'static [KeyBinding]) -> Self {
        Self {
            receiver,
            keymap,
            accumulator: DigitAccumulator::new(),
        }
    }

    pub fn receiver(&self) -> &I {
        &self.receiver
    }

    /// Current accumulator contents
    pub fn pending_digits(&self) -> u8 {
        self.accumulator.value()
    }
}

impl<I: IrReceiver> InputSource for RemoteSource<I> {
    fn init(&mut self) {
        self.receiver.begin();
    }

    fn poll_once(&mut self) -> Option<Command> {
        let code = self.receiver.read();
        let action = decode(self.keymap, code)?;
        trace!("IR {=u32:#x} -> {}", code, action);

        match action {
            KeyAction::Digit(d) => {
                self.accumulator.push(d);
                None
            }
            KeyAction::Command(kind, KeyData::Fixed(data)) => Some(Command::new(kind, data)),
            KeyAction::Command(kind, KeyData::Accumulator) => {
                Some(Command::new(kind, self.accumulator.take() as u32))
            }
        }
    }
}
