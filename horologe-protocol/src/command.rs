//! Normalized command records
//!
//! Every intake source (wireless link, IR remote, mode switch) reduces user
//! intent to a [`Command`]. The execution loop only ever sees this type.
//!
//! "No command this cycle" is `Option::<Command>::None`; a `Command` value
//! always carries an actionable kind.

use heapless::Vec;

use crate::packet::{MAX_PACKET_SIZE, PACKET_END, PACKET_START};

/// Largest data field of any command (SetTime: HHMMSS)
pub const MAX_DATA_LEN: usize = 6;

// Wire format values
const CMD_LAMP_TEST: u8 = b'L';
const CMD_RESET: u8 = b'Y';
const CMD_SETUP: u8 = b'X';
const CMD_BRIGHTNESS: u8 = b'B';
const CMD_SELECT: u8 = b'S';
const CMD_VALUE: u8 = b'V';
const CMD_TIME: u8 = b'T';
const CMD_DEMO: u8 = b'D';
const CMD_CLOCK_FACE: u8 = b'C';

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Light every pixel briefly
    LampTest,
    /// Soft reboot
    Reset,
    /// Step through setup mode
    EnterSetup,
    /// Set brightness, data 0-255
    SetBrightness,
    /// Move the setup cursor, data is a [`SelectDirection`]
    Select,
    /// Change the selected value, data is an [`AdjustDirection`]
    AdjustValue,
    /// Set the time directly, data is packed `0x00HHMMSS`
    SetTime,
    /// Light show, data is a [`DemoMode`]
    Demo,
    /// Change the clock face, data is a [`FaceMode`]
    SetClockFace,
}

impl CommandKind {
    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_LAMP_TEST => Some(CommandKind::LampTest),
            CMD_RESET => Some(CommandKind::Reset),
            CMD_SETUP => Some(CommandKind::EnterSetup),
            CMD_BRIGHTNESS => Some(CommandKind::SetBrightness),
            CMD_SELECT => Some(CommandKind::Select),
            CMD_VALUE => Some(CommandKind::AdjustValue),
            CMD_TIME => Some(CommandKind::SetTime),
            CMD_DEMO => Some(CommandKind::Demo),
            CMD_CLOCK_FACE => Some(CommandKind::SetClockFace),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            CommandKind::LampTest => CMD_LAMP_TEST,
            CommandKind::Reset => CMD_RESET,
            CommandKind::EnterSetup => CMD_SETUP,
            CommandKind::SetBrightness => CMD_BRIGHTNESS,
            CommandKind::Select => CMD_SELECT,
            CommandKind::AdjustValue => CMD_VALUE,
            CommandKind::SetTime => CMD_TIME,
            CommandKind::Demo => CMD_DEMO,
            CommandKind::SetClockFace => CMD_CLOCK_FACE,
        }
    }

    /// Number of data bytes that follow the command byte in a link packet
    pub const fn expected_data_len(self) -> u8 {
        match self {
            CommandKind::LampTest | CommandKind::Reset | CommandKind::EnterSetup => 0,
            CommandKind::Select
            | CommandKind::AdjustValue
            | CommandKind::Demo
            | CommandKind::SetClockFace => 1,
            CommandKind::SetBrightness => 3,
            CommandKind::SetTime => 6,
        }
    }
}

/// Select sub-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SelectDirection {
    Next = b'0',
    Prev = b'1',
}

/// AdjustValue sub-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AdjustDirection {
    Down = b'0',
    Up = b'1',
}

/// Demo sub-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DemoMode {
    Off = b'0',
    Cycle = b'9',
}

/// SetClockFace sub-code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FaceMode {
    Cycle = b'9',
}

impl SelectDirection {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(SelectDirection::Next),
            b'1' => Some(SelectDirection::Prev),
            _ => None,
        }
    }
}

impl AdjustDirection {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(AdjustDirection::Down),
            b'1' => Some(AdjustDirection::Up),
            _ => None,
        }
    }
}

impl DemoMode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(DemoMode::Off),
            b'9' => Some(DemoMode::Cycle),
            _ => None,
        }
    }
}

impl FaceMode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'9' => Some(FaceMode::Cycle),
            _ => None,
        }
    }
}

/// A single unit of user intent
///
/// Plain value type: sources create one per poll, the queue's reader
/// consumes it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// What to do
    pub kind: CommandKind,
    /// Kind-specific argument
    pub data: u32,
}

impl Command {
    /// Create a command from raw parts
    pub const fn new(kind: CommandKind, data: u32) -> Self {
        Self { kind, data }
    }

    pub const fn lamp_test() -> Self {
        Self::new(CommandKind::LampTest, 0)
    }

    pub const fn reset() -> Self {
        Self::new(CommandKind::Reset, 0)
    }

    pub const fn enter_setup() -> Self {
        Self::new(CommandKind::EnterSetup, 0)
    }

    pub const fn brightness(level: u8) -> Self {
        Self::new(CommandKind::SetBrightness, level as u32)
    }

    pub const fn select(direction: SelectDirection) -> Self {
        Self::new(CommandKind::Select, direction as u32)
    }

    pub const fn adjust(direction: AdjustDirection) -> Self {
        Self::new(CommandKind::AdjustValue, direction as u32)
    }

    pub const fn demo(mode: DemoMode) -> Self {
        Self::new(CommandKind::Demo, mode as u32)
    }

    pub const fn clock_face(mode: FaceMode) -> Self {
        Self::new(CommandKind::SetClockFace, mode as u32)
    }

    /// Set-time command, hours in the most significant byte
    ///
    /// Range checking is the caller's business; the link engine validates
    /// before building one of these.
    pub const fn set_time(hours: u8, minutes: u8, seconds: u8) -> Self {
        let packed = ((hours as u32) << 16) | ((minutes as u32) << 8) | seconds as u32;
        Self::new(CommandKind::SetTime, packed)
    }

    /// Brightness level, for `SetBrightness` commands
    pub fn brightness_level(&self) -> Option<u8> {
        match self.kind {
            CommandKind::SetBrightness => Some(self.data.min(255) as u8),
            _ => None,
        }
    }

    /// Unpacked `(hours, minutes, seconds)`, for `SetTime` commands
    pub fn time(&self) -> Option<(u8, u8, u8)> {
        match self.kind {
            CommandKind::SetTime => Some((
                (self.data >> 16) as u8,
                (self.data >> 8) as u8,
                self.data as u8,
            )),
            _ => None,
        }
    }

    /// Encode this command as a link request packet (`*CMD DATA~`)
    ///
    /// This is the master's side of the link; the appliance only decodes
    /// requests, but tests and link simulators need to produce them.
    pub fn encode_request(&self) -> Vec<u8, MAX_PACKET_SIZE> {
        let mut packet = Vec::new();
        // Capacity covers START + CMD + MAX_DATA_LEN + END
        let _ = packet.push(PACKET_START);
        let _ = packet.push(self.kind.to_byte());

        match self.kind {
            CommandKind::LampTest | CommandKind::Reset | CommandKind::EnterSetup => {}
            CommandKind::Select
            | CommandKind::AdjustValue
            | CommandKind::Demo
            | CommandKind::SetClockFace => {
                let _ = packet.push(self.data as u8);
            }
            CommandKind::SetBrightness => {
                let _ = packet.extend_from_slice(&ascii_digits::<3>(self.data.min(999)));
            }
            CommandKind::SetTime => {
                let (h, m, s) = self.time().unwrap_or_default();
                for field in [h, m, s] {
                    let _ = packet.extend_from_slice(&ascii_digits::<2>(field.min(99) as u32));
                }
            }
        }

        let _ = packet.push(PACKET_END);
        packet
    }
}

/// Zero-padded decimal rendering of `value` into exactly `N` ASCII digits
fn ascii_digits<const N: usize>(mut value: u32) -> [u8; N] {
    let mut digits = [b'0'; N];
    for slot in digits.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
    digits
}
