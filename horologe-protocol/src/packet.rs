//! Link packet constants, error taxonomy and acknowledgments
//!
//! Request:  `'*' CMD DATA{0,6} '~'`
//! Response: `'*' 'Z' ERR '~'`
//!
//! Every request packet the appliance sees gets exactly one response,
//! whether it succeeded or not.

use crate::command::MAX_DATA_LEN;

/// Packet synchronization byte
pub const PACKET_START: u8 = b'*';

/// Packet terminator
pub const PACKET_END: u8 = b'~';

/// Command byte of an acknowledgment packet
pub const ACK_COMMAND: u8 = b'Z';

/// Maximum request size (START + CMD + MAX_DATA_LEN + END)
pub const MAX_PACKET_SIZE: usize = 1 + 1 + MAX_DATA_LEN + 1;

/// Acknowledgment size (START + ACK + code + END)
pub const ACK_SIZE: usize = 4;

/// Default time allowed from START to END of a request
pub const PACKET_TIMEOUT_MS: u32 = 1000;

/// Result code carried in an acknowledgment, as an ASCII digit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AckCode {
    /// Request accepted
    Ok = b'0',
    /// START seen but no END within the timeout
    Timeout = b'1',
    /// Command byte not recognised
    BadCommand = b'2',
    /// Data field failed validation
    BadData = b'3',
    /// Framing out of sequence
    Sequence = b'4',
}

impl AckCode {
    /// Parse a code from its ASCII digit
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(AckCode::Ok),
            b'1' => Some(AckCode::Timeout),
            b'2' => Some(AckCode::BadCommand),
            b'3' => Some(AckCode::BadData),
            b'4' => Some(AckCode::Sequence),
            _ => None,
        }
    }

    /// Encode the complete acknowledgment packet
    pub const fn to_packet(self) -> [u8; ACK_SIZE] {
        [PACKET_START, ACK_COMMAND, self as u8, PACKET_END]
    }
}

/// Protocol errors detected by the framing engine
///
/// These never leave the link source; they are reported to the link master
/// through the acknowledgment and otherwise absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Packet not completed within the timeout
    ProtocolTimeout,
    /// Command byte not in the command table
    UnknownCommand,
    /// Data bytes failed command-specific validation
    InvalidData,
    /// Wrong terminator, or a new START before this packet finished
    SequenceError,
}

impl LinkError {
    /// Acknowledgment code reported for this error
    pub const fn ack_code(self) -> AckCode {
        match self {
            LinkError::ProtocolTimeout => AckCode::Timeout,
            LinkError::UnknownCommand => AckCode::BadCommand,
            LinkError::InvalidData => AckCode::BadData,
            LinkError::SequenceError => AckCode::Sequence,
        }
    }
}

/// Parse an acknowledgment packet (master side)
pub fn parse_ack(bytes: &[u8]) -> Option<AckCode> {
    match bytes {
        [PACKET_START, ACK_COMMAND, code, PACKET_END] => AckCode::from_byte(*code),
        _ => None,
    }
}
