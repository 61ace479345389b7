//! Link framing engine
//!
//! Byte-at-a-time state machine for request packets arriving from the
//! wireless module:
//!
//! ```text
//!          '*'            cmd byte           last data byte ok        '~'
//!  Idle ─────────▶ Command ─────────▶ Data ──────────────────▶ End ─────────▶ Idle
//!                     │  (no data) ─────────────────────────────▲
//! ```
//!
//! The engine owns no I/O. The caller feeds received bytes with the current
//! millisecond timestamp, checks the timeout on every poll, and transmits
//! the acknowledgment for every [`Outcome`] it gets back.

use heapless::Vec;

use crate::command::{
    AdjustDirection, Command, CommandKind, DemoMode, FaceMode, SelectDirection, MAX_DATA_LEN,
};
use crate::packet::{AckCode, LinkError, PACKET_END, PACKET_START, PACKET_TIMEOUT_MS};

/// Framing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Waiting for START byte
    Idle,
    /// Got START, waiting for the command byte
    Command,
    /// Collecting data bytes
    Data,
    /// Data validated, waiting for END byte
    End,
}

/// Resolution of one request packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Well-formed packet; hand the command to the queue
    Accepted(Command),
    /// Packet discarded
    Rejected(LinkError),
}

impl Outcome {
    /// Acknowledgment code owed to the link master for this packet
    pub const fn ack(&self) -> AckCode {
        match self {
            Outcome::Accepted(_) => AckCode::Ok,
            Outcome::Rejected(err) => err.ack_code(),
        }
    }

    /// The accepted command, if any
    pub const fn command(&self) -> Option<Command> {
        match self {
            Outcome::Accepted(cmd) => Some(*cmd),
            Outcome::Rejected(_) => None,
        }
    }
}

/// Request packet state machine
#[derive(Debug, Clone)]
pub struct LinkEngine {
    state: LinkState,
    kind: Option<CommandKind>,
    expected_len: u8,
    buffer: Vec<u8, MAX_DATA_LEN>,
    pending: Option<Command>,
    started_at_ms: u32,
    timeout_ms: u32,
}

impl Default for LinkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkEngine {
    /// Create an engine with the default packet timeout
    pub fn new() -> Self {
        Self::with_timeout(PACKET_TIMEOUT_MS)
    }

    /// Create an engine with a custom packet timeout
    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self {
            state: LinkState::Idle,
            kind: None,
            expected_len: 0,
            buffer: Vec::new(),
            pending: None,
            started_at_ms: 0,
            timeout_ms,
        }
    }

    /// Current framing state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// True when no packet is in progress
    pub fn is_idle(&self) -> bool {
        self.state == LinkState::Idle
    }

    /// Packet timeout in milliseconds
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Drop any partial packet and return to `Idle`
    pub fn reset(&mut self) {
        self.state = LinkState::Idle;
        self.kind = None;
        self.expected_len = 0;
        self.buffer.clear();
        self.pending = None;
        self.started_at_ms = 0;
    }

    /// Abandon a packet that has been in progress for too long
    ///
    /// Call on every poll. Returns `Rejected(ProtocolTimeout)` once per
    /// stalled packet; partial data is discarded.
    pub fn check_timeout(&mut self, now_ms: u32) -> Option<Outcome> {
        if self.is_idle() {
            return None;
        }

        if now_ms.wrapping_sub(self.started_at_ms) >= self.timeout_ms {
            self.reset();
            return Some(Outcome::Rejected(LinkError::ProtocolTimeout));
        }

        None
    }

    /// Feed a single received byte
    ///
    /// Returns `Some(outcome)` when a packet resolves, either way.
    /// A START byte in the middle of a packet abandons that packet with a
    /// sequence error and begins a new one.
    pub fn feed(&mut self, byte: u8, now_ms: u32) -> Option<Outcome> {
        if byte == PACKET_START && !self.is_idle() {
            self.begin_packet(now_ms);
            return Some(Outcome::Rejected(LinkError::SequenceError));
        }

        match self.state {
            LinkState::Idle => {
                // Silently ignore non-START bytes while waiting
                if byte == PACKET_START {
                    self.begin_packet(now_ms);
                }
                None
            }
            LinkState::Command => {
                let Some(kind) = CommandKind::from_byte(byte) else {
                    return self.reject(LinkError::UnknownCommand);
                };

                self.kind = Some(kind);
                self.expected_len = kind.expected_data_len();
                if self.expected_len == 0 {
                    self.pending = Some(Command::new(kind, 0));
                    self.state = LinkState::End;
                } else {
                    self.state = LinkState::Data;
                }
                None
            }
            LinkState::Data => {
                // Cannot overflow: the state leaves Data once expected_len is reached
                let _ = self.buffer.push(byte);
                if self.buffer.len() < self.expected_len as usize {
                    return None;
                }

                let Some(kind) = self.kind else {
                    return self.reject(LinkError::SequenceError);
                };

                match decode_data(kind, &self.buffer) {
                    Ok(data) => {
                        self.pending = Some(Command::new(kind, data));
                        self.state = LinkState::End;
                        None
                    }
                    Err(err) => self.reject(err),
                }
            }
            LinkState::End => {
                let pending = self.pending.take();
                self.reset();
                match (byte, pending) {
                    (PACKET_END, Some(cmd)) => Some(Outcome::Accepted(cmd)),
                    _ => Some(Outcome::Rejected(LinkError::SequenceError)),
                }
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first resolved packet; remaining bytes are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8], now_ms: u32) -> Option<Outcome> {
        for &byte in bytes {
            if let Some(outcome) = self.feed(byte, now_ms) {
                return Some(outcome);
            }
        }
        None
    }

    fn begin_packet(&mut self, now_ms: u32) {
        self.reset();
        self.state = LinkState::Command;
        self.started_at_ms = now_ms;
    }

    fn reject(&mut self, err: LinkError) -> Option<Outcome> {
        self.reset();
        Some(Outcome::Rejected(err))
    }
}

/// Validate the data field of a complete packet and produce the record data
fn decode_data(kind: CommandKind, data: &[u8]) -> Result<u32, LinkError> {
    match (kind, data) {
        (CommandKind::Select, &[b]) => SelectDirection::from_byte(b)
            .map(|d| d as u32)
            .ok_or(LinkError::InvalidData),
        (CommandKind::AdjustValue, &[b]) => AdjustDirection::from_byte(b)
            .map(|d| d as u32)
            .ok_or(LinkError::InvalidData),
        (CommandKind::Demo, &[b]) => DemoMode::from_byte(b)
            .map(|d| d as u32)
            .ok_or(LinkError::InvalidData),
        (CommandKind::SetClockFace, &[b]) => FaceMode::from_byte(b)
            .map(|d| d as u32)
            .ok_or(LinkError::InvalidData),
        (CommandKind::SetBrightness, digits) => {
            // 000-999 accepted, anything above 255 saturates
            let value = parse_decimal(digits)?;
            Ok(value.min(255))
        }
        (CommandKind::SetTime, &[h1, h2, m1, m2, s1, s2]) => {
            let hours = parse_decimal(&[h1, h2])?;
            let minutes = parse_decimal(&[m1, m2])?;
            let seconds = parse_decimal(&[s1, s2])?;
            if hours > 12 || minutes > 59 || seconds > 59 {
                return Err(LinkError::InvalidData);
            }
            Ok(Command::set_time(hours as u8, minutes as u8, seconds as u8).data)
        }
        _ => Err(LinkError::InvalidData),
    }
}

/// Parse ASCII decimal digits; anything else is invalid data
fn parse_decimal(digits: &[u8]) -> Result<u32, LinkError> {
    digits.iter().try_fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + (b - b'0') as u32)
        } else {
            Err(LinkError::InvalidData)
        }
    })
}
