//! Host-side stand-ins for the intake hardware

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use horologe_hal::{IrReceiver, KeyPress, KeySwitch, Monotonic, UartRx, UartTx};

/// UART with a scripted receive side and a captured transmit side
#[derive(Default)]
pub struct MockUart {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    /// Replies queued up for the next provisioning lines, one per line
    pub replies: VecDeque<&'static [u8]>,
}

impl MockUart {
    pub fn receive(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Take everything transmitted so far
    pub fn take_tx(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }
}

impl UartTx for MockUart {
    type Error = ();

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
        self.tx.extend_from_slice(data);
        // A provisioning line gets the next scripted reply
        if data.starts_with(b"AT+") {
            if let Some(reply) = self.replies.pop_front() {
                self.rx.extend(reply.iter().copied());
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = ();

    fn try_read(&mut self) -> Result<Option<u8>, ()> {
        Ok(self.rx.pop_front())
    }
}

/// Millisecond clock under test control
///
/// `step_ms` is added on every read so busy-wait loops terminate.
#[derive(Clone, Default)]
pub struct MockClock {
    now: Rc<Cell<u32>>,
    step_ms: u32,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticking(step_ms: u32) -> Self {
        Self {
            now: Rc::default(),
            step_ms,
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }
}

impl Monotonic for MockClock {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step_ms));
        now
    }
}

/// IR receiver replaying a list of raw codes
#[derive(Default)]
pub struct MockIr {
    pub codes: VecDeque<u32>,
    pub started: bool,
}

impl IrReceiver for MockIr {
    fn begin(&mut self) {
        self.started = true;
    }

    fn read(&mut self) -> u32 {
        self.codes.pop_front().unwrap_or(0)
    }
}

/// Key switch replaying a list of classified presses
#[derive(Default)]
pub struct MockSwitch {
    pub presses: VecDeque<KeyPress>,
}

impl KeySwitch for MockSwitch {
    fn read(&mut self) -> KeyPress {
        self.presses.pop_front().unwrap_or(KeyPress::None)
    }
}
