//! Wireless serial link source
//!
//! Wraps a serial Bluetooth module. `init` provisions the module with AT
//! directives; after that every poll drains received bytes through the
//! [`LinkEngine`] and answers each resolved packet with an acknowledgment.

use heapless::String;

use horologe_hal::{Monotonic, UartRx, UartTx};
use horologe_protocol::provision::{Directive, MAX_NAME_LEN};
use horologe_protocol::{AckCode, Command, LinkEngine, ModuleProfile, Outcome, ReplyLine};

use super::InputSource;
use crate::config::LinkConfig;

/// Upper bound on bytes consumed by a single poll
pub const MAX_BYTES_PER_POLL: usize = 16;

/// Summary of a provisioning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProvisionReport {
    /// Directives written to the module
    pub sent: u8,
    /// Directives that got no reply in time
    pub unanswered: u8,
    /// Directives that could not be assembled or written
    pub failed: u8,
}

/// Command source for the wireless serial link
pub struct LinkSource<U, C> {
    uart: U,
    clock: C,
    engine: LinkEngine,
    profile: ModuleProfile,
    name: String<MAX_NAME_LEN>,
    response_timeout_ms: u32,
}

impl<U, C> LinkSource<U, C>
where
    U: UartTx + UartRx,
    C: Monotonic,
{
    /// Create a link source from its UART, a clock and link settings
    pub fn new(uart: U, clock: C, config: &LinkConfig) -> Self {
        Self {
            uart,
            clock,
            engine: LinkEngine::with_timeout(config.packet_timeout_ms),
            profile: config.module,
            name: config.name.clone(),
            response_timeout_ms: config.response_timeout_ms,
        }
    }

    /// Framing engine state
    pub fn engine(&self) -> &LinkEngine {
        &self.engine
    }

    /// The UART, for board code that needs to reconfigure it
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Release the UART and clock
    pub fn into_parts(self) -> (U, C) {
        (self.uart, self.clock)
    }

    /// Send the module's AT directives, waiting for each reply
    ///
    /// Best effort: a directive without a reply is logged and the next one
    /// is sent anyway.
    pub fn provision(&mut self) -> ProvisionReport {
        info!("Provisioning {} module", self.profile);

        let mut report = ProvisionReport::default();
        let profile = self.profile;
        let name = self.name.clone();

        for directive in profile.lines(name.as_str()) {
            let Directive { line, awaits_reply } = match directive {
                Ok(directive) => directive,
                Err(e) => {
                    warn!("Provisioning line skipped: {}", e);
                    report.failed += 1;
                    continue;
                }
            };

            debug!("AT> {}", line.as_str().trim_end());
            if self.uart.write_blocking(line.as_bytes()).is_err() || self.uart.flush().is_err() {
                warn!("UART write failed during provisioning");
                report.failed += 1;
                continue;
            }
            report.sent += 1;

            if awaits_reply {
                let reply = self.await_reply();
                if reply.is_empty() {
                    warn!("No reply to {}", line.as_str().trim_end());
                    report.unanswered += 1;
                } else {
                    debug!("AT< {}", reply.as_str());
                }
            }
        }

        // Whatever the module said after the last directive is not a packet
        self.engine.reset();
        report
    }

    /// Collect one reply line or give up after the response timeout
    fn await_reply(&mut self) -> ReplyLine {
        let mut reply = ReplyLine::new();
        let started = self.clock.now_ms();

        while self.clock.now_ms().wrapping_sub(started) < self.response_timeout_ms {
            match self.uart.try_read() {
                Ok(Some(byte)) => {
                    if reply.push(byte) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(_) => {
                    warn!("UART read failed during provisioning");
                    break;
                }
            }
        }

        reply
    }

    /// Acknowledge a resolved packet and pass on any accepted command
    fn resolve(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Accepted(cmd) => debug!("Link packet accepted: {}", cmd),
            Outcome::Rejected(e) => debug!("Link packet rejected: {}", e),
        }

        self.send_ack(outcome.ack());
        outcome.command()
    }

    fn send_ack(&mut self, code: AckCode) {
        let packet = code.to_packet();
        if self.uart.write_blocking(&packet).is_err() || self.uart.flush().is_err() {
            warn!("Failed to send ACK {}", code);
        }
    }
}

impl<U, C> InputSource for LinkSource<U, C>
where
    U: UartTx + UartRx,
    C: Monotonic,
{
    fn init(&mut self) {
        let report = self.provision();
        info!(
            "Link ready: {} sent, {} unanswered, {} failed",
            report.sent,
            report.unanswered,
            report.failed
        );
    }

    fn poll_once(&mut self) -> Option<Command> {
        let now = self.clock.now_ms();

        if let Some(outcome) = self.engine.check_timeout(now) {
            self.resolve(outcome);
        }

        for _ in 0..MAX_BYTES_PER_POLL {
            let byte = match self.uart.try_read() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_) => {
                    warn!("UART read failed");
                    break;
                }
            };

            trace!("Link RX {=u8:#x}", byte);
            if let Some(outcome) = self.engine.feed(byte, now) {
                if let Some(cmd) = self.resolve(outcome) {
                    return Some(cmd);
                }
            }
        }

        None
    }
}
