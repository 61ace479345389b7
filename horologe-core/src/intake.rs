//! Intake poller
//!
//! Owns the fixed set of sources and feeds the command queue. Called once
//! per iteration of the control loop; sources are polled in a fixed order
//! (link, remote, switch), so commands from different sources land in the
//! queue in poll order.

use horologe_protocol::Command;

use crate::queue::{CommandQueue, QueueFull};
use crate::source::InputSource;

/// The clock's intake sources, any of which may be absent
pub struct Intake<L, R, S> {
    link: Option<L>,
    remote: Option<R>,
    switch: Option<S>,
    dropped: u32,
}

impl<L, R, S> Intake<L, R, S>
where
    L: InputSource,
    R: InputSource,
    S: InputSource,
{
    /// Assemble the intake from whichever sources are fitted
    pub fn new(link: Option<L>, remote: Option<R>, switch: Option<S>) -> Self {
        Self {
            link,
            remote,
            switch,
            dropped: 0,
        }
    }

    /// Initialize every fitted source, link first
    pub fn init(&mut self) {
        info!("Intake init");

        if let Some(link) = self.link.as_mut() {
            link.init();
        }
        if let Some(remote) = self.remote.as_mut() {
            remote.init();
        }
        if let Some(switch) = self.switch.as_mut() {
            switch.init();
        }
    }

    /// Poll every source once and queue what they produce
    ///
    /// Returns the number of commands queued. When the queue is full the
    /// newest command is dropped and counted.
    pub fn poll<const N: usize>(&mut self, queue: &mut CommandQueue<N>) -> usize {
        let produced = [
            self.link.as_mut().and_then(|source| source.poll_once()),
            self.remote.as_mut().and_then(|source| source.poll_once()),
            self.switch.as_mut().and_then(|source| source.poll_once()),
        ];

        let mut queued = 0;
        for cmd in produced.into_iter().flatten() {
            if self.enqueue(queue, cmd) {
                queued += 1;
            }
        }
        queued
    }

    fn enqueue<const N: usize>(&mut self, queue: &mut CommandQueue<N>, cmd: Command) -> bool {
        match queue.try_push(cmd) {
            Ok(()) => {
                debug!("Queued {}", cmd);
                true
            }
            Err(QueueFull(dropped)) => {
                self.dropped = self.dropped.wrapping_add(1);
                warn!("Command queue full, dropping {}", dropped);
                false
            }
        }
    }

    /// Commands dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn link(&self) -> Option<&L> {
        self.link.as_ref()
    }

    pub fn remote(&self) -> Option<&R> {
        self.remote.as_ref()
    }

    pub fn switch(&self) -> Option<&S> {
        self.switch.as_ref()
    }
}
