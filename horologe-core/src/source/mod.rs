//! Intake sources
//!
//! Each physical way of talking to the clock is wrapped in a source that
//! implements [`InputSource`]. The set is fixed by the hardware: the
//! wireless link, the IR remote and the mode switch.

pub mod link;
pub mod remote;
pub mod switch;

pub use link::LinkSource;
pub use remote::{KeyAction, KeyBinding, KeyData, RemoteSource, DEFAULT_KEYMAP};
pub use switch::SwitchSource;

use horologe_protocol::Command;

/// Capability contract shared by every intake source
///
/// `poll_once` is called once per scheduler tick. It must not block: it
/// consumes what is already available and returns at most one command.
/// Side effects stay inside the source (its own buffers, and for the link,
/// acknowledgments sent back to the master).
pub trait InputSource {
    /// One-time hardware/protocol setup
    fn init(&mut self);

    /// Produce zero or one command
    fn poll_once(&mut self) -> Option<Command>;
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn init(&mut self) {
        (**self).init()
    }

    fn poll_once(&mut self) -> Option<Command> {
        (**self).poll_once()
    }
}
