//! Board-agnostic command intake for the LED ring clock
//!
//! This crate turns user intent from every input the clock has into one
//! stream of commands for the execution loop:
//!
//! - Input source contract and the three sources (wireless link, IR
//!   remote, mode switch)
//! - Bounded command queue between the sources and the execution loop
//! - Intake poller that drives the sources once per loop iteration
//! - Configuration type definitions
//!
//! ```text
//!  LinkSource ──┐
//!  RemoteSource ├──▶ Intake::poll ──▶ CommandQueue ──▶ execution loop
//!  SwitchSource ┘
//! ```

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod intake;
pub mod queue;
pub mod source;

pub use config::{IntakeConfig, LinkConfig};
pub use intake::Intake;
pub use queue::{CommandQueue, QueueFull, QUEUE_CAPACITY};
pub use source::{InputSource, LinkSource, RemoteSource, SwitchSource};

pub use horologe_protocol::{Command, CommandKind};
