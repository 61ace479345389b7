//! Horologe Command Protocol
//!
//! This crate defines the command model shared by every intake source of
//! the clock, and the packet protocol spoken over the wireless serial link
//! between a phone app (the link master) and the clock.
//!
//! # Protocol Overview
//!
//! Requests and responses are short ASCII packets:
//! ```text
//! ┌───────┬─────┬─────────────┬─────┐
//! │ START │ CMD │ DATA        │ END │
//! │  '*'  │ 1B  │ 0-6 digits  │ '~' │
//! └───────┴─────┴─────────────┴─────┘
//! ```
//!
//! Every request is answered with `*Z<code>~`. The clock is a pure slave:
//! it never retries and never speaks first.
//!
//! Before the protocol runs, the module is configured with AT directives
//! (see [`provision`]).

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod engine;
pub mod packet;
pub mod provision;

pub use command::{
    AdjustDirection, Command, CommandKind, DemoMode, FaceMode, SelectDirection, MAX_DATA_LEN,
};
pub use engine::{LinkEngine, LinkState, Outcome};
pub use packet::{AckCode, LinkError, PACKET_END, PACKET_START, PACKET_TIMEOUT_MS};
pub use provision::{ModuleProfile, ProvisionError, ReplyLine};
