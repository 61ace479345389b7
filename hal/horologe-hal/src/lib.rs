//! Horologe Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the command intake layer
//! consumes. Board support code implements them; the intake sources in
//! `horologe-core` are generic over them, so the same sources run against
//! real peripherals on target and against mocks on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  horologe-core (intake sources, queue)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  horologe-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  embedded-io  │       │  board code / │
//! │  serial ports │       │  host mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial link to the wireless module
//! - [`time::Monotonic`] - Millisecond clock for protocol timeouts
//! - [`ir::IrReceiver`] - Demodulated infrared remote codes
//! - [`switch::KeySwitch`] - Debounced mode switch

#![no_std]
#![deny(unsafe_code)]

pub mod ir;
pub mod switch;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use ir::IrReceiver;
pub use switch::{KeyPress, KeySwitch};
pub use time::Monotonic;
pub use uart::{IoUart, UartRx, UartTx};
