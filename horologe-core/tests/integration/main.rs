//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below exercises one part of the intake layer against the
//! mock hardware in `mock_hw`. Everything runs on the host.

mod intake_tests;
mod link_tests;
mod mock_hw;
mod provisioning_tests;
