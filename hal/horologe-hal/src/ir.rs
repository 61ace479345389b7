//! Infrared remote receiver

/// Raw code reported when nothing was received
pub const IR_NO_SIGNAL: u32 = 0x0000_0000;

/// Raw code reported for a held key (NEC repeat frame)
pub const IR_REPEAT: u32 = 0xFFFF_FFFF;

/// Demodulating IR receiver
///
/// Implementations decode the carrier in an interrupt and hand out one
/// complete code per call.
pub trait IrReceiver {
    /// One-time setup (attach interrupt, start timer)
    fn begin(&mut self) {}

    /// Take the last decoded code
    ///
    /// Returns [`IR_NO_SIGNAL`] when no new key was received and
    /// [`IR_REPEAT`] for repeat frames.
    fn read(&mut self) -> u32;
}
