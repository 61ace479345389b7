//! Debounced momentary switch

/// Classified switch activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyPress {
    /// Nothing happened since the last read
    None,
    /// Short press and release
    Press,
    /// Two presses in quick succession
    DoublePress,
    /// Press held past the long-press threshold
    LongPress,
}

/// Key switch with debouncing and press classification done by the driver
pub trait KeySwitch {
    /// One-time setup
    fn begin(&mut self) {}

    /// Enable or disable auto-repeat while the key is held
    fn set_repeat(&mut self, _enabled: bool) {}

    /// Read the next classified event
    fn read(&mut self) -> KeyPress;
}
