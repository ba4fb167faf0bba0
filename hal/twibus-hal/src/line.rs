//! Open-drain bus line abstraction
//!
//! Provides the trait for a single open-drain line (SCL or SDA) that can be
//! implemented by chip-specific HALs.

/// One open-drain bus line with an external or internal pull-up.
///
/// The line is never actively driven high. Releasing it configures the pin
/// as a high-impedance input and lets the pull-up raise the level, so a
/// peer device can still hold the line low (clock stretching) or contend
/// for it (arbitration). Implementations should handle the actual register
/// manipulation for the specific chip.
pub trait OpenDrainLine {
    /// Drive the line low (output, driven to 0)
    fn drive_low(&mut self);

    /// Release the line (high-impedance input, pull-up raises it)
    fn release(&mut self);

    /// Sample the actual wire level
    ///
    /// This reads the pin, not the last requested state: a released line
    /// reads low while a peer is holding it down.
    fn is_high(&self) -> bool;

    /// Sample the inverse wire level
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
