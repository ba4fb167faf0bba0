//! Hardware TWI engine abstraction
//!
//! Provides the register-level trait a chip-specific HAL implements so the
//! generic `HardTwi` transport can drive a hardware TWI/I2C peripheral.

use crate::twi::Acknowledge;

/// Status of the last completed engine operation
///
/// Mirrors the status codes a hardware TWI engine latches after each bus
/// event. The transport maps these onto [`TwiError`](crate::twi::TwiError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralStatus {
    /// A start condition has been transmitted
    StartSent,
    /// A repeated start condition has been transmitted
    RepeatedStartSent,
    /// A transmitted byte was acknowledged
    WriteAcked,
    /// A transmitted byte was not acknowledged
    WriteNacked,
    /// A received byte was answered with ACK
    ReadAcked,
    /// A received byte was answered with NACK
    ReadNacked,
    /// Arbitration was lost to another master
    ArbitrationLost,
    /// Any status code not covered above
    Other,
}

/// Register-level interface of a hardware TWI engine
///
/// Operations come in `begin_*`/[`is_done`](TwiPeripheral::is_done) pairs:
/// `begin_*` strobes the engine and returns immediately, `is_done` polls
/// the engine's interrupt flag. The transport owns the polling loop so it
/// can bound it.
pub trait TwiPeripheral {
    /// Enable the engine in master mode at the given bus frequency
    fn enable(&mut self, frequency_hz: u32);

    /// Disable the engine and release the bus lines
    fn disable(&mut self);

    /// Begin transmitting a (repeated) start condition
    fn begin_start(&mut self);

    /// Begin transmitting a stop condition
    fn begin_stop(&mut self);

    /// Load a byte and begin shifting it out
    fn begin_write(&mut self, byte: u8);

    /// Begin shifting a byte in, to be answered with `ack`
    fn begin_read(&mut self, ack: Acknowledge);

    /// Whether the operation begun last has completed
    fn is_done(&self) -> bool;

    /// Status latched for the last completed operation
    fn status(&self) -> PeripheralStatus;

    /// The byte shifted in by the last completed read
    fn last_read(&self) -> u8;
}
