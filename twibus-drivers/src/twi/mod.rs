//! TWI master transports
//!
//! Two interchangeable implementations of [`twibus_hal::twi::TwiBus`]:
//!
//! - [`SoftTwi`]: bit-banged over two [`OpenDrainLine`]s, for parts without
//!   a TWI engine or when pin flexibility is required
//! - [`HardTwi`]: adapter over a chip's [`TwiPeripheral`] engine
//!
//! Which one a board uses is a construction-time decision; everything above
//! the transport sees the same contract.
//!
//! [`OpenDrainLine`]: twibus_hal::line::OpenDrainLine
//! [`TwiPeripheral`]: twibus_hal::peripheral::TwiPeripheral

mod hard;
mod soft;

#[cfg(test)]
pub(crate) mod sim;

pub use hard::HardTwi;
pub use soft::SoftTwi;
