//! Twibus Hardware Abstraction Layer
//!
//! This crate defines the capability traits the transport implementations
//! in `twibus-drivers` are written against. Keeping the traits separate
//! from the drivers lets the same display protocol code run on top of a
//! bit-banged GPIO transport or a hardware TWI engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Display protocol (twibus-oled)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twibus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   SoftTwi     │       │   HardTwi     │
//! │  (bit-banged) │       │ (peripheral)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`line::OpenDrainLine`] - open-drain bus line (SCL or SDA)
//! - [`twi::TwiBus`] - byte-level bus master operations
//! - [`peripheral::TwiPeripheral`] - register-level hardware TWI engine

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod peripheral;
pub mod twi;

// Re-export key traits and types at crate root for convenience
pub use line::OpenDrainLine;
pub use peripheral::{PeripheralStatus, TwiPeripheral};
pub use twi::{Acknowledge, Direction, TwiBus, TwiConfig, TwiError};
