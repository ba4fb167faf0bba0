//! Transport implementations
//!
//! This crate provides the concrete implementations of the bus traits
//! defined in twibus-hal:
//!
//! - Software transport (bit-banged over two open-drain GPIO lines)
//! - Hardware transport (adapter over a chip's TWI engine)

#![no_std]
#![deny(unsafe_code)]

pub mod twi;
