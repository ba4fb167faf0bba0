//! Peripheral-backed TWI master
//!
//! Adapts a chip's hardware TWI engine to the same byte-level contract the
//! bit-banged transport satisfies. The engine does the line timing itself;
//! this transport sequences the operations and maps the latched status
//! codes onto [`TwiError`].
//!
//! Unlike the software variant the engine reports whether a (repeated)
//! start condition was actually accepted, so [`TwiBus::start`] can fail
//! here with [`TwiError::StartFailure`].

use twibus_hal::peripheral::{PeripheralStatus, TwiPeripheral};
use twibus_hal::twi::{Acknowledge, TwiBus, TwiConfig, TwiError};

/// Hardware TWI master over a register-level engine
pub struct HardTwi<P> {
    periph: P,
    config: TwiConfig,
    transmitting: bool,
}

impl<P: TwiPeripheral> HardTwi<P> {
    /// Create a new hardware transport over `periph`
    pub fn new(periph: P, config: TwiConfig) -> Self {
        Self {
            periph,
            config,
            transmitting: false,
        }
    }

    /// Whether a frame is currently open (start issued, no stop yet)
    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Consume the transport and give the engine back
    pub fn free(self) -> P {
        self.periph
    }

    /// Poll the engine's completion flag, within the configured budget
    ///
    /// The engine stalls mid-operation while a slave stretches the clock,
    /// so the same poll budget bounds that wait here.
    fn wait_done(&mut self) -> Result<(), TwiError> {
        let mut budget = self.config.stretch_timeout_polls;
        while !self.periph.is_done() {
            if budget == 0 {
                return Err(TwiError::StretchTimeout);
            }
            budget -= 1;
        }
        Ok(())
    }
}

impl<P: TwiPeripheral> TwiBus for HardTwi<P> {
    fn init(&mut self) -> Result<(), TwiError> {
        self.periph.enable(self.config.frequency_hz);
        Ok(())
    }

    fn start(&mut self) -> Result<(), TwiError> {
        self.periph.begin_start();
        self.wait_done()?;

        match self.periph.status() {
            PeripheralStatus::StartSent | PeripheralStatus::RepeatedStartSent => {
                self.transmitting = true;
                Ok(())
            }
            _ => Err(TwiError::StartFailure),
        }
    }

    fn stop(&mut self) -> Result<(), TwiError> {
        self.periph.begin_stop();
        self.wait_done()?;
        self.transmitting = false;
        Ok(())
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), TwiError> {
        self.periph.begin_write(byte);
        self.wait_done()?;

        match self.periph.status() {
            PeripheralStatus::WriteAcked => Ok(()),
            PeripheralStatus::WriteNacked => Err(TwiError::Nack),
            PeripheralStatus::ArbitrationLost => Err(TwiError::ArbitrationLost),
            _ => Err(TwiError::General),
        }
    }

    fn receive_byte(&mut self, ack: Acknowledge) -> Result<u8, TwiError> {
        self.periph.begin_read(ack);
        self.wait_done()?;

        let byte = self.periph.last_read();
        match self.periph.status() {
            PeripheralStatus::ArbitrationLost => Err(TwiError::ArbitrationLost),
            PeripheralStatus::ReadAcked if ack == Acknowledge::Ack => Ok(byte),
            PeripheralStatus::ReadNacked if ack == Acknowledge::Nack => Ok(byte),
            _ => Err(TwiError::Nack),
        }
    }

    fn release(&mut self) {
        self.periph.disable();
        self.transmitting = false;
    }
}
