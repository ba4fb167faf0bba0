//! Bit-banged TWI master
//!
//! Drives two open-drain GPIO lines directly. Timing comes from a
//! [`DelayNs`] provider: every quiescent step of the protocol holds the
//! lines for half a bit period derived from the configured frequency.
//!
//! Clock-stretch waits are bounded by the configured poll budget; a slave
//! that never releases SCL surfaces as [`TwiError::StretchTimeout`] instead
//! of suspending the caller forever.

use embedded_hal::delay::DelayNs;
use twibus_hal::line::OpenDrainLine;
use twibus_hal::twi::{Acknowledge, TwiBus, TwiConfig, TwiError};

/// Spacing between clock-stretch polls
const STRETCH_POLL_NS: u32 = 1_000;

/// Software TWI master over two open-drain lines
pub struct SoftTwi<Scl, Sda, D> {
    scl: Scl,
    sda: Sda,
    delay: D,
    config: TwiConfig,
    half_bit_ns: u32,
    transmitting: bool,
}

impl<Scl, Sda, D> SoftTwi<Scl, Sda, D>
where
    Scl: OpenDrainLine,
    Sda: OpenDrainLine,
    D: DelayNs,
{
    /// Create a new software transport
    ///
    /// The lines must be wired with pull-ups (internal or external); the
    /// transport never drives them high.
    pub fn new(scl: Scl, sda: Sda, delay: D, config: TwiConfig) -> Self {
        Self {
            scl,
            sda,
            delay,
            config,
            half_bit_ns: 500_000_000 / config.frequency_hz,
            transmitting: false,
        }
    }

    /// Whether a frame is currently open (start issued, no stop yet)
    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Consume the transport and give the lines and delay back
    pub fn free(self) -> (Scl, Sda, D) {
        (self.scl, self.sda, self.delay)
    }

    fn half_bit(&mut self) {
        self.delay.delay_ns(self.half_bit_ns);
    }

    /// Poll until the slave releases SCL, within the configured budget
    fn wait_stretch(&mut self) -> Result<(), TwiError> {
        let mut budget = self.config.stretch_timeout_polls;
        while self.scl.is_low() {
            if budget == 0 {
                return Err(TwiError::StretchTimeout);
            }
            budget -= 1;
            self.delay.delay_ns(STRETCH_POLL_NS);
        }
        Ok(())
    }

    fn start_edge(&mut self, repeated: bool) {
        // Mid-frame the peer may still be holding SDA from the acknowledge
        // slot; give it a falling clock edge to let go before the new start
        // edge is formed.
        if repeated {
            self.scl.drive_low();
            self.sda.release();
            self.half_bit();
        }
        self.scl.release();
        self.half_bit();
        // SDA falling while SCL is high is the START condition
        self.sda.drive_low();
        self.half_bit();
        self.scl.drive_low();
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), TwiError> {
        for bit in 0..8 {
            let high = byte & (0x80 >> bit) != 0;
            self.scl.drive_low();
            if high {
                self.sda.release();
            } else {
                self.sda.drive_low();
            }
            self.half_bit();

            // A competing master holding SDA low while we send a 1 has won
            // the bus; abort without clocking the remaining bits.
            if high && self.sda.is_low() {
                return Err(TwiError::ArbitrationLost);
            }

            self.scl.release();
            self.wait_stretch()?;
            self.half_bit();
        }

        // Ninth clock: release SDA and sample the slave's acknowledge
        self.scl.drive_low();
        self.sda.release();
        self.half_bit();
        self.scl.release();
        self.wait_stretch()?;
        let acked = self.sda.is_low();
        self.half_bit();

        if acked {
            Ok(())
        } else {
            Err(TwiError::Nack)
        }
    }

    fn shift_in(&mut self, ack: Acknowledge) -> Result<u8, TwiError> {
        let mut byte = 0u8;
        for _ in 0..8 {
            self.scl.drive_low();
            self.half_bit();
            self.scl.release();
            self.wait_stretch()?;
            self.half_bit();
            byte = (byte << 1) | self.sda.is_high() as u8;
        }

        // Ninth clock: answer with the caller's acknowledge intent
        self.scl.drive_low();
        match ack {
            Acknowledge::Ack => self.sda.drive_low(),
            Acknowledge::Nack => self.sda.release(),
        }
        self.half_bit();
        self.scl.release();
        self.wait_stretch()?;
        self.half_bit();
        self.scl.drive_low();
        self.sda.release();

        Ok(byte)
    }
}

impl<Scl, Sda, D> TwiBus for SoftTwi<Scl, Sda, D>
where
    Scl: OpenDrainLine,
    Sda: OpenDrainLine,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), TwiError> {
        self.scl.release();
        self.sda.release();

        // Two full bit periods of settling before probing the lines
        for _ in 0..4 {
            self.half_bit();
        }

        if self.scl.is_low() || self.sda.is_low() {
            return Err(TwiError::StuckBus);
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), TwiError> {
        // No line-state confirmation is available to a software master at
        // this step, so the start condition always reports success. Calling
        // this mid-frame produces a repeated start.
        let repeated = self.transmitting;
        self.transmitting = true;
        if self.config.block_irq {
            critical_section::with(|_| self.start_edge(repeated));
        } else {
            self.start_edge(repeated);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TwiError> {
        self.scl.drive_low();
        self.sda.drive_low();
        self.half_bit();
        self.scl.release();
        self.half_bit();
        // SDA rising while SCL is high is the STOP condition
        self.sda.release();
        self.half_bit();
        self.transmitting = false;
        Ok(())
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), TwiError> {
        if self.config.block_irq {
            critical_section::with(|_| self.shift_out(byte))
        } else {
            self.shift_out(byte)
        }
    }

    fn receive_byte(&mut self, ack: Acknowledge) -> Result<u8, TwiError> {
        if self.config.block_irq {
            critical_section::with(|_| self.shift_in(ack))
        } else {
            self.shift_in(ack)
        }
    }

    fn release(&mut self) {
        self.scl.release();
        self.sda.release();
        self.transmitting = false;
    }
}
