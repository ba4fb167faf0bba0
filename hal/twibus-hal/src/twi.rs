//! TWI bus master abstraction
//!
//! Provides the byte-level trait for TWI (I2C) master operations that can
//! be implemented by a bit-banged or a peripheral-backed transport.

/// Error from TWI bus operations
///
/// Every transport operation reports its outcome through this type; a
/// successful operation is the bus "idle/none" status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiError {
    /// A line was held low when the bus was initialized
    StuckBus,
    /// The start condition was not accepted by the bus engine
    StartFailure,
    /// The peer did not acknowledge a transmitted byte
    Nack,
    /// Another master drove the data line during transmission
    ArbitrationLost,
    /// A slave held the clock low past the configured poll budget
    StretchTimeout,
    /// Unclassified bus engine status
    General,
}

/// Transfer direction, encoded into the low bit of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// Master transmits to the slave
    Write = 0,
    /// Master receives from the slave
    Read = 1,
}

/// Caller's declared acknowledge intent for a receive operation
///
/// Independent of what is actually observed on the bus: the master answers
/// a received byte with ACK to request more data or NACK to end the read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acknowledge {
    /// Acknowledge the byte, more data is requested
    Ack,
    /// Do not acknowledge, no more data is requested
    Nack,
}

/// TWI bus configuration
#[derive(Debug, Clone, Copy)]
pub struct TwiConfig {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// Poll budget for clock-stretch waits; each poll is roughly one
    /// microsecond, exhausting the budget yields [`TwiError::StretchTimeout`]
    pub stretch_timeout_polls: u32,
    /// Run the start condition and each byte transfer inside a critical
    /// section so no interrupt perturbs the line timing
    pub block_irq: bool,
}

impl Default for TwiConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 100_000, // 100kHz standard mode
            stretch_timeout_polls: 25_000,
            block_irq: false,
        }
    }
}

impl TwiConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency_hz: 100_000,
        stretch_timeout_polls: 25_000,
        block_irq: false,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency_hz: 400_000,
        stretch_timeout_polls: 25_000,
        block_irq: false,
    };
}

/// TWI bus master
///
/// Byte-level master operations shared by the software and hardware
/// transports. A frame is bracketed by [`start`](TwiBus::start) and
/// [`stop`](TwiBus::stop); any `Nack` or `ArbitrationLost` in between is
/// terminal for the frame and the caller is responsible for issuing
/// `stop` - the transport never retries on its own.
pub trait TwiBus {
    /// Bring the bus up and verify both lines are free
    fn init(&mut self) -> Result<(), TwiError>;

    /// Generate a start condition
    ///
    /// Invoking this while a frame is already open produces a repeated
    /// start instead.
    fn start(&mut self) -> Result<(), TwiError>;

    /// Generate a stop condition and close the current frame
    fn stop(&mut self) -> Result<(), TwiError>;

    /// Shift one byte out, most-significant bit first
    fn send_byte(&mut self, byte: u8) -> Result<(), TwiError>;

    /// Address a slave for the given transfer direction
    fn send_address(&mut self, address: u8, direction: Direction) -> Result<(), TwiError> {
        self.send_byte((address << 1) | direction as u8)
    }

    /// Shift one byte in, answering with the given acknowledge intent
    fn receive_byte(&mut self, ack: Acknowledge) -> Result<u8, TwiError>;

    /// Release both lines and give up the bus
    ///
    /// Leaves any peer device state untouched; the bus must be
    /// re-initialized before further use.
    fn release(&mut self);
}
