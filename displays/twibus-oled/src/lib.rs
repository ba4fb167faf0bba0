//! Page-addressed OLED protocol driver
//!
//! Drives an SSD1306-class 128x64 monochrome OLED over any
//! [`TwiBus`] transport, using the controller's page/column addressing
//! model: the panel is split into 8 horizontal pages of 8 pixel rows, and
//! every data byte covers one 8-pixel column slice of the current page.
//!
//! The driver keeps no frame buffer. It exposes positioned byte-range
//! writes (`write_segment`, `write_page`, `write_frame`, `write_column`)
//! and the matching clears; composing glyphs or graphics into byte
//! sequences is the caller's concern.
//!
//! Every operation reports transport failures; a failure mid-segment
//! leaves the panel partially updated and the controller's own cursor
//! untracked, which the next positioned write resolves by re-sending the
//! position commands.

#![no_std]
#![deny(unsafe_code)]

pub mod cmd;

use embedded_hal::delay::DelayNs;
use twibus_hal::twi::{Direction, TwiBus, TwiError};

/// Panel width in pixel columns
pub const WIDTH: u8 = 128;
/// Panel height in pixel rows
pub const ROWS: u8 = 64;
/// Number of 8-row pages
pub const PAGES: u8 = ROWS / 8;
/// Bytes in a full page-major frame
pub const FRAME_SIZE: usize = WIDTH as usize * PAGES as usize;

/// Error from display operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OledError {
    /// The transport reported a failure
    Bus(TwiError),
    /// Column/page arguments outside the panel, or a degenerate range
    ///
    /// Rejected requests perform no bus traffic and leave the cursor
    /// untouched.
    OutOfRange,
}

impl From<TwiError> for OledError {
    fn from(e: TwiError) -> Self {
        OledError::Bus(e)
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy)]
pub struct OledConfig {
    /// 7-bit bus address of the panel (0x3C or 0x3D on common modules)
    pub address: u8,
    /// Contrast level sent during initialization
    pub contrast: u8,
    /// Settling time after each stop condition, in microseconds
    pub idle_time_us: u32,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self {
            address: 0x3C,
            contrast: 0x7F,
            idle_time_us: 10,
        }
    }
}

/// Page-addressed OLED driver over a TWI transport
pub struct Oled<B, D> {
    bus: B,
    delay: D,
    config: OledConfig,
    /// Controller addressing state; only `set_position` moves it
    column: u8,
    page: u8,
}

impl<B, D> Oled<B, D>
where
    B: TwiBus,
    D: DelayNs,
{
    /// Create a new driver over `bus`
    ///
    /// The cursor starts at the home position; call [`init`](Oled::init)
    /// before any other operation.
    pub fn new(bus: B, delay: D, config: OledConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            column: 0,
            page: 0,
        }
    }

    /// Current cursor as (column, page)
    pub fn position(&self) -> (u8, u8) {
        (self.column, self.page)
    }

    /// Bring the bus up, run the controller's power-on sequence and clear
    /// the panel
    pub fn init(&mut self) -> Result<(), OledError> {
        self.bus.init()?;

        self.framed(|this| {
            let sequence = [
                cmd::DISPLAY_OFF,
                cmd::SET_MULTIPLEX_RATIO,
                cmd::MULTIPLEX_RATIO_64,
                cmd::SET_DISPLAY_OFFSET,
                0x00,
                cmd::SET_START_LINE,
                cmd::SEGMENT_REMAP_REVERSED,
                cmd::COM_SCAN_REVERSED,
                cmd::SET_COM_PINS,
                cmd::COM_PINS_ALTERNATIVE,
                cmd::SET_CONTRAST,
                this.config.contrast,
                cmd::ENTIRE_DISPLAY_RESUME,
                cmd::MODE_NORMAL,
                cmd::SET_CLOCK,
                cmd::CLOCK_DEFAULT,
                cmd::SET_ADDRESSING_MODE,
                cmd::ADDRESSING_MODE_PAGE,
                cmd::SET_CHARGE_PUMP,
                cmd::CHARGE_PUMP_INTERNAL,
                cmd::DISPLAY_ON,
            ];
            for &c in &sequence {
                this.command(c)?;
            }
            Ok(())
        })?;

        self.clear_all()
    }

    /// Move the controller's write position
    ///
    /// Sends the page-start command and both column-address nibbles in one
    /// transaction. A request outside the panel is rejected before any bus
    /// traffic and leaves the cursor where it was.
    pub fn set_position(&mut self, column: u8, page: u8) -> Result<(), OledError> {
        if column >= WIDTH || page >= PAGES {
            return Err(OledError::OutOfRange);
        }

        self.column = column;
        self.page = page;

        self.framed(|this| {
            this.command(cmd::SET_PAGE_START | (page & 0x07))?;
            this.command(cmd::SET_COLUMN_LOW | (column & 0x0F))?;
            this.command(cmd::SET_COLUMN_HIGH | (column >> 4))
        })
    }

    /// Move the cursor to the top-left corner
    pub fn home(&mut self) -> Result<(), OledError> {
        self.set_position(0, 0)
    }

    /// Write a byte range into one page at the given column range
    ///
    /// `column_stop` is inclusive and `data` must cover the range exactly.
    /// A single-column range (`column_start == column_stop`) is rejected
    /// here; use [`write_column`](Oled::write_column) for that.
    pub fn write_segment(
        &mut self,
        data: &[u8],
        column_start: u8,
        column_stop: u8,
        page: u8,
    ) -> Result<(), OledError> {
        if page >= PAGES || column_stop >= WIDTH || column_start >= column_stop {
            return Err(OledError::OutOfRange);
        }
        let span = (column_stop - column_start) as usize + 1;
        if data.len() != span {
            return Err(OledError::OutOfRange);
        }

        self.set_position(column_start, page)?;

        self.framed(|this| {
            this.bus.send_byte(cmd::CONTROL_DATA)?;
            for &b in data {
                this.bus.send_byte(b)?;
            }
            Ok(())
        })
    }

    /// Write one full-width page
    pub fn write_page(&mut self, data: &[u8], page: u8) -> Result<(), OledError> {
        self.write_segment(data, 0, WIDTH - 1, page)
    }

    /// Write a full frame, laid out page-major (8 contiguous 128-byte pages)
    pub fn write_frame(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<(), OledError> {
        self.home()?;

        for page in 0..PAGES {
            let offset = page as usize * WIDTH as usize;
            self.write_page(&frame[offset..offset + WIDTH as usize], page)?;
        }
        Ok(())
    }

    /// Write a single column byte
    pub fn write_column(&mut self, data: u8, column: u8, page: u8) -> Result<(), OledError> {
        if page >= PAGES || column >= WIDTH {
            return Err(OledError::OutOfRange);
        }

        self.set_position(column, page)?;

        self.framed(|this| {
            this.bus.send_byte(cmd::CONTROL_DATA)?;
            this.bus.send_byte(data)
        })
    }

    /// Clear a column range of one page (all pixels off)
    pub fn clear_segment(
        &mut self,
        column_start: u8,
        column_stop: u8,
        page: u8,
    ) -> Result<(), OledError> {
        if page >= PAGES || column_stop >= WIDTH || column_start >= column_stop {
            return Err(OledError::OutOfRange);
        }
        let span = (column_stop - column_start) as usize + 1;

        self.set_position(column_start, page)?;

        self.framed(|this| {
            this.bus.send_byte(cmd::CONTROL_DATA)?;
            for _ in 0..span {
                this.bus.send_byte(0x00)?;
            }
            Ok(())
        })
    }

    /// Clear one full-width page
    pub fn clear_page(&mut self, page: u8) -> Result<(), OledError> {
        self.clear_segment(0, WIDTH - 1, page)
    }

    /// Clear the whole panel and home the cursor
    pub fn clear_all(&mut self) -> Result<(), OledError> {
        for page in 0..PAGES {
            self.clear_page(page)?;
        }
        self.home()
    }

    /// Clear a single column byte
    pub fn clear_column(&mut self, column: u8, page: u8) -> Result<(), OledError> {
        self.write_column(0x00, column, page)
    }

    /// Shift the visible area vertically by `offset` pixel rows
    pub fn scroll_vertical(&mut self, offset: u8) -> Result<(), OledError> {
        if offset >= ROWS {
            return Err(OledError::OutOfRange);
        }

        self.framed(|this| {
            this.command(cmd::SET_DISPLAY_OFFSET)?;
            this.command(offset)
        })
    }

    /// Set the contrast level
    pub fn set_contrast(&mut self, level: u8) -> Result<(), OledError> {
        self.framed(|this| {
            this.command(cmd::SET_CONTRAST)?;
            this.command(level)
        })
    }

    /// Invert or restore the rendering of RAM content
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), OledError> {
        let mode = if inverted {
            cmd::MODE_INVERSE
        } else {
            cmd::MODE_NORMAL
        };
        self.framed(|this| this.command(mode))
    }

    /// Switch the panel on or off without touching RAM
    pub fn set_display_on(&mut self, on: bool) -> Result<(), OledError> {
        let mode = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.framed(|this| this.command(mode))
    }

    /// Release the bus lines and give the transport and delay back
    ///
    /// Display contents are left as they are; the panel keeps rendering.
    pub fn shutdown(mut self) -> (B, D) {
        self.bus.release();
        (self.bus, self.delay)
    }

    /// One command byte with its control-byte framing
    fn command(&mut self, command: u8) -> Result<(), TwiError> {
        self.bus.send_byte(cmd::CONTROL_COMMAND)?;
        self.bus.send_byte(command)
    }

    /// Run `f` inside a start/address ... stop write transaction
    ///
    /// A transport failure is terminal for the frame: the bus is closed
    /// best-effort and the original failure is reported.
    fn framed<F>(&mut self, f: F) -> Result<(), OledError>
    where
        F: FnOnce(&mut Self) -> Result<(), TwiError>,
    {
        self.bus.start()?;
        let result = self
            .bus
            .send_address(self.config.address, Direction::Write)
            .and_then(|()| f(self));

        match result {
            Ok(()) => {
                self.bus.stop()?;
                self.delay.delay_us(self.config.idle_time_us);
                Ok(())
            }
            Err(e) => {
                let _ = self.bus.stop();
                Err(OledError::Bus(e))
            }
        }
    }
}
