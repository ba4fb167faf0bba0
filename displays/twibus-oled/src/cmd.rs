//! SSD1306 controller command set
//!
//! Fixed byte values for the target display controller. The table must
//! stay exactly as the datasheet defines it to remain compatible with the
//! physical part.

/// Control byte announcing command bytes on the bus
pub const CONTROL_COMMAND: u8 = 0x80;
/// Control byte announcing display data on the bus
pub const CONTROL_DATA: u8 = 0x40;

/// Display off (sleep)
pub const DISPLAY_OFF: u8 = 0xAE;
/// Display on
pub const DISPLAY_ON: u8 = 0xAF;

/// Resume rendering from RAM content
pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;
/// Light every pixel regardless of RAM
pub const ENTIRE_DISPLAY_IGNORE_RAM: u8 = 0xA5;

/// Normal rendering (RAM 1 = pixel lit)
pub const MODE_NORMAL: u8 = 0xA6;
/// Inverted rendering
pub const MODE_INVERSE: u8 = 0xA7;

/// Contrast level follows as one argument byte
pub const SET_CONTRAST: u8 = 0x81;

/// Multiplex ratio follows as one argument byte
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;
/// Ratio argument for 64 COM lines
pub const MULTIPLEX_RATIO_64: u8 = 0x3F;

/// Vertical display offset follows as one argument byte
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;

/// Map RAM line 0 to the top of the panel
pub const SET_START_LINE: u8 = 0x40;

/// Reversed column mapping (horizontal mirror)
pub const SEGMENT_REMAP_REVERSED: u8 = 0xA1;
/// Reversed COM scan direction (vertical mirror)
pub const COM_SCAN_REVERSED: u8 = 0xC8;

/// COM pin layout follows as one argument byte
pub const SET_COM_PINS: u8 = 0xDA;
/// Alternative COM configuration, no remap
pub const COM_PINS_ALTERNATIVE: u8 = 0x12;

/// Clock divide ratio / oscillator frequency follow as one argument byte
pub const SET_CLOCK: u8 = 0xD5;
/// Divide by 1, typical oscillator frequency
pub const CLOCK_DEFAULT: u8 = 0x80;

/// Memory addressing mode follows as one argument byte
pub const SET_ADDRESSING_MODE: u8 = 0x20;
/// Page addressing mode
pub const ADDRESSING_MODE_PAGE: u8 = 0x02;

/// Charge pump setting follows as one argument byte
pub const SET_CHARGE_PUMP: u8 = 0x8D;
/// Use the internal charge pump
pub const CHARGE_PUMP_INTERNAL: u8 = 0x14;

/// Page start address, low 3 bits select the page (0xB0..0xB7)
pub const SET_PAGE_START: u8 = 0xB0;
/// Column start address, lower nibble
pub const SET_COLUMN_LOW: u8 = 0x00;
/// Column start address, upper nibble
pub const SET_COLUMN_HIGH: u8 = 0x10;
