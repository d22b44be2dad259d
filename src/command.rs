//! The register set of the IS31FL3730 as wired on the LTP305 breakout.
//!
//! Note 1: The chip has two matrix buffers, but the two LTP305 modules are wired to them with
//! transposed bit significance. Matrix 1 (the right module) is row-major: one byte per row, bit n
//! is column n. Matrix 2 (the left module) is column-major: one byte per column, bit n is row n.
//! Data written to either buffer only becomes visible after an `Update` command.

use crate::error::Error;
use crate::interface::RegisterInterface;

pub mod consts {
    //! Register addresses, fixed register values and display geometry.

    /// Configuration register: shutdown, display mode and matrix size.
    pub const REG_CONFIGURATION: u8 = 0x00;
    /// Matrix 1 data register, driving the right module.
    pub const REG_MATRIX_RIGHT: u8 = 0x01;
    /// Update column register. Any write latches both matrix buffers onto the LEDs.
    pub const REG_UPDATE: u8 = 0x0C;
    /// Lighting effect register, which carries the row current limit.
    pub const REG_LIGHTING_EFFECT: u8 = 0x0D;
    /// Matrix 2 data register, driving the left module.
    pub const REG_MATRIX_LEFT: u8 = 0x0E;
    /// PWM register controlling global brightness.
    pub const REG_BRIGHTNESS: u8 = 0x19;

    /// Both matrices enabled, 8x8 matrix mode.
    pub const DEFAULT_CONFIGURATION: u8 = 0x18;
    /// 35 mA current limit.
    pub const DEFAULT_LIGHTING_EFFECT: u8 = 0x17;
    pub const UPDATE_VALUE: u8 = 0x01;

    pub const MAX_BRIGHTNESS: u8 = 127;
    pub const DEFAULT_BRIGHTNESS: u8 = 64;

    pub const DEFAULT_ADDRESS: u8 = 0x61;
    pub const ALTERNATE_ADDRESS_1: u8 = 0x62;
    pub const ALTERNATE_ADDRESS_2: u8 = 0x63;

    /// Bytes in each matrix buffer.
    pub const MATRIX_LEN: usize = 8;
    /// Number of LTP305 modules on one driver.
    pub const MODULES: usize = 2;
    /// Pixel columns per module, which is also the glyph width.
    pub const GLYPH_WIDTH: usize = 5;
    pub const GLYPH_HEIGHT: usize = 7;
    pub const WIDTH: i32 = (MODULES * GLYPH_WIDTH) as i32;
    pub const HEIGHT: i32 = GLYPH_HEIGHT as i32;
}

use self::consts::*;

/// Which of the two matrix buffers a `BufCommand::WriteMatrix` targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matrix {
    /// Matrix 2, column-major. (Note 1)
    Left,
    /// Matrix 1, row-major. (Note 1)
    Right,
}

impl Matrix {
    fn register(self) -> u8 {
        match self {
            Matrix::Left => REG_MATRIX_LEFT,
            Matrix::Right => REG_MATRIX_RIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write the configuration register. The breakout always runs with both matrices enabled in
    /// 8x8 mode, `consts::DEFAULT_CONFIGURATION`.
    SetConfiguration(u8),
    /// Write the lighting effect register, selecting the row drive current.
    SetLightingEffect(u8),
    /// Set the global PWM brightness. Range is 0-127.
    SetBrightness(u8),
    /// Latch the contents of both matrix buffers onto the LEDs.
    Update,
}

pub enum BufCommand<'buf> {
    /// Write all 8 bytes of one matrix buffer. (Note 1)
    WriteMatrix(Matrix, &'buf [u8; MATRIX_LEN]),
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error>
    where
        DI: RegisterInterface,
    {
        let (reg, value) = match self {
            Command::SetConfiguration(mode) => Ok((REG_CONFIGURATION, mode)),
            Command::SetLightingEffect(effect) => Ok((REG_LIGHTING_EFFECT, effect)),
            Command::SetBrightness(level) => match level {
                0..=MAX_BRIGHTNESS => Ok((REG_BRIGHTNESS, level)),
                _ => Err(Error::InvalidArgument),
            },
            Command::Update => Ok((REG_UPDATE, UPDATE_VALUE)),
        }?;
        iface.write_register(reg, value)
    }
}

impl<'a> BufCommand<'a> {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error>
    where
        DI: RegisterInterface,
    {
        match self {
            BufCommand::WriteMatrix(matrix, data) => iface.write_registers(matrix.register(), data),
        }
    }
}
