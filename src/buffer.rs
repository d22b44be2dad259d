//! The in-memory frame: one 8-byte buffer per module, laid out the way the driver chip expects
//! them so a push is a straight copy.
//!
//! ```text
//! left (column-major)            right (row-major)
//!   row: 6543210                   col:    43210
//!   0b0xxxxxxx  column 0           0b000xxxxx  row 0
//!   0b0xxxxxxx  column 1           0b000xxxxx  row 1
//!   0b0xxxxxxx  column 2           0b000xxxxx  row 2
//!   0b0xxxxxxx  column 3           0b000xxxxx  row 3
//!   0b0xxxxxxx  column 4           0b000xxxxx  row 4
//!   0b00000000                     0b000xxxxx  row 5
//!   0b00000000                     d00xxxxx    row 6, d = decimal dot
//!   0b0d000000  d = decimal dot    0b00000000
//! ```

use crate::command::consts::*;
use crate::surface::PixelSurface;

const LEFT_DOT_BYTE: usize = 7;
const LEFT_DOT_MASK: u8 = 1 << 6;
const RIGHT_DOT_BYTE: usize = 6;
const RIGHT_DOT_MASK: u8 = 1 << 7;

/// Bytes of `left` that carry pixel columns.
const LEFT_COLUMNS: usize = GLYPH_WIDTH;
/// Bytes of `right` that carry pixel rows.
const RIGHT_ROWS: usize = GLYPH_HEIGHT;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    left: [u8; MATRIX_LEN],
    right: [u8; MATRIX_LEN],
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes for the left module, in register order.
    pub fn left(&self) -> &[u8; MATRIX_LEN] {
        &self.left
    }

    /// Raw bytes for the right module, in register order.
    pub fn right(&self) -> &[u8; MATRIX_LEN] {
        &self.right
    }

    /// Turn every pixel and both decimal dots off.
    pub fn clear(&mut self) {
        self.left = [0; MATRIX_LEN];
        self.right = [0; MATRIX_LEN];
    }

    /// Set every pixel-carrying byte to the literal value 1 (`on`) or 0 (`off`).
    ///
    /// This writes byte values rather than all-ones masks, so filling "on" lights row 0 of each
    /// left column and column 0 of each right row, not the whole grid. Both decimal dots end up
    /// off, and reserved bytes stay zero.
    pub fn fill(&mut self, on: bool) {
        let value = on as u8;
        for byte in self.left[..LEFT_COLUMNS].iter_mut() {
            *byte = value;
        }
        for byte in self.right[..RIGHT_ROWS].iter_mut() {
            *byte = value;
        }
        self.left[LEFT_DOT_BYTE] = 0;
    }

    /// Set or clear each decimal dot independently. `None` leaves that dot as it is.
    pub fn set_decimal_dot(&mut self, left: Option<bool>, right: Option<bool>) {
        if let Some(on) = left {
            update_bit(&mut self.left[LEFT_DOT_BYTE], LEFT_DOT_MASK, on);
        }
        if let Some(on) = right {
            update_bit(&mut self.right[RIGHT_DOT_BYTE], RIGHT_DOT_MASK, on);
        }
    }

    /// Current state of the `(left, right)` decimal dots.
    pub fn decimal_dots(&self) -> (bool, bool) {
        (
            self.left[LEFT_DOT_BYTE] & LEFT_DOT_MASK != 0,
            self.right[RIGHT_DOT_BYTE] & RIGHT_DOT_MASK != 0,
        )
    }

    /// Resolve a logical coordinate to the byte and bit mask holding it, or `None` when the
    /// coordinate lies outside the 10x7 grid.
    fn locate(x: i32, y: i32) -> Option<(Side, usize, u8)> {
        if x < 0 || x >= WIDTH || y < 0 || y >= HEIGHT {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < GLYPH_WIDTH {
            Some((Side::Left, x, 1 << y))
        } else {
            Some((Side::Right, y, 1 << (x - GLYPH_WIDTH)))
        }
    }

    /// Set or clear the pixel at column `x`, row `y`. Coordinates off the grid are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((side, index, mask)) = Self::locate(x, y) {
            let byte = match side {
                Side::Left => &mut self.left[index],
                Side::Right => &mut self.right[index],
            };
            update_bit(byte, mask, on);
        }
    }

    /// Whether the pixel at column `x`, row `y` is lit. Coordinates off the grid read as off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        match Self::locate(x, y) {
            Some((Side::Left, index, mask)) => self.left[index] & mask != 0,
            Some((Side::Right, index, mask)) => self.right[index] & mask != 0,
            None => false,
        }
    }
}

impl PixelSurface for FrameBuffer {
    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        HEIGHT
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        FrameBuffer::set_pixel(self, x, y, on)
    }

    fn pixel(&self, x: i32, y: i32) -> bool {
        FrameBuffer::pixel(self, x, y)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

fn update_bit(byte: &mut u8, mask: u8, on: bool) {
    if on {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}
