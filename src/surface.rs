//! The drawing capability shared by the raw frame buffer and the display driver, including
//! fixed-width text rendering with one character per module.

use core::convert::TryFrom;
use core::fmt;

use itertools::iproduct;

use crate::command::consts::{GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::font::{self, Glyph};

/// Longest text `PixelSurface::draw_fmt` will render, in bytes.
pub const FORMAT_CAPACITY: usize = 63;

/// Something pixels can be drawn onto.
pub trait PixelSurface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Set or clear one pixel. Coordinates outside the surface are silently ignored.
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Read back one pixel. Coordinates outside the surface read as off.
    fn pixel(&self, x: i32, y: i32) -> bool;

    /// Number of character cells, one per 5-column module.
    fn modules(&self) -> usize {
        usize::try_from(self.width()).unwrap_or(0) / GLYPH_WIDTH
    }

    /// Blit `glyph` into module slot `position`, overwriting all 35 pixels of the slot.
    fn draw_glyph(&mut self, position: usize, glyph: &Glyph) {
        let left = match position
            .checked_mul(GLYPH_WIDTH)
            .and_then(|left| i32::try_from(left).ok())
        {
            Some(left) => left,
            None => return,
        };
        for (col, row) in iproduct!(0..GLYPH_WIDTH, 0..GLYPH_HEIGHT) {
            self.set_pixel(
                left.saturating_add(col as i32),
                row as i32,
                glyph.is_lit(col, row),
            );
        }
    }

    /// Draw `c` in module slot `position`. A character missing from the font leaves the slot
    /// showing whatever it showed before.
    fn draw_char(&mut self, position: usize, c: char) {
        if let Some(glyph) = font::lookup(c) {
            self.draw_glyph(position, glyph);
        }
    }

    /// Draw `s` one character per module. Extra characters are dropped, and modules past the
    /// end of `s` are blanked.
    fn draw_string(&mut self, s: &str) {
        let mut chars = s.chars();
        for position in 0..self.modules() {
            self.draw_char(position, chars.next().unwrap_or(' '));
        }
    }

    /// Format `args` and draw the result with `draw_string`. Output beyond `FORMAT_CAPACITY`
    /// bytes is cut off, and an empty result draws nothing.
    ///
    /// ```ignore
    /// display.draw_fmt(format_args!("{:2}", level));
    /// ```
    fn draw_fmt(&mut self, args: fmt::Arguments<'_>) {
        let text = format_bounded(args);
        if !text.is_empty() {
            self.draw_string(&text);
        }
    }
}

/// Render `args` into a fixed-capacity string, keeping as many whole characters as fit.
pub fn format_bounded(args: fmt::Arguments<'_>) -> heapless::String<FORMAT_CAPACITY> {
    let mut out = Truncating(heapless::String::new());
    // An error here means the text was cut short, which is the intended behaviour.
    let _ = fmt::write(&mut out, args);
    out.0
}

struct Truncating(heapless::String<FORMAT_CAPACITY>);

impl fmt::Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.0.push(c).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::FrameBuffer;

    /// Read a module slot back as column bytes, in font layout.
    fn slot(buf: &FrameBuffer, position: i32) -> [u8; 5] {
        let mut cols = [0u8; 5];
        for (col, byte) in cols.iter_mut().enumerate() {
            for row in 0..7 {
                if buf.pixel(position * 5 + col as i32, row) {
                    *byte |= 1 << row;
                }
            }
        }
        cols
    }

    fn glyph(c: char) -> [u8; 5] {
        font::lookup(c).unwrap().data
    }

    #[test]
    fn draw_string_two_characters() {
        let mut buf = FrameBuffer::new();
        buf.draw_string("AB");
        assert_eq!(slot(&buf, 0), glyph('A'));
        assert_eq!(slot(&buf, 1), glyph('B'));
        // 'A' lands column-major on the left module untouched.
        assert_eq!(&buf.left()[..5], &glyph('A'));
    }

    #[test]
    fn draw_string_right_module_is_transposed() {
        let mut buf = FrameBuffer::new();
        buf.draw_string(" 1");
        // '1' is [0x00, 0x42, 0x7F, 0x40, 0x00]: column 2 is lit on every row, column 1 on rows
        // 1 and 6, column 3 on row 6.
        assert_eq!(buf.right(), &[0x04, 0x06, 0x04, 0x04, 0x04, 0x04, 0x0E, 0x00]);
        assert_eq!(buf.left(), &[0; 8]);
    }

    #[test]
    fn draw_string_pads_with_blanks() {
        let mut buf = FrameBuffer::new();
        buf.fill(true);
        buf.draw_string("A");
        assert_eq!(slot(&buf, 0), glyph('A'));
        assert_eq!(slot(&buf, 1), [0; 5]);

        buf.draw_string("");
        assert_eq!(buf, FrameBuffer::new());
    }

    #[test]
    fn draw_string_truncates() {
        let mut long = FrameBuffer::new();
        long.draw_string("ABCDEF");
        let mut short = FrameBuffer::new();
        short.draw_string("AB");
        assert_eq!(long, short);
    }

    #[test]
    fn draw_char_unmapped_keeps_previous_glyph() {
        let mut buf = FrameBuffer::new();
        buf.draw_string("XY");
        buf.draw_char(0, '\0');
        buf.draw_char(1, 'ß');
        assert_eq!(slot(&buf, 0), glyph('X'));
        assert_eq!(slot(&buf, 1), glyph('Y'));

        // Through draw_string as well: only the mapped slot changes.
        buf.draw_string("\u{1}Z");
        assert_eq!(slot(&buf, 0), glyph('X'));
        assert_eq!(slot(&buf, 1), glyph('Z'));
    }

    #[test]
    fn draw_glyph_off_surface_is_ignored() {
        let mut buf = FrameBuffer::new();
        buf.draw_glyph(2, font::lookup('#').unwrap());
        buf.draw_glyph(usize::MAX, font::lookup('#').unwrap());
        assert_eq!(buf, FrameBuffer::new());
    }

    #[test]
    fn draw_glyph_keeps_decimal_dots() {
        let mut buf = FrameBuffer::new();
        buf.set_decimal_dot(Some(true), Some(true));
        buf.draw_string("88");
        assert_eq!(buf.decimal_dots(), (true, true));
        buf.draw_string("  ");
        assert_eq!(buf.decimal_dots(), (true, true));
    }

    #[test]
    fn draw_fmt() {
        let mut buf = FrameBuffer::new();
        buf.draw_fmt(format_args!("{:02}", 7));
        assert_eq!(slot(&buf, 0), glyph('0'));
        assert_eq!(slot(&buf, 1), glyph('7'));

        // Empty output leaves the buffer alone.
        buf.draw_fmt(format_args!("{}", ""));
        assert_eq!(slot(&buf, 1), glyph('7'));
    }

    #[test]
    fn format_bounded_truncates() {
        let text = format_bounded(format_args!("{:>100}", "x"));
        assert_eq!(text.len(), FORMAT_CAPACITY);
        assert!(text.chars().all(|c| c == ' '));

        let exact = format_bounded(format_args!("{:063}", 1));
        assert_eq!(exact.len(), 63);
        assert!(exact.ends_with('1'));

        // Multi-byte characters are never split.
        let degrees = format_bounded(format_args!("{}", "°".repeat(40)));
        assert_eq!(degrees.chars().count(), 31);
        assert_eq!(degrees.len(), 62);
    }

    #[test]
    fn format_bounded_truncated_text_still_draws() {
        let mut buf = FrameBuffer::new();
        buf.draw_fmt(format_args!("{}{:>80}", "OK", ""));
        assert_eq!(slot(&buf, 0), glyph('O'));
        assert_eq!(slot(&buf, 1), glyph('K'));
    }
}
