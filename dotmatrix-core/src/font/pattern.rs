//! 40-pixel glyph patterns

use core::fmt;

use heapless::String;

use crate::layout::{PIXELS_PER_ROW, PIXEL_COUNT, PIXEL_ROWS};

/// Mask selecting the five pixel bits of a row value
const ROW_MASK: u8 = (1 << PIXELS_PER_ROW) - 1;

/// Lit/unlit state of the 40 pixels of one block
///
/// Bit `i` is pixel `i` in row-major order (pixel 0 top-left, pixel 39
/// bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitPattern(u64);

impl BitPattern {
    /// All pixels unlit
    pub const BLANK: BitPattern = BitPattern(0);

    /// All pixels lit
    pub const FULL: BitPattern = BitPattern((1 << PIXEL_COUNT) - 1);

    /// Decode font table rows into a pattern
    ///
    /// Each row contributes its low five bits, left-padded with zeros.
    /// Rows past the eighth are ignored; missing rows stay unlit.
    pub fn decode(rows: &[u8]) -> Self {
        let mut pattern = Self::BLANK;
        for (row, &value) in rows.iter().take(PIXEL_ROWS).enumerate() {
            let bits = value & ROW_MASK;
            for col in 0..PIXELS_PER_ROW {
                let lit = bits >> (PIXELS_PER_ROW - 1 - col) & 1 == 1;
                pattern.set(row * PIXELS_PER_ROW + col, lit);
            }
        }
        pattern
    }

    /// Parse the `"1"`/`"0"` string form (exactly 40 characters)
    pub fn from_bit_str(s: &str) -> Option<Self> {
        if s.len() != PIXEL_COUNT {
            return None;
        }
        let mut pattern = Self::BLANK;
        for (i, b) in s.bytes().enumerate() {
            match b {
                b'1' => pattern.set(i, true),
                b'0' => {}
                _ => return None,
            }
        }
        Some(pattern)
    }

    /// Check if pixel `index` is lit
    ///
    /// Indices past the block are never lit.
    pub const fn is_lit(&self, index: usize) -> bool {
        index < PIXEL_COUNT && self.0 >> index & 1 == 1
    }

    /// Set pixel `index`; indices past the block are ignored
    pub fn set(&mut self, index: usize, lit: bool) {
        if index >= PIXEL_COUNT {
            return;
        }
        if lit {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Number of lit pixels
    pub const fn lit_count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Check if no pixel is lit
    pub const fn is_blank(&self) -> bool {
        self.0 == 0
    }

    /// Pixel states in index order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..PIXEL_COUNT).map(move |i| self.is_lit(i))
    }

    /// Render as the 40-character `"1"`/`"0"` string
    pub fn to_bit_string(&self) -> String<PIXEL_COUNT> {
        let mut s = String::new();
        for lit in self.iter() {
            // Exactly PIXEL_COUNT pushes
            let _ = s.push(if lit { '1' } else { '0' });
        }
        s
    }
}

impl fmt::Display for BitPattern {
    /// One text row per pixel row, `#` for lit and `.` for unlit
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..PIXEL_ROWS {
            if row > 0 {
                f.write_str("\n")?;
            }
            for col in 0..PIXELS_PER_ROW {
                let lit = self.is_lit(row * PIXELS_PER_ROW + col);
                f.write_str(if lit { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
