//! Font tables and glyph decoding
//!
//! A font table maps a [`FontKey`] (the lowercase hexadecimal form of a
//! character code) to a list of row values. Each row value is read as a
//! 5-bit pattern, most significant bit on the left, and the rows stack
//! top to bottom into the 40-pixel [`BitPattern`] of a block.

pub mod hd44780;
pub mod key;
pub mod map;
pub mod pattern;
pub mod table;

pub use hd44780::Hd44780Font;
pub use key::{CharCode, FontKey};
pub use map::{FontLoadError, FontMap};
pub use pattern::BitPattern;
pub use table::FontTable;
