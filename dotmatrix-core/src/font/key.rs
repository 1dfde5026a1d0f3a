//! Character codes and font keys

use core::fmt::{self, Write};

use heapless::String;

/// Longest key: eight hex digits of a `u32`
pub const MAX_KEY_LEN: usize = 8;

/// Numeric character code (a Unicode scalar or a font-specific code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CharCode(u32);

impl CharCode {
    /// Wrap a raw code
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Raw code value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for CharCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<u8> for CharCode {
    fn from(code: u8) -> Self {
        Self(code as u32)
    }
}

/// Lets untyped integer literals through; negative values become
/// `u32::MAX`, which no font maps.
impl From<i32> for CharCode {
    fn from(code: i32) -> Self {
        Self(u32::try_from(code).unwrap_or(u32::MAX))
    }
}

impl From<char> for CharCode {
    fn from(c: char) -> Self {
        Self(c as u32)
    }
}

/// Normalised font table key
///
/// Lowercase hexadecimal without leading zeros: `'A'` is `"41"`, a
/// newline is `"a"`, code zero is `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FontKey(String<MAX_KEY_LEN>);

impl FontKey {
    /// Parse a pre-formed key
    ///
    /// Accepts one to eight hex digits in either case and normalises to
    /// the canonical form. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.len() > MAX_KEY_LEN {
            return None;
        }
        let code = u32::from_str_radix(s, 16).ok()?;
        // from_str_radix accepts a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self::from(CharCode(code)))
    }

    /// Key as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Code point this key stands for
    pub fn code(&self) -> u32 {
        // Keys are only built from valid hex, so this cannot fail
        u32::from_str_radix(self.0.as_str(), 16).unwrap_or(0)
    }
}

impl From<CharCode> for FontKey {
    fn from(code: CharCode) -> Self {
        let mut s = String::new();
        // Eight hex digits always fit
        let _ = write!(s, "{:x}", code.0);
        Self(s)
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
