//! In-memory font table
//!
//! [`FontMap`] holds glyphs added at runtime or loaded from a TOML asset
//! with one table per glyph, keyed by hex code:
//!
//! ```toml
//! ["41"]
//! rows = [14, 17, 17, 17, 31, 17, 17, 0]
//!
//! ["42"]
//! rows = [30, 17, 17, 30, 17, 17, 30, 0]
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use super::key::{CharCode, FontKey};
use super::table::FontTable;

/// Font asset loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontLoadError {
    /// Document could not be parsed
    Parse,
    /// A table name is not a hex character code
    InvalidKey,
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLoadError::Parse => f.write_str("malformed font document"),
            FontLoadError::InvalidKey => f.write_str("glyph key is not a hex character code"),
        }
    }
}

/// Font table backed by a sorted map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontMap {
    glyphs: BTreeMap<FontKey, Vec<u8>>,
}

impl FontMap {
    /// Create an empty font
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the glyph for a character code
    pub fn insert(&mut self, code: impl Into<CharCode>, rows: &[u8]) -> Option<Vec<u8>> {
        self.insert_key(FontKey::from(code.into()), rows)
    }

    /// Add or replace the glyph for a pre-formed key
    pub fn insert_key(&mut self, key: FontKey, rows: &[u8]) -> Option<Vec<u8>> {
        self.glyphs.insert(key, rows.to_vec())
    }

    /// Remove a glyph
    pub fn remove(&mut self, code: impl Into<CharCode>) -> Option<Vec<u8>> {
        self.glyphs.remove(&FontKey::from(code.into()))
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check if the font has no glyphs
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterate glyph keys in order
    pub fn keys(&self) -> impl Iterator<Item = &FontKey> {
        self.glyphs.keys()
    }

    /// Copy every glyph of another table for the given codes
    ///
    /// Codes the other table lacks are skipped. Returns how many glyphs
    /// were copied.
    pub fn extend_from<F: FontTable>(
        &mut self,
        other: &F,
        codes: impl IntoIterator<Item = u32>,
    ) -> usize {
        let mut copied = 0;
        for code in codes {
            let key = FontKey::from(CharCode::new(code));
            if let Some(rows) = other.rows(&key) {
                let rows = rows.to_vec();
                self.glyphs.insert(key, rows);
                copied += 1;
            }
        }
        copied
    }

    /// Load a font asset from TOML
    #[cfg(feature = "toml")]
    pub fn from_toml_str(input: &str) -> Result<Self, FontLoadError> {
        use alloc::string::String;
        use serde::Deserialize;

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Entry {
            rows: Vec<u8>,
        }

        let doc: BTreeMap<String, Entry> =
            toml::from_str(input).map_err(|_| FontLoadError::Parse)?;

        let mut map = Self::new();
        for (name, entry) in doc {
            let key = FontKey::parse(&name).ok_or(FontLoadError::InvalidKey)?;
            map.glyphs.insert(key, entry.rows);
        }
        Ok(map)
    }
}

impl FontTable for FontMap {
    fn rows(&self, key: &FontKey) -> Option<&[u8]> {
        self.glyphs.get(key).map(|rows| rows.as_slice())
    }
}
