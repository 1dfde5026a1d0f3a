//! Font table trait

use super::key::FontKey;
use super::pattern::BitPattern;

/// Read-only lookup from font key to glyph rows
///
/// Implementations only supply [`rows`](FontTable::rows); decoding is
/// shared.
pub trait FontTable {
    /// Row values for `key`, or `None` if the font has no such glyph
    fn rows(&self, key: &FontKey) -> Option<&[u8]>;

    /// Decoded glyph for `key`
    fn glyph(&self, key: &FontKey) -> Option<BitPattern> {
        self.rows(key).map(BitPattern::decode)
    }

    /// Check if the font has a glyph for `key`
    fn contains(&self, key: &FontKey) -> bool {
        self.rows(key).is_some()
    }
}

impl<T: FontTable + ?Sized> FontTable for &T {
    fn rows(&self, key: &FontKey) -> Option<&[u8]> {
        (**self).rows(key)
    }
}
