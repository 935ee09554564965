//! Identifiers for variables and dual variables.

use std::fmt;

const CHR_BITS: u32 = 8;
const INDEX_BITS: u32 = u64::BITS - CHR_BITS;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// 64-bit identifier shared by variables and dual variables.
///
/// Keys built with [`Key::symbol`] pack an ASCII tag into the top byte and an
/// index into the remaining 56 bits, so `Key::symbol('x', 1)` prints as `x1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(pub u64);

impl Key {
    /// Build a tagged key. Indices above 2^56 - 1 are truncated.
    ///
    /// The tag must be ASCII: only its low byte is stored, so distinct
    /// non-ASCII tags could otherwise produce the same key.
    pub fn symbol(chr: char, index: u64) -> Self {
        debug_assert!(chr.is_ascii(), "symbol tag {chr:?} is not ASCII");
        let tag = (chr as u64) & 0xff;
        Key((tag << INDEX_BITS) | (index & INDEX_MASK))
    }

    /// Tag character, if this key was built with [`Key::symbol`].
    pub fn chr(&self) -> Option<char> {
        let tag = (self.0 >> INDEX_BITS) as u8;
        tag.is_ascii_graphic().then_some(tag as char)
    }

    pub fn index(&self) -> u64 {
        self.0 & INDEX_MASK
    }
}

impl From<u64> for Key {
    fn from(raw: u64) -> Self {
        Key(raw)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chr() {
            Some(c) => write!(f, "{}{}", c, self.index()),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_roundtrips_tag_and_index() {
        let k = Key::symbol('l', 42);
        assert_eq!(k.chr(), Some('l'));
        assert_eq!(k.index(), 42);
        assert_eq!(k.to_string(), "l42");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not ASCII")]
    fn non_ascii_tags_are_rejected() {
        let _ = Key::symbol('ũ', 1);
    }

    #[test]
    fn plain_keys_print_as_integers() {
        assert_eq!(Key(7).to_string(), "7");
        assert_eq!(Key(7).chr(), None);
    }

    #[test]
    fn symbols_order_by_tag_then_index() {
        assert!(Key::symbol('l', 9) < Key::symbol('x', 0));
        assert!(Key::symbol('x', 1) < Key::symbol('x', 2));
    }
}
