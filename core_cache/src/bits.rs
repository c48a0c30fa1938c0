//! Fixed-width binary strings, the address representation used in
//! pen-and-paper cache exercises.

use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitParseError {
    #[error("empty bit-string")]
    Empty,
    #[error("invalid character {found:?} at position {pos}, expected '0' or '1'")]
    NonBinary { found: char, pos: usize },
}

/// A sequence of binary digits whose width is significant: `"00011"`
/// and `"11"` are distinct values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitString(String);

impl BitString {
    pub fn parse(s: &str) -> Result<Self, BitParseError> {
        if s.is_empty() {
            return Err(BitParseError::Empty);
        }
        for (pos, found) in s.char_indices() {
            if found != '0' && found != '1' {
                return Err(BitParseError::NonBinary { found, pos });
            }
        }
        Ok(Self(s.to_owned()))
    }

    /// Zero-padded binary rendering of `value`, e.g. for line labels
    /// in cache snapshots. A `width` of 0 still renders one digit.
    pub fn from_value(value: usize, width: usize) -> Self {
        let width = width.max(1);
        Self(format!("{value:0width$b}"))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the bits, most significant first.
    pub fn value(&self) -> usize {
        self.0
            .bytes()
            .fold(0, |acc, b| (acc << 1) | usize::from(b == b'1'))
    }

    /// Left-pads with zeroes up to `width`. A `width` at or below the
    /// current length leaves the value untouched: padding never
    /// truncates.
    pub fn zero_extend(&self, width: usize) -> Self {
        if self.0.len() >= width {
            self.clone()
        } else {
            let mut s = "0".repeat(width - self.0.len());
            s.push_str(&self.0);
            Self(s)
        }
    }

    /// Splits into `(tag, index)`, the index being the rightmost
    /// `index_bits` bits. With `index_bits == 0` the whole string is
    /// the tag and the index is the fixed bit `"0"`.
    pub fn split_tag_index(&self, index_bits: usize) -> (Self, Self) {
        if index_bits == 0 {
            (self.clone(), Self("0".to_owned()))
        } else {
            let (tag, index) = self.0.split_at(self.0.len() - index_bits);
            (Self(tag.to_owned()), Self(index.to_owned()))
        }
    }
}

impl FromStr for BitString {
    type Err = BitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(BitString::parse("10011").unwrap().as_str(), "10011");
        assert_eq!(BitString::parse(""), Err(BitParseError::Empty));
        assert_eq!(
            BitString::parse("10x11"),
            Err(BitParseError::NonBinary { found: 'x', pos: 2 })
        );
    }

    #[test]
    fn test_value() {
        assert_eq!(BitString::parse("1011").unwrap().value(), 11);
        assert_eq!(BitString::parse("000").unwrap().value(), 0);
        assert_eq!(BitString::from_value(3, 3).as_str(), "011");
        assert_eq!(BitString::from_value(0, 0).as_str(), "0");
    }

    #[test]
    fn test_zero_extend() {
        let b = BitString::parse("11").unwrap();
        assert_eq!(b.zero_extend(5).as_str(), "00011");
        assert_eq!(b.zero_extend(2).as_str(), "11");
        assert_eq!(b.zero_extend(1).as_str(), "11");
    }

    #[test]
    fn test_split_tag_index() {
        let b = BitString::parse("10011").unwrap();
        let (tag, index) = b.split_tag_index(3);
        assert_eq!(tag.as_str(), "10");
        assert_eq!(index.as_str(), "011");
        let (tag, index) = b.split_tag_index(0);
        assert_eq!(tag.as_str(), "10011");
        assert_eq!(index.as_str(), "0");
        let (tag, index) = b.split_tag_index(5);
        assert_eq!(tag.as_str(), "");
        assert_eq!(index.as_str(), "10011");
    }
}
