//! Cache geometry: address width, line count, the index/tag split.

use std::fmt;

use thiserror::Error;

use crate::bits::BitString;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("address width must be at least 1 bit")]
    ZeroAddressBits,
    #[error("cache must have at least one line")]
    ZeroLines,
    #[error("{num_lines} lines cannot be indexed evenly, line count must be a power of two")]
    LinesNotPowerOfTwo { num_lines: usize },
    #[error(
        "{address_bits}-bit addresses are too narrow to index {num_lines} lines \
         ({index_bits} index bits required)"
    )]
    AddressTooNarrow {
        address_bits: usize,
        num_lines: usize,
        index_bits: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address {address} is {width} bits wide, expected at most {address_bits}")]
    TooWide {
        address: BitString,
        width: usize,
        address_bits: usize,
    },
}

/// Immutable for the lifetime of an engine. `index_bits` and
/// `tag_bits` are derived at construction and always satisfy
/// `index_bits + tag_bits == address_bits`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    address_bits: usize,
    num_lines: usize,
    index_bits: usize,
    tag_bits: usize,
}

/// A normalized address split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    /// the address left-padded to the configured width
    pub address: BitString,
    pub index: BitString,
    pub index_value: usize,
    pub tag: BitString,
}

impl CacheConfig {
    pub fn new(address_bits: usize, num_lines: usize) -> Result<Self, ConfigError> {
        if address_bits == 0 {
            return Err(ConfigError::ZeroAddressBits);
        }
        if num_lines == 0 {
            return Err(ConfigError::ZeroLines);
        }
        if !num_lines.is_power_of_two() {
            return Err(ConfigError::LinesNotPowerOfTwo { num_lines });
        }
        let index_bits = num_lines.trailing_zeros() as usize;
        if index_bits > address_bits {
            return Err(ConfigError::AddressTooNarrow {
                address_bits,
                num_lines,
                index_bits,
            });
        }
        Ok(Self {
            address_bits,
            num_lines,
            index_bits,
            tag_bits: address_bits - index_bits,
        })
    }

    pub fn address_bits(&self) -> usize {
        self.address_bits
    }

    pub fn num_lines(&self) -> usize {
        self.num_lines
    }

    pub fn index_bits(&self) -> usize {
        self.index_bits
    }

    pub fn tag_bits(&self) -> usize {
        self.tag_bits
    }

    /// Pure address decomposition. Addresses shorter than
    /// `address_bits` are left-padded with zeroes; wider addresses are
    /// rejected rather than silently truncated.
    pub fn decompose(&self, address: &BitString) -> Result<Decomposed, AddressError> {
        if address.len() > self.address_bits {
            return Err(AddressError::TooWide {
                address: address.clone(),
                width: address.len(),
                address_bits: self.address_bits,
            });
        }
        let address = address.zero_extend(self.address_bits);
        let (tag, index) = address.split_tag_index(self.index_bits);
        let index_value = index.value();
        Ok(Decomposed {
            address,
            index,
            index_value,
            tag,
        })
    }
}

impl fmt::Display for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-bit addresses, {} lines ({} index bits, {} tag bits)",
            self.address_bits, self.num_lines, self.index_bits, self.tag_bits
        )
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_widths() {
        for (address_bits, num_lines, index_bits) in
            [(5, 8, 3), (4, 4, 2), (3, 1, 0), (5, 32, 5), (16, 16, 4)]
        {
            let c = CacheConfig::new(address_bits, num_lines).unwrap();
            assert_eq!(c.index_bits(), index_bits);
            assert_eq!(c.index_bits() + c.tag_bits(), c.address_bits());
        }
    }

    #[test]
    fn test_invalid_configs() {
        assert_eq!(CacheConfig::new(0, 8), Err(ConfigError::ZeroAddressBits));
        assert_eq!(CacheConfig::new(5, 0), Err(ConfigError::ZeroLines));
        assert_eq!(
            CacheConfig::new(5, 6),
            Err(ConfigError::LinesNotPowerOfTwo { num_lines: 6 })
        );
        assert_eq!(
            CacheConfig::new(2, 16),
            Err(ConfigError::AddressTooNarrow {
                address_bits: 2,
                num_lines: 16,
                index_bits: 4,
            })
        );
    }

    #[test]
    fn test_decompose() {
        let c = CacheConfig::new(5, 8).unwrap();
        let d = c.decompose(&"10011".parse().unwrap()).unwrap();
        assert_eq!(d.address.as_str(), "10011");
        assert_eq!(d.index.as_str(), "011");
        assert_eq!(d.index_value, 3);
        assert_eq!(d.tag.as_str(), "10");
    }

    #[test]
    fn test_decompose_pads_short_addresses() {
        let c = CacheConfig::new(5, 8).unwrap();
        let d = c.decompose(&"11".parse().unwrap()).unwrap();
        assert_eq!(d.address.as_str(), "00011");
        assert_eq!(d.index.as_str(), "011");
        assert_eq!(d.tag.as_str(), "00");
    }

    #[test]
    fn test_decompose_rejects_wide_addresses() {
        let c = CacheConfig::new(4, 4).unwrap();
        let err = c.decompose(&"00000".parse().unwrap()).unwrap_err();
        assert_eq!(
            err,
            AddressError::TooWide {
                address: "00000".parse().unwrap(),
                width: 5,
                address_bits: 4,
            }
        );
    }

    #[test]
    fn test_decompose_without_tag_bits() {
        let c = CacheConfig::new(5, 32).unwrap();
        let d = c.decompose(&"10011".parse().unwrap()).unwrap();
        assert_eq!(d.tag.as_str(), "");
        assert_eq!(d.index.as_str(), "10011");
        assert_eq!(d.index_value, 19);
    }

    #[test]
    fn test_single_line_cache() {
        let c = CacheConfig::new(3, 1).unwrap();
        let d = c.decompose(&"101".parse().unwrap()).unwrap();
        assert_eq!(d.index.as_str(), "0");
        assert_eq!(d.index_value, 0);
        assert_eq!(d.tag.as_str(), "101");
    }
}
