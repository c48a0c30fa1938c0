//! Exercise files: a cache configuration plus the address sequence to
//! replay, stored as JSON.

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bits::{BitParseError, BitString},
    cache::DirectMappedCache,
    config::{AddressError, CacheConfig, ConfigError},
};

#[derive(Error, Debug)]
pub enum ExerciseError {
    #[error("failed to read exercise: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed exercise file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("address #{pos}: {source}")]
    Address { pos: usize, source: BitParseError },
    #[error(transparent)]
    Access(#[from] AddressError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub address_bits: usize,
    pub num_lines: usize,
    pub sequence: Vec<String>,
}

impl Exercise {
    pub fn from_reader(r: impl Read) -> Result<Self, ExerciseError> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ExerciseError> {
        Ok(serde_json::from_str(s)?)
    }

    /// The 5-bit / 8-line exercise this tool was written to check.
    pub fn builtin() -> Self {
        Self {
            address_bits: 5,
            num_lines: 8,
            sequence: [
                "10011", "11011", "10011", "01111", "10011", "01111", "01111", "10111", "00011",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Builds the engine and replays the whole sequence, returning the
    /// populated engine for reporting.
    pub fn solve(&self) -> Result<DirectMappedCache, ExerciseError> {
        let config = CacheConfig::new(self.address_bits, self.num_lines)?;
        let mut cache = DirectMappedCache::new(config);
        for (pos, raw) in self.sequence.iter().enumerate() {
            let address = BitString::parse(raw).map_err(|source| ExerciseError::Address {
                pos: pos + 1,
                source,
            })?;
            cache.access(&address)?;
        }
        Ok(cache)
    }
}
