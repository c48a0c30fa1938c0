//! The direct-mapped cache engine: tag store, access history, hit/miss
//! bookkeeping.

use std::fmt;

use crate::{
    bits::BitString,
    config::{AddressError, CacheConfig},
    stat::AccessStats,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => write!(f, "HIT"),
            Outcome::Miss => write!(f, "MISS"),
        }
    }
}

/// What an access did to the line it mapped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// hit, line left untouched
    None,
    /// miss, `tag` is now resident; `evicted` is the tag it displaced
    Stored {
        tag: BitString,
        evicted: Option<BitString>,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => write!(f, "no modification"),
            Action::Stored { tag, evicted: None } => write!(f, "stored tag {tag}"),
            Action::Stored {
                tag,
                evicted: Some(old),
            } => write!(f, "replaced tag {old} with {tag}"),
        }
    }
}

/// One simulated access, never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    /// the address as submitted, after left-padding
    pub address: BitString,
    pub index: BitString,
    pub index_value: usize,
    pub tag: BitString,
    pub outcome: Outcome,
    pub action: Action,
}

/// One row of a cache snapshot: the line label and its resident tag,
/// `None` while the line is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub index: BitString,
    pub tag: Option<BitString>,
}

/// Direct-mapped: each index selects exactly one line, so a miss
/// always replaces whatever that line holds.
pub struct DirectMappedCache {
    config: CacheConfig,
    lines: Vec<Option<BitString>>,
    history: Vec<AccessRecord>,
    stats: AccessStats,
}

impl DirectMappedCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            lines: vec![None; config.num_lines()],
            config,
            history: Vec::new(),
            stats: AccessStats::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Simulates one access. The address is decomposed before any
    /// state is touched, so a rejected address leaves lines, history
    /// and counters exactly as they were.
    pub fn access(&mut self, address: &BitString) -> Result<Outcome, AddressError> {
        let d = self.config.decompose(address)?;
        let line = &mut self.lines[d.index_value];
        let (outcome, action) = match line {
            Some(resident) if *resident == d.tag => {
                self.stats.on_hit();
                (Outcome::Hit, Action::None)
            }
            _ => {
                let evicted = line.replace(d.tag.clone());
                self.stats.on_miss();
                (
                    Outcome::Miss,
                    Action::Stored {
                        tag: d.tag.clone(),
                        evicted,
                    },
                )
            }
        };
        log::trace!("{}: line {} {outcome} ({action})", d.address, d.index);
        self.history.push(AccessRecord {
            address: d.address,
            index: d.index,
            index_value: d.index_value,
            tag: d.tag,
            outcome,
            action,
        });
        Ok(outcome)
    }

    /// Replays a sequence in the given order, stopping at the first
    /// rejected address. Order is significant: every outcome depends
    /// on the earlier accesses to the same line.
    pub fn run_sequence<'a, I>(&mut self, addresses: I) -> Result<Vec<Outcome>, AddressError>
    where
        I: IntoIterator<Item = &'a BitString>,
    {
        addresses.into_iter().map(|a| self.access(a)).collect()
    }

    /// Per-line view in ascending index order, with zero-padded line
    /// labels. Read-only.
    pub fn snapshot(&self) -> Vec<LineView> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, tag)| LineView {
                index: BitString::from_value(i, self.config.index_bits()),
                tag: tag.clone(),
            })
            .collect()
    }

    pub fn history(&self) -> &[AccessRecord] {
        &self.history
    }

    pub fn stats(&self) -> &AccessStats {
        &self.stats
    }

    /// Back to the just-constructed state; the configuration is kept.
    pub fn reset(&mut self) {
        self.lines.iter_mut().for_each(|l| *l = None);
        self.history.clear();
        self.stats = AccessStats::default();
    }
}
