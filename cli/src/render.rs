//! Text rendering of engine output: the access table, the cache-state
//! table, the full analysis block.

use std::fmt;

use core_cache::cache::DirectMappedCache;
use terminal_size::terminal_size;

const MAX_RULE_WIDTH: usize = 70;

fn rule_width() -> usize {
    terminal_size()
        .map(|(w, _)| (w.0 as usize).min(MAX_RULE_WIDTH))
        .unwrap_or(MAX_RULE_WIDTH)
}

pub(crate) fn detailed_analysis(cache: &DirectMappedCache) -> DetailedAnalysis<'_> {
    DetailedAnalysis { cache }
}

pub(crate) fn history_table(cache: &DirectMappedCache) -> HistoryTable<'_> {
    HistoryTable { cache }
}

pub(crate) fn state_table(cache: &DirectMappedCache) -> StateTable<'_> {
    StateTable { cache }
}

pub(crate) struct DetailedAnalysis<'a> {
    cache: &'a DirectMappedCache,
}

pub(crate) struct HistoryTable<'a> {
    cache: &'a DirectMappedCache,
}

pub(crate) struct StateTable<'a> {
    cache: &'a DirectMappedCache,
}

impl fmt::Display for DetailedAnalysis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = rule_width();
        writeln!(f, "{:=^w$}", " direct-mapped cache analysis ")?;
        writeln!(f, "{}", self.cache.config())?;
        writeln!(f)?;
        write!(f, "{}", history_table(self.cache))?;
        writeln!(f)?;
        write!(f, "{}", state_table(self.cache))?;
        writeln!(f)?;
        writeln!(f, "{:=^w$}", " statistics ")?;
        write!(f, "{}", self.cache.stats())
    }
}

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.cache.config();
        let aw = config.address_bits().max("address".len());
        let iw = config.index_bits().max("index".len());
        let tw = config.tag_bits().max("tag".len());
        writeln!(f, "access sequence:")?;
        writeln!(
            f,
            "{:>7} | {:^aw$} | {:^iw$} | {:^tw$} | {:^6} | action",
            "request", "address", "index", "tag", "result"
        )?;
        writeln!(f, "{:-<w$}", "", w = rule_width())?;
        for (i, rec) in self.cache.history().iter().enumerate() {
            writeln!(
                f,
                "{:>7} | {:^aw$} | {:^iw$} | {:^tw$} | {:^6} | {}",
                i + 1,
                rec.address.as_str(),
                rec.index.as_str(),
                rec.tag.as_str(),
                rec.outcome.to_string(),
                rec.action
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for StateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lw = self.cache.config().index_bits().max("line".len());
        writeln!(f, "cache state:")?;
        writeln!(f, "{:^lw$} | stored tag", "line")?;
        writeln!(f, "{:-<w$}", "", w = lw + 13)?;
        for line in self.cache.snapshot() {
            match &line.tag {
                Some(tag) => writeln!(f, "{:^lw$} | {}", line.index.as_str(), tag)?,
                None => writeln!(f, "{:^lw$} | invalid", line.index.as_str())?,
            }
        }
        Ok(())
    }
}
