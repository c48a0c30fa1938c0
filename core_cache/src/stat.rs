use std::fmt;

/// Hit/miss counters. Monotone between resets; always consistent with
/// the engine's access history.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessStats {
    hits: usize,
    misses: usize,
}

impl AccessStats {
    pub fn on_hit(&mut self) {
        self.hits += 1;
    }

    pub fn on_miss(&mut self) {
        self.misses += 1;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn total(&self) -> usize {
        self.hits + self.misses
    }

    /// `None` before the first access; a ratio is meaningless there.
    pub fn hit_rate(&self) -> Option<f64> {
        if self.total() == 0 {
            None
        } else {
            Some(self.hits as f64 / self.total() as f64)
        }
    }
}

impl fmt::Display for AccessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HIT:  {}", self.hits)?;
        writeln!(f, "MISS: {}", self.misses)?;
        writeln!(f, "total accesses: {}", self.total())?;
        match self.hit_rate() {
            Some(rate) => write!(f, "hit rate: {:.2}%", rate * 100.0),
            None => write!(f, "hit rate: N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let mut s = AccessStats::default();
        assert_eq!(s.hit_rate(), None);
        s.on_hit();
        s.on_miss();
        s.on_miss();
        assert_eq!(s.total(), 3);
        let rate = s.hit_rate().unwrap();
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_without_accesses() {
        let s = AccessStats::default();
        assert!(s.to_string().ends_with("hit rate: N/A"));
    }
}
