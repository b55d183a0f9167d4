//! Elapsed-time statistics per grouping key

use std::collections::HashMap;

/// Running totals for one key within one dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    /// Sum of every contribution (seconds)
    pub total_time: u64,
    /// Smallest single contribution
    pub min_time: u64,
    /// Largest single contribution
    pub max_time: u64,
    /// Number of contributions
    pub instance_count: u64,
}

impl LatencyStats {
    /// Stats holding a single sample
    pub fn from_sample(elapsed_seconds: u64) -> Self {
        Self {
            total_time: elapsed_seconds,
            min_time: elapsed_seconds,
            max_time: elapsed_seconds,
            instance_count: 1,
        }
    }

    /// Fold one contribution in.
    ///
    /// The first contribution sets the minimum outright, so a genuine zero
    /// is kept rather than mistaken for an unset field.
    pub fn record(&mut self, elapsed_seconds: u64) {
        self.total_time = self.total_time.saturating_add(elapsed_seconds);
        self.instance_count += 1;
        if self.instance_count == 1 || elapsed_seconds < self.min_time {
            self.min_time = elapsed_seconds;
        }
        if elapsed_seconds > self.max_time {
            self.max_time = elapsed_seconds;
        }
    }

    /// Mean contribution, `None` when nothing has been recorded
    pub fn average(&self) -> Option<f64> {
        if self.instance_count == 0 {
            return None;
        }
        Some(self.total_time as f64 / self.instance_count as f64)
    }
}

/// Mapping from key to [`LatencyStats`] for one dimension
#[derive(Debug, Clone, Default)]
pub struct DimensionStats {
    stats: HashMap<String, LatencyStats>,
}

impl DimensionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contribution under `key`, creating its entry on first use
    pub fn record(&mut self, key: &str, elapsed_seconds: u64) {
        match self.stats.get_mut(key) {
            Some(entry) => entry.record(elapsed_seconds),
            None => {
                self.stats
                    .insert(key.to_string(), LatencyStats::from_sample(elapsed_seconds));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&LatencyStats> {
        self.stats.get(key)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Sum of `total_time` across every key
    pub fn total_time(&self) -> u64 {
        self.stats
            .values()
            .fold(0u64, |acc, s| acc.saturating_add(s.total_time))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LatencyStats)> {
        self.stats.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build a mapping from `(key, elapsed_seconds)` samples
impl<K: AsRef<str>> FromIterator<(K, u64)> for DimensionStats {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut stats = Self::new();
        for (key, elapsed_seconds) in iter {
            stats.record(key.as_ref(), elapsed_seconds);
        }
        stats
    }
}
