//! Top-N ranking and text report
//!
//! Keys are ranked by average elapsed time, highest first. Equal averages
//! fall back to the key string in descending order, so the ranking is a
//! total order and never depends on hash-map iteration order.
//!
//! Percentages are taken against the total of *all* keys in the dimension,
//! not only the ones displayed.

use crate::accumulator::Dimension;
use crate::stats::{DimensionStats, LatencyStats};
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Depth used for every block when none is given
pub const DEFAULT_TOP_N: usize = 10;

/// One ranked key
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub key: String,
    pub stats: LatencyStats,
    /// Share of the dimension total, 0.0 when the total is zero
    pub percent: f64,
}

impl RankedEntry {
    pub fn average(&self) -> f64 {
        self.stats.average().unwrap_or(0.0)
    }
}

/// Ranking of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Sum of `total_time` across every key, ranked or not
    pub total: u64,
    /// Number of distinct keys in the dimension
    pub key_count: usize,
    /// At most `top_n` entries, best first
    pub entries: Vec<RankedEntry>,
}

/// Descending average, then descending key
fn compare(a: (&str, &LatencyStats), b: (&str, &LatencyStats)) -> Ordering {
    let avg_a = a.1.average().unwrap_or(0.0);
    let avg_b = b.1.average().unwrap_or(0.0);
    avg_b.total_cmp(&avg_a).then_with(|| b.0.cmp(a.0))
}

fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 100.0) / total as f64
}

/// Rank a dimension and keep the first `top_n` keys.
///
/// Asking for more keys than exist returns all of them.
pub fn rank(stats: &DimensionStats, top_n: usize) -> Ranking {
    let mut sorted: Vec<_> = stats.iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));

    let total = stats.total_time();
    let entries = sorted
        .into_iter()
        .take(top_n)
        .map(|(key, s)| RankedEntry {
            key: key.to_string(),
            stats: *s,
            percent: percent_of(s.total_time, total),
        })
        .collect();

    Ranking {
        total,
        key_count: stats.len(),
        entries,
    }
}

/// Render one block.
///
/// Single-instance keys show only total and share; repeated keys also show
/// the instance count, average and `[min, max]` range.
pub fn render_text(label: &str, ranking: &Ranking) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Top {} by {} (total: {} sec):",
        ranking.entries.len(),
        label,
        ranking.total
    );

    for entry in &ranking.entries {
        let s = &entry.stats;
        if s.instance_count == 1 {
            let _ = writeln!(
                out,
                "  {}: {} sec ({:.2}%)",
                entry.key, s.total_time, entry.percent
            );
        } else {
            let _ = writeln!(
                out,
                "  {}: total {} sec ({:.2}%) over {} instances, avg: {:.2} sec [{}, {}]",
                entry.key,
                s.total_time,
                entry.percent,
                s.instance_count,
                entry.average(),
                s.min_time,
                s.max_time
            );
        }
    }

    out
}

/// Rank and render the block for one dimension
pub fn report(dimension: Dimension, top_n: usize, stats: &DimensionStats) -> String {
    render_text(dimension.label(), &rank(stats, top_n))
}
