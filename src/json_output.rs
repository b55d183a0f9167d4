//! JSON output format for latency rankings
//!
//! `--format json` renders the same rankings as the text report as a single
//! document, plus the record counters and how the input stream ended.

use crate::accumulator::{Dimension, EventCounts};
use crate::reader::StreamOutcome;
use crate::report::{RankedEntry, Ranking};
use serde::{Deserialize, Serialize};

/// One ranked key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEntry {
    pub key: String,
    pub total_seconds: u64,
    /// Share of the dimension total (0-100)
    pub percent: f64,
    pub instances: u64,
    pub avg_seconds: f64,
    pub min_seconds: u64,
    pub max_seconds: u64,
}

impl From<&RankedEntry> for JsonEntry {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            key: entry.key.clone(),
            total_seconds: entry.stats.total_time,
            percent: entry.percent,
            instances: entry.stats.instance_count,
            avg_seconds: entry.average(),
            min_seconds: entry.stats.min_time,
            max_seconds: entry.stats.max_time,
        }
    }
}

/// Ranking for one dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDimension {
    /// Dimension identifier (`address`, `provider`, `resource_type`)
    pub dimension: String,
    /// Heading used by the text report
    pub label: String,
    /// Sum over every key, ranked or not
    pub total_seconds: u64,
    /// Distinct keys in the dimension
    pub keys: usize,
    pub entries: Vec<JsonEntry>,
}

/// Record counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub records: u64,
    pub completions: u64,
    pub ignored: u64,
    /// False when a malformed record stopped the read early
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub dimensions: Vec<JsonDimension>,
    pub summary: JsonSummary,
}

impl JsonOutput {
    pub fn new(counts: EventCounts, outcome: &StreamOutcome) -> Self {
        let error = match outcome {
            StreamOutcome::Truncated { reason, .. } => Some(reason.clone()),
            StreamOutcome::Open | StreamOutcome::Exhausted => None,
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "applyprof-json-v1".to_string(),
            dimensions: Vec::new(),
            summary: JsonSummary {
                records: counts.seen,
                completions: counts.completions,
                ignored: counts.ignored,
                complete: !outcome.is_truncated(),
                error,
            },
        }
    }

    /// Append the ranking for a dimension
    pub fn add_dimension(&mut self, dimension: Dimension, ranking: &Ranking) {
        self.dimensions.push(JsonDimension {
            dimension: dimension.name().to_string(),
            label: dimension.label().to_string(),
            total_seconds: ranking.total,
            keys: ranking.key_count,
            entries: ranking.entries.iter().map(JsonEntry::from).collect(),
        });
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
