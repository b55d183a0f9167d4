//! CSV output format for latency rankings

use crate::accumulator::Dimension;
use crate::report::Ranking;

const HEADER: &str =
    "dimension,rank,key,total_seconds,percent,instances,avg_seconds,min_seconds,max_seconds";

/// CSV output formatter, one row per ranked key
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<String>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains(&[',', '"', '\n', '\r'][..]) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Append every entry of a ranking
    pub fn add_dimension(&mut self, dimension: Dimension, ranking: &Ranking) {
        for (i, entry) in ranking.entries.iter().enumerate() {
            let s = &entry.stats;
            let fields = [
                dimension.name().to_string(),
                (i + 1).to_string(),
                Self::escape_field(&entry.key),
                s.total_time.to_string(),
                format!("{:.2}", entry.percent),
                s.instance_count.to_string(),
                format!("{:.2}", entry.average()),
                s.min_time.to_string(),
                s.max_time.to_string(),
            ];
            self.rows.push(fields.join(","));
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }
        output
    }
}
