//! Reader -> accumulator -> reporter
//!
//! One pass over the input, then one ranking per dimension in
//! [`Dimension::ALL`] order.

use crate::accumulator::{Accumulator, Dimension};
use crate::cli::OutputFormat;
use crate::csv_output::CsvOutput;
use crate::json_output::JsonOutput;
use crate::reader::{EventStream, StreamOutcome};
use crate::report::{rank, report};
use std::io::Read;

/// Result of consuming an input stream
#[derive(Debug)]
pub struct Analysis {
    pub accumulator: Accumulator,
    pub outcome: StreamOutcome,
}

/// Consume `reader` to end-of-input or the first malformed record.
///
/// A malformed record is logged and ends the read; whatever was folded in
/// before it is kept.
pub fn analyze<R: Read>(reader: R) -> Analysis {
    let mut stream = EventStream::new(reader);
    let mut accumulator = Accumulator::new();
    accumulator.extend(&mut stream);

    let counts = accumulator.counts();
    tracing::debug!(
        records = counts.seen,
        completions = counts.completions,
        ignored = counts.ignored,
        "finished reading input"
    );

    Analysis {
        accumulator,
        outcome: stream.outcome().clone(),
    }
}

impl Analysis {
    /// Text report: three blocks, one per dimension
    pub fn to_text(&self, top_n: usize) -> String {
        Dimension::ALL
            .iter()
            .map(|&d| report(d, top_n, self.accumulator.dimension(d)))
            .collect()
    }

    pub fn to_json(&self, top_n: usize) -> serde_json::Result<String> {
        let mut output = JsonOutput::new(self.accumulator.counts(), &self.outcome);
        for d in Dimension::ALL {
            output.add_dimension(d, &rank(self.accumulator.dimension(d), top_n));
        }
        output.to_json()
    }

    pub fn to_csv(&self, top_n: usize) -> String {
        let mut output = CsvOutput::new();
        for d in Dimension::ALL {
            output.add_dimension(d, &rank(self.accumulator.dimension(d), top_n));
        }
        output.to_csv()
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat, top_n: usize) -> serde_json::Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_text(top_n),
            OutputFormat::Json => {
                let mut json = self.to_json(top_n)?;
                json.push('\n');
                json
            }
            OutputFormat::Csv => self.to_csv(top_n),
        })
    }
}
