//! Streaming decode of JSON apply records
//!
//! [`EventStream`] pulls one record at a time from any [`Read`] source.
//! The stream ends at end-of-input or at the first record that fails to
//! decode; a failure is logged, remembered in [`StreamOutcome`], and no
//! further records are read.

use crate::event::{Envelope, Event};
use serde_json::de::IoRead;
use serde_json::StreamDeserializer;
use std::io::Read;
use thiserror::Error;

/// Errors that stop the record stream
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("malformed record after {records_read} records: {source}")]
    Decode {
        records_read: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} payload after {records_read} records: {source}")]
    Payload {
        kind: String,
        records_read: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error after {records_read} records: {source}")]
    Io {
        records_read: u64,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    fn from_stream(records_read: u64, source: serde_json::Error) -> Self {
        if source.is_io() {
            ReadError::Io {
                records_read,
                source: source.into(),
            }
        } else {
            ReadError::Decode {
                records_read,
                source,
            }
        }
    }

    /// Number of records decoded successfully before the failure
    pub fn records_read(&self) -> u64 {
        match self {
            ReadError::Decode { records_read, .. }
            | ReadError::Payload { records_read, .. }
            | ReadError::Io { records_read, .. } => *records_read,
        }
    }
}

/// How a stream finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Still reading
    Open,
    /// Clean end-of-input
    Exhausted,
    /// Stopped early at a bad record
    Truncated { records_read: u64, reason: String },
}

impl StreamOutcome {
    pub fn is_truncated(&self) -> bool {
        matches!(self, StreamOutcome::Truncated { .. })
    }
}

/// Lazy, finite, non-restartable sequence of decoded events
pub struct EventStream<R: Read> {
    records: StreamDeserializer<'static, IoRead<R>, Envelope>,
    records_read: u64,
    outcome: StreamOutcome,
}

impl<R: Read> EventStream<R> {
    /// Wrap a byte source. Callers reading from files or stdin should pass a
    /// buffered reader; the decoder reads byte by byte.
    pub fn new(reader: R) -> Self {
        Self {
            records: serde_json::Deserializer::from_reader(reader).into_iter(),
            records_read: 0,
            outcome: StreamOutcome::Open,
        }
    }

    /// Decode the next record.
    ///
    /// Returns `Ok(None)` at end-of-input. After an error or end-of-input
    /// every further call returns `Ok(None)` without touching the source.
    pub fn next_event(&mut self) -> Result<Option<Event>, ReadError> {
        if self.outcome != StreamOutcome::Open {
            return Ok(None);
        }

        let envelope = match self.records.next() {
            None => {
                self.outcome = StreamOutcome::Exhausted;
                return Ok(None);
            }
            Some(Err(e)) => return Err(self.fail(ReadError::from_stream(self.records_read, e))),
            Some(Ok(envelope)) => envelope,
        };

        let event = envelope.into_event().map_err(|source| ReadError::Payload {
            kind: crate::event::APPLY_COMPLETE.to_string(),
            records_read: self.records_read,
            source,
        });
        match event {
            Ok(event) => {
                self.records_read += 1;
                tracing::trace!(kind = event.kind(), "decoded record {}", self.records_read);
                Ok(Some(event))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: ReadError) -> ReadError {
        self.outcome = StreamOutcome::Truncated {
            records_read: self.records_read,
            reason: err.to_string(),
        };
        err
    }

    /// Records decoded so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// How the stream ended (or [`StreamOutcome::Open`] if it hasn't)
    pub fn outcome(&self) -> &StreamOutcome {
        &self.outcome
    }
}

/// Iterating logs the terminating error instead of yielding it.
impl<R: Read> Iterator for EventStream<R> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        match self.next_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("stopped reading input: {}", e);
                None
            }
        }
    }
}
