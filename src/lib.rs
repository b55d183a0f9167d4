//! applyprof - latency attribution for infrastructure apply runs
//!
//! This library reads the JSON event stream an apply run emits, accumulates
//! elapsed time per resource address, provider and resource type, and ranks
//! each dimension by average latency.

pub mod accumulator;
pub mod cli;
pub mod csv_output;
pub mod event;
pub mod json_output;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod stats;
