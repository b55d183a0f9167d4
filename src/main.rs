use anyhow::{Context, Result};
use applyprof::{cli::Cli, pipeline};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

/// Build the log filter.
///
/// `RUST_LOG` wins when set; otherwise only warnings (such as a malformed
/// input record) are shown. `--debug` turns on everything.
fn env_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    if debug {
        filter.add_directive(tracing::Level::TRACE.into())
    } else {
        filter
    }
}

/// Initialize tracing subscriber on stderr
fn init_tracing(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let analysis = match args.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            pipeline::analyze(BufReader::new(file))
        }
        None => pipeline::analyze(io::stdin().lock()),
    };

    let rendered = analysis
        .render(args.format, args.top)
        .context("Failed to serialize report")?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
