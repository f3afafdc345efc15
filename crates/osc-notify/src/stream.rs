//! Line-oriented driver: one `<metadata>;<payload>` invocation per line.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use osc_notify_core::{Outcome, Parser, ParserConfig, ScratchBuffer};

/// How emitted notifications are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON command per line
    Json,
    /// `title` or `title: body`
    Text,
}

#[derive(Debug, Clone, Copy)]
pub struct StreamOptions {
    pub format: OutputFormat,
    /// Reinitialize the parser after a failure instead of stopping
    pub reset_on_error: bool,
}

/// Counts reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub invocations: usize,
    pub emitted: usize,
    pub pending: usize,
    pub dropped: usize,
    pub failed: usize,
}

/// Feed every line of `input` through a fresh parser, writing emitted
/// notifications to `output`.
pub fn process<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &ParserConfig,
    options: StreamOptions,
) -> anyhow::Result<Summary> {
    let mut parser = Parser::new(config).context("Invalid parser configuration")?;
    let mut sink = ScratchBuffer::new(config.sink_capacity);
    let mut line = Vec::new();
    let mut summary = Summary::default();

    loop {
        line.clear();
        let n = input
            .read_until(b'\n', &mut line)
            .context("Failed to read invocation")?;
        if n == 0 {
            break;
        }
        let invocation = strip_line_ending(&line);
        summary.invocations += 1;

        sink.clear();
        sink.extend_from_slice(invocation);
        // A missing sentinel is reported by the parser itself.
        let _ = sink.terminate();

        let failure = match parser.handle_sink(&sink) {
            Outcome::Emitted(notification) => {
                summary.emitted += 1;
                match options.format {
                    OutputFormat::Json => {
                        let json = serde_json::to_string(&notification.to_command())?;
                        writeln!(output, "{json}")?;
                    }
                    OutputFormat::Text if notification.body().is_empty() => {
                        writeln!(output, "{}", notification.title())?;
                    }
                    OutputFormat::Text => {
                        writeln!(output, "{}: {}", notification.title(), notification.body())?;
                    }
                }
                None
            }
            Outcome::Pending => {
                summary.pending += 1;
                None
            }
            Outcome::Dropped(_) => {
                summary.dropped += 1;
                None
            }
            Outcome::Failed(err) => Some(err),
        };

        if let Some(err) = failure {
            summary.failed += 1;
            tracing::error!(
                line = summary.invocations,
                error_kind = %err.kind(),
                "{err}"
            );
            if !options.reset_on_error {
                bail!("invocation {} failed: {err}", summary.invocations);
            }
            parser.reset();
        }
    }

    output.flush()?;
    Ok(summary)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
