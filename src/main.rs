use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use live_highlight::cli::CliArgs;
use live_highlight::config::HighlightConfig;
use live_highlight::replay::{self, Script};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    live_highlight::tracing::init(args.log);

    let script = Script::load(&args.script)?;
    let highlight = if args.no_highlight {
        false
    } else {
        script
            .highlight
            .unwrap_or_else(|| HighlightConfig::load().highlight)
    };

    let report = replay::run(&script, highlight)?;
    if report.document_refs != 0 {
        tracing::warn!(
            "Document still holds {} reference(s) after the session ended",
            report.document_refs
        );
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for command in report.commands() {
        let line = serde_json::to_string(command).context("Failed to encode command")?;
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
