//! Offline replay: match recorded OCR events against a roster file.
//!
//! ```text
//! rostermatch <roster.json> <events.jsonl> [pipeline.yaml]
//! ```
//!
//! `events.jsonl` holds one OCR payload per line. Each decision is printed
//! as a JSON line; malformed lines print `null`.

use std::fs;

use anyhow::Context;
use rostermatch::{replay, PipelineConfig, RosterSnapshot};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(roster_path), Some(events_path)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: rostermatch <roster.json> <events.jsonl> [pipeline.yaml]");
    };
    let config = match args.next() {
        Some(path) => PipelineConfig::from_file(&path)
            .with_context(|| format!("loading pipeline config {path}"))?,
        None => PipelineConfig::default(),
    };

    let roster_raw =
        fs::read_to_string(&roster_path).with_context(|| format!("reading {roster_path}"))?;
    let snapshot = RosterSnapshot::from_json(&roster_raw)
        .with_context(|| format!("parsing roster {roster_path}"))?;
    let events =
        fs::read_to_string(&events_path).with_context(|| format!("reading {events_path}"))?;

    let lines = events.lines().filter(|line| !line.trim().is_empty());
    for step in replay(&snapshot, &config, lines)? {
        println!("{}", serde_json::to_string(&step.decision)?);
    }

    Ok(())
}
