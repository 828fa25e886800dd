//! Parse a local flat file

use anyhow::{Context, Result, bail};
use kegg_fetch_core::parser::{parse, split_entries};
use kegg_fetch_core::{EntryKind, KeggConfig, RecordProjector, RecordWriter};
use std::io::Write;
use tracing::{debug, info};

use crate::cli::app::ParseArgs;

/// Execute the parse command
pub async fn execute(args: ParseArgs, config: &KeggConfig) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let entries = split_entries(&text);
    debug!("{} entries in {}", entries.len(), args.path.display());

    if args.raw {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for entry in &entries {
            serde_json::to_writer_pretty(&mut out, &parse(entry))?;
            writeln!(out)?;
        }
        return Ok(());
    }

    let kind = match args.kind {
        Some(kind) => kind.into(),
        None => infer_kind(&entries)?,
    };

    let projector = RecordProjector::new(config.schema(kind))?;
    let records = projector.project_entries(&text)?;
    info!("Projected {} {}(s) from {}", records.len(), kind, args.path.display());

    let writer = match args.format {
        Some(format) => RecordWriter::new(format.into(), config.output.index),
        None => RecordWriter::from_settings(&config.output),
    };

    match &args.output {
        Some(path) => {
            writer.write_to_path(&records, path)?;
            println!("Data saved to {}", path.display());
        }
        None => writer.write(&records, std::io::stdout().lock())?,
    }

    Ok(())
}

/// Guess the entry kind from the identifier of the first entry
fn infer_kind(entries: &[&str]) -> Result<EntryKind> {
    let first = entries.first().map(|entry| parse(entry));
    let id = first.as_ref().and_then(|record| record.entry_id());

    match id.and_then(EntryKind::from_id) {
        Some(kind) => Ok(kind),
        None => bail!(
            "Cannot infer the entry kind from ENTRY {:?}; pass --kind",
            id.unwrap_or("")
        ),
    }
}
