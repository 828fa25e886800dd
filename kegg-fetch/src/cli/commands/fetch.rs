//! Fetch command for reactions and compounds

use anyhow::{Result, bail};
use kegg_fetch_core::{EntryKind, KeggClient, KeggConfig, RecordProjector, RecordWriter};
use tracing::{error, info};

use crate::cli::app::FetchArgs;
use crate::cli::display;

/// Execute the fetch command for one kind
pub async fn execute(kind: EntryKind, args: FetchArgs, config: &KeggConfig) -> Result<()> {
    let projector = RecordProjector::new(config.schema(kind))?;
    let client = KeggClient::new(&config.kegg)?;
    let writer = match args.format {
        Some(format) => RecordWriter::new(format.into(), config.output.index),
        None => RecordWriter::from_settings(&config.output),
    };

    let ids = if args.ids.is_empty() {
        vec![config.default_id(kind).to_string()]
    } else {
        args.ids
    };
    let save_each = !args.no_save && args.output.is_none();

    let mut records = Vec::new();
    let mut failures = Vec::new();

    // One request at a time; a failed id does not stop the rest
    for id in &ids {
        let record = match client.fetch_record(id, &projector).await {
            Ok(record) => record,
            Err(e) => {
                report_failure(kind, id, &e);
                failures.push(id.clone());
                continue;
            }
        };

        display::print_record(&record);

        if save_each {
            let file_id = record
                .entry_id()
                .map(str::to_string)
                .unwrap_or_else(|| id.replace(':', "_"));
            let path = writer.default_path(&config.output.data_dir, kind, &file_id);
            if let Err(e) = writer.write_to_path(std::slice::from_ref(&record), &path) {
                report_failure(kind, id, &e);
                failures.push(id.clone());
                continue;
            }
            println!("\nData saved to {}", path.display());
        }

        records.push(record);
    }

    if let Some(output) = args.output.as_deref().filter(|_| !args.no_save && !records.is_empty()) {
        writer.write_to_path(&records, output)?;
        println!("\nData saved to {}", output.display());
    }

    info!("Fetched {} of {} {}(s)", records.len(), ids.len(), kind);

    if !failures.is_empty() {
        bail!("Failed to fetch {} of {} {}(s): {}", failures.len(), ids.len(), kind, failures.join(", "));
    }

    Ok(())
}

fn report_failure(kind: EntryKind, id: &str, e: &anyhow::Error) {
    error!("Error processing {} {}: {:#}", kind, id, e);
    println!("Error processing {} {}: {:#}", kind, id, e);
}
