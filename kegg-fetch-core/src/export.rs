//! Tabular export of projected records

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::OutputSettings;
use crate::entry::EntryKind;
use crate::projection::StructuredRecord;

/// Supported output file formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Writes batches of records that share one schema
#[derive(Debug, Clone, Copy)]
pub struct RecordWriter {
    format: OutputFormat,
    index: bool,
}

impl RecordWriter {
    pub fn new(format: OutputFormat, index: bool) -> Self {
        Self { format, index }
    }

    pub fn from_settings(settings: &OutputSettings) -> Self {
        Self::new(settings.file_format, settings.index)
    }

    /// `{dir}/kegg_{kind}_{id}.{ext}`
    pub fn default_path(&self, dir: &Path, kind: EntryKind, id: &str) -> PathBuf {
        dir.join(format!("kegg_{}_{}.{}", kind, id, self.format.extension()))
    }

    /// Write records to any sink
    pub fn write<W: Write>(&self, records: &[StructuredRecord], writer: W) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };

        let header: Vec<&str> = first.field_names().collect();
        if let Some(other) = records.iter().find(|r| !r.field_names().eq(header.iter().copied())) {
            bail!(
                "Cannot write records with different fields together ({:?} vs {:?})",
                header,
                other.field_names().collect::<Vec<_>>()
            );
        }

        match self.format {
            OutputFormat::Csv => self.write_csv(records, &header, writer),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(writer, records).context("Failed to write JSON")
            }
        }
    }

    fn write_csv<W: Write>(&self, records: &[StructuredRecord], header: &[&str], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let index_column = self.index.then_some("");
        csv_writer
            .write_record(index_column.into_iter().chain(header.iter().copied()))
            .context("Failed to write CSV header")?;

        for (row, record) in records.iter().enumerate() {
            let index_cell = self.index.then(|| row.to_string());
            let cells = index_cell.into_iter().chain(record.iter().map(|(_, value)| value.to_cell()));
            csv_writer.write_record(cells).context("Failed to write CSV row")?;
        }

        csv_writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }

    /// Write records to a file, creating parent directories
    pub fn write_to_path(&self, records: &[StructuredRecord], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut writer = BufWriter::new(file);
        self.write(records, &mut writer)?;
        writer.flush().with_context(|| format!("Failed to write {:?}", path))?;

        info!("Saved {} record(s) to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{RecordProjector, RecordSchema};
    use tempfile::TempDir;

    const REACTION: &str = "\
ENTRY       R00200                      Reaction
NAME        ATP:pyruvate 2-O-phosphotransferase
EQUATION    C00002 + C00022 <=> C00008 + C00074
PATHWAY     rn00010  Glycolysis / Gluconeogenesis
            rn00620  Pyruvate metabolism
";

    fn reaction_records(fields: &[&str]) -> Vec<StructuredRecord> {
        let schema = RecordSchema::new(
            EntryKind::Reaction,
            fields.iter().map(|f| f.to_string()).collect(),
        );
        vec![RecordProjector::new(schema).unwrap().project_text(REACTION).unwrap()]
    }

    fn render(writer: RecordWriter, records: &[StructuredRecord]) -> String {
        let mut out = Vec::new();
        writer.write(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_output() {
        let records = reaction_records(&["reaction_id", "name", "reactants", "is_reversible", "pathways"]);
        let csv = render(RecordWriter::new(OutputFormat::Csv, false), &records);

        assert_eq!(
            csv,
            "reaction_id,name,reactants,is_reversible,pathways\n\
             R00200,ATP:pyruvate 2-O-phosphotransferase,C00002 + C00022,True,\
             rn00010  Glycolysis / Gluconeogenesis; rn00620  Pyruvate metabolism\n"
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let schema = RecordSchema::new(EntryKind::Compound, vec!["name".to_string()]);
        let record = RecordProjector::new(schema)
            .unwrap()
            .project_text("NAME        2,3-Bisphospho-D-glycerate\n")
            .unwrap();

        let csv = render(RecordWriter::new(OutputFormat::Csv, false), &[record]);
        assert_eq!(csv, "name\n\"2,3-Bisphospho-D-glycerate\"\n");
    }

    #[test]
    fn test_csv_index_column() {
        let records = reaction_records(&["reaction_id"]);
        let csv = render(RecordWriter::new(OutputFormat::Csv, true), &records);
        assert_eq!(csv, ",reaction_id\n0,R00200\n");
    }

    #[test]
    fn test_json_output() {
        let records = reaction_records(&["reaction_id", "products"]);
        let json = render(RecordWriter::new(OutputFormat::Json, false), &records);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "reaction_id": "R00200",
                "products": [
                    {"coefficient": 1, "identifier": "C00008"},
                    {"coefficient": 1, "identifier": "C00074"}
                ]
            }])
        );
    }

    #[test]
    fn test_mixed_schemas_rejected() {
        let mut records = reaction_records(&["reaction_id"]);
        records.extend(reaction_records(&["name"]));

        let mut out = Vec::new();
        assert!(RecordWriter::new(OutputFormat::Csv, false).write(&records, &mut out).is_err());
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        assert_eq!(render(RecordWriter::new(OutputFormat::Csv, false), &[]), "");
    }

    #[test]
    fn test_write_to_path() {
        let dir = TempDir::new().unwrap();
        let writer = RecordWriter::new(OutputFormat::Csv, false);
        let path = writer.default_path(&dir.path().join("csv"), EntryKind::Reaction, "R00200");
        assert!(path.ends_with("csv/kegg_reaction_R00200.csv"));

        writer.write_to_path(&reaction_records(&["reaction_id"]), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "reaction_id\nR00200\n");
    }
}
