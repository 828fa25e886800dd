//! Core functionality for kegg-fetch
//!
//! This crate decodes KEGG flat-file entries, splits reaction equations into
//! stoichiometric terms and projects entries onto configurable tabular
//! schemas. The HTTP client and the CSV/JSON writer are thin collaborators
//! around that pipeline.

pub mod client;
pub mod config;
pub mod entry;
pub mod export;
pub mod parser;
pub mod projection;

pub use client::{FetchError, KeggClient};
pub use config::{ConfigError, KeggConfig};
pub use entry::{EntryError, EntryKind};
pub use export::{OutputFormat, RecordWriter};
pub use parser::{Equation, EquationTerm, FlatRecord, SectionValue, parse, split_equation};
pub use projection::{
    FieldSource, FieldValue, ProjectionError, RecordProjector, RecordSchema, StructuredRecord,
    project,
};
