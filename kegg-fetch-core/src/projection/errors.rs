//! Error types for record projection

use thiserror::Error;

use crate::entry::EntryKind;

/// Projection fails only when the schema itself is wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// Schema requests a field with no section mapping
    #[error("Configuration error: no section mapping for {kind} field '{field}'")]
    ConfigurationError { kind: EntryKind, field: String },
}
