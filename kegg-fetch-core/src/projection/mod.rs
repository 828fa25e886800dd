//! Projection of decoded entries onto fixed output schemas
//!
//! A [`RecordSchema`] names the output fields in order and maps each one to
//! a [`FieldSource`]. Projection never fails on data: absent sections become
//! empty text. Only a field with no mapping is an error.

pub mod errors;
pub mod schema;


use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::debug;

use crate::entry::EntryKind;
use crate::parser::{self, Equation, EquationTerm, FlatRecord, format_terms};

pub use errors::ProjectionError;
pub use schema::{FieldSource, RecordSchema, default_fields, default_mapping};

/// Separator for sections that span several lines
pub const SEQUENCE_SEPARATOR: &str = "; ";

/// One projected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Terms(Vec<EquationTerm>),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_terms(&self) -> Option<&[EquationTerm]> {
        match self {
            Self::Terms(terms) => Some(terms.as_slice()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Flatten into a single table cell
    pub fn to_cell(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Terms(terms) => format_terms(terms),
            Self::Flag(true) => "True".to_string(),
            Self::Flag(false) => "False".to_string(),
        }
    }
}

/// Fixed-schema output record, fields in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRecord {
    kind: EntryKind,
    fields: Vec<(String, FieldValue)>,
}

impl StructuredRecord {
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(name, _)| name == field).map(|(_, value)| value)
    }

    /// Text of a field, empty when missing or not text
    pub fn text(&self, field: &str) -> &str {
        self.get(field).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Identifier projected from `ENTRY`, whatever the field is called
    pub fn entry_id(&self) -> Option<&str> {
        let field = match self.kind {
            EntryKind::Reaction => "reaction_id",
            EntryKind::Compound => "compound_id",
        };
        self.get(field).and_then(FieldValue::as_text).filter(|id| !id.is_empty())
    }
}

impl Serialize for StructuredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Map a decoded entry onto `schema`.
///
/// `equation` backs the reactant, product and reversibility fields; when it
/// is `None` those fields are empty and `false`.
pub fn project(
    flat: &FlatRecord,
    equation: Option<&Equation>,
    schema: &RecordSchema,
) -> Result<StructuredRecord, ProjectionError> {
    let mut fields = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let source = schema.source(field).ok_or_else(|| ProjectionError::ConfigurationError {
            kind: schema.kind(),
            field: field.clone(),
        })?;
        fields.push((field.clone(), resolve(source, flat, equation)));
    }

    Ok(StructuredRecord { kind: schema.kind(), fields })
}

fn resolve(source: &FieldSource, flat: &FlatRecord, equation: Option<&Equation>) -> FieldValue {
    match source {
        FieldSource::Section(key) => FieldValue::Text(
            flat.get(key).map(|v| v.joined(SEQUENCE_SEPARATOR)).unwrap_or_default(),
        ),
        FieldSource::EntryId => FieldValue::Text(flat.entry_id().unwrap_or_default().to_string()),
        FieldSource::EquationText => FieldValue::Text(flat.equation_text()),
        FieldSource::Reactants => {
            FieldValue::Terms(equation.map(|e| e.reactants.clone()).unwrap_or_default())
        }
        FieldSource::Products => {
            FieldValue::Terms(equation.map(|e| e.products.clone()).unwrap_or_default())
        }
        FieldSource::Reversible => FieldValue::Flag(equation.is_some_and(|e| e.reversible)),
    }
}

/// Runs the whole text-to-record pipeline for one schema
#[derive(Debug, Clone)]
pub struct RecordProjector {
    schema: RecordSchema,
}

impl RecordProjector {
    /// Create a projector, rejecting schemas with unmapped fields up front
    pub fn new(schema: RecordSchema) -> Result<Self, ProjectionError> {
        schema.validate()?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Parse one entry and project it
    pub fn project_text(&self, text: &str) -> Result<StructuredRecord, ProjectionError> {
        let flat = parser::parse(text);
        self.project_flat(&flat)
    }

    /// Project an already decoded entry, splitting its equation if needed
    pub fn project_flat(&self, flat: &FlatRecord) -> Result<StructuredRecord, ProjectionError> {
        let equation = self
            .schema
            .needs_equation()
            .then(|| parser::split_equation(&flat.equation_text()));

        let record = project(flat, equation.as_ref(), &self.schema)?;
        debug!(kind = %self.schema.kind(), entry = ?record.entry_id(), "Projected entry");
        Ok(record)
    }

    /// Project every `///`-separated entry in a response
    pub fn project_entries(&self, text: &str) -> Result<Vec<StructuredRecord>, ProjectionError> {
        parser::split_entries(text).into_iter().map(|entry| self.project_text(entry)).collect()
    }
}
