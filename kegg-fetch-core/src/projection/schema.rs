//! Output schemas and the field-to-section mapping table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entry::EntryKind;
use crate::projection::errors::ProjectionError;

/// Where an output field takes its value from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    /// A flat-file section; sequences are joined with `"; "`
    Section(String),

    /// First token of the `ENTRY` section
    EntryId,

    /// Raw equation text, continuation lines joined with a space
    EquationText,

    /// Decoded left-hand terms
    Reactants,

    /// Decoded right-hand terms
    Products,

    /// Reversibility flag of the decoded equation
    Reversible,
}

impl FieldSource {
    pub fn section(key: &str) -> Self {
        Self::Section(key.to_string())
    }

    /// True for sources that need a decoded equation
    pub fn needs_equation(&self) -> bool {
        matches!(self, Self::Reactants | Self::Products | Self::Reversible)
    }
}

/// Fields written for a kind when configuration names none
pub fn default_fields(kind: EntryKind) -> Vec<String> {
    let fields: &[&str] = match kind {
        EntryKind::Reaction => &[
            "reaction_id",
            "name",
            "definition",
            "equation",
            "reactants",
            "products",
            "is_reversible",
            "enzyme",
            "pathways",
            "modules",
            "orthology",
            "dblinks",
        ],
        EntryKind::Compound => &[
            "compound_id",
            "name",
            "formula",
            "exact_mass",
            "molecular_weight",
            "reactions",
            "enzymes",
            "pathways",
            "modules",
            "dblinks",
        ],
    };
    fields.iter().map(|f| f.to_string()).collect()
}

/// Built-in mapping table for a kind
pub fn default_mapping(kind: EntryKind) -> HashMap<String, FieldSource> {
    let mut sections = vec![
        ("name", "NAME"),
        ("pathways", "PATHWAY"),
        ("modules", "MODULE"),
        ("dblinks", "DBLINKS"),
        ("comment", "COMMENT"),
        ("brite", "BRITE"),
    ];
    let derived = match kind {
        EntryKind::Reaction => {
            sections.extend([
                ("definition", "DEFINITION"),
                ("enzyme", "ENZYME"),
                ("orthology", "ORTHOLOGY"),
                ("rclass", "RCLASS"),
            ]);
            vec![
                ("reaction_id", FieldSource::EntryId),
                ("equation", FieldSource::EquationText),
                ("reactants", FieldSource::Reactants),
                ("products", FieldSource::Products),
                ("is_reversible", FieldSource::Reversible),
            ]
        }
        EntryKind::Compound => {
            sections.extend([
                ("formula", "FORMULA"),
                ("exact_mass", "EXACT_MASS"),
                ("molecular_weight", "MOL_WEIGHT"),
                ("reactions", "REACTION"),
                ("enzymes", "ENZYME"),
                ("remark", "REMARK"),
            ]);
            vec![("compound_id", FieldSource::EntryId)]
        }
    };

    sections
        .into_iter()
        .map(|(field, key)| (field, FieldSource::section(key)))
        .chain(derived)
        .map(|(field, source)| (field.to_string(), source))
        .collect()
}

/// Ordered output fields plus the table that backs them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    kind: EntryKind,
    fields: Vec<String>,
    mapping: HashMap<String, FieldSource>,
}

impl RecordSchema {
    /// Schema over `fields` using the built-in mapping table
    pub fn new(kind: EntryKind, fields: Vec<String>) -> Self {
        Self { kind, fields, mapping: default_mapping(kind) }
    }

    /// Schema with the default field list for `kind`
    pub fn for_kind(kind: EntryKind) -> Self {
        Self::new(kind, default_fields(kind))
    }

    /// Map `field` to a flat-file section, replacing any existing entry
    pub fn with_section(mut self, field: &str, section: &str) -> Self {
        self.mapping.insert(field.to_string(), FieldSource::section(section));
        self
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn source(&self, field: &str) -> Option<&FieldSource> {
        self.mapping.get(field)
    }

    /// True when any requested field reads the decoded equation
    pub fn needs_equation(&self) -> bool {
        self.fields
            .iter()
            .filter_map(|f| self.mapping.get(f))
            .any(FieldSource::needs_equation)
    }

    /// Check that every requested field has a mapping
    pub fn validate(&self) -> Result<(), ProjectionError> {
        match self.fields.iter().find(|f| !self.mapping.contains_key(*f)) {
            Some(field) => Err(ProjectionError::ConfigurationError {
                kind: self.kind,
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }
}
