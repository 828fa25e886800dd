//! Data model for decoded flat-file records and reaction equations

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored under one section key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    /// Header line content with no continuation lines
    Single(String),

    /// Content spread over continuation lines, in source order
    Lines(Vec<String>),
}

impl SectionValue {
    /// Append a continuation line, promoting a single value to a sequence
    pub(crate) fn push_line(&mut self, line: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Lines(vec![first, line]);
            }
            Self::Lines(lines) => lines.push(line),
        }
    }

    /// Flatten the value, joining sequence elements with `separator`
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::Lines(lines) => lines.join(separator),
        }
    }

    /// First line of content, if any
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Lines(lines) => lines.first().map(String::as_str),
        }
    }
}

/// Ordered mapping from section key to value, decoded from one entry.
///
/// Keys keep the position where they first appeared; a repeated header
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    sections: Vec<(String, SectionValue)>,
}

impl FlatRecord {
    pub(crate) fn insert(&mut self, key: String, value: SectionValue) {
        match self.sections.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.sections.push((key, value)),
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut SectionValue> {
        self.sections.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a section by key
    pub fn get(&self, key: &str) -> Option<&SectionValue> {
        self.sections.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Section keys in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// First token of the `ENTRY` section, e.g. `R00200`
    pub fn entry_id(&self) -> Option<&str> {
        self.get("ENTRY")?.first()?.split_whitespace().next()
    }

    /// Raw `EQUATION` text, continuation lines joined with a space
    pub fn equation_text(&self) -> String {
        self.get("EQUATION").map(|v| v.joined(" ")).unwrap_or_default()
    }
}

impl Serialize for FlatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (key, value) in &self.sections {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One species in an equation with its stoichiometric multiplier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquationTerm {
    pub coefficient: u32,
    pub identifier: String,
}

impl EquationTerm {
    pub fn new(coefficient: u32, identifier: impl Into<String>) -> Self {
        Self { coefficient, identifier: identifier.into() }
    }
}

impl fmt::Display for EquationTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient == 1 {
            write!(f, "{}", self.identifier)
        } else {
            write!(f, "{} {}", self.coefficient, self.identifier)
        }
    }
}

/// Decoded reaction equation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub reactants: Vec<EquationTerm>,
    pub products: Vec<EquationTerm>,
    pub reversible: bool,
}

impl Equation {
    /// True when neither side decoded any term
    pub fn is_empty(&self) -> bool {
        self.reactants.is_empty() && self.products.is_empty()
    }

    /// Arrow token matching the reversibility flag
    pub fn arrow(&self) -> &'static str {
        if self.reversible { "<=>" } else { "=>" }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_terms(&self.reactants),
            self.arrow(),
            format_terms(&self.products)
        )
    }
}

/// Render terms the way KEGG writes one side of an equation
pub fn format_terms(terms: &[EquationTerm]) -> String {
    terms.iter().map(ToString::to_string).collect::<Vec<_>>().join(" + ")
}
