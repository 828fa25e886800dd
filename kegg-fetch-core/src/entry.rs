//! KEGG entry kinds and identifier handling

use regex_utils::kegg_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Errors raised while validating an entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Identifier does not start with the kind's letter
    #[error("Invalid {kind} ID format: {id}. Must start with '{letter}'.")]
    InvalidId { kind: EntryKind, id: String, letter: char },

    /// Identifier carries the database prefix of another kind
    #[error("ID {id} uses database prefix '{prefix}', expected '{expected}'")]
    PrefixMismatch { id: String, prefix: String, expected: &'static str },
}

/// The two KEGG databases records are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Reaction,
    Compound,
}

impl EntryKind {
    /// Database prefix used in `get` requests
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Reaction => "rn",
            Self::Compound => "cpd",
        }
    }

    /// Leading letter of every identifier of this kind
    pub fn letter(self) -> char {
        match self {
            Self::Reaction => 'R',
            Self::Compound => 'C',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Reaction => "reaction",
            Self::Compound => "compound",
        }
    }

    /// Identifier used when none is configured
    pub fn default_id(self) -> &'static str {
        match self {
            Self::Reaction => "R00200",
            Self::Compound => "C00031",
        }
    }

    /// Infer the kind from an identifier such as `R00200` or `cpd:C00031`
    pub fn from_id(id: &str) -> Option<Self> {
        let parsed = kegg_id::parse(id)?;
        match (parsed.prefix, parsed.letter) {
            (Some("rn") | None, 'R') => Some(Self::Reaction),
            (Some("cpd") | None, 'C') => Some(Self::Compound),
            _ => None,
        }
    }

    /// Check an identifier and strip a matching database prefix.
    ///
    /// Only the leading letter is enforced; identifiers that do not look
    /// like `X00000` are logged and passed through.
    pub fn validate_id(self, id: &str) -> Result<String, EntryError> {
        let id = id.trim();
        let bare = match id.split_once(':') {
            Some((prefix, rest)) if prefix == self.prefix() => rest,
            Some((prefix, _)) => {
                return Err(EntryError::PrefixMismatch {
                    id: id.to_string(),
                    prefix: prefix.to_string(),
                    expected: self.prefix(),
                });
            }
            None => id,
        };

        if !bare.starts_with(self.letter()) {
            return Err(EntryError::InvalidId {
                kind: self,
                id: id.to_string(),
                letter: self.letter(),
            });
        }

        if kegg_id::parse(bare).is_none() {
            warn!("{} does not look like a KEGG {} identifier", bare, self);
        }

        Ok(bare.to_string())
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
