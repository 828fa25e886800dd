//! KEGG flat-file parsing engine
//!
//! This module decodes raw entry text into an ordered section map and
//! decodes reaction equations into stoichiometric term lists.

pub mod equation;
pub mod flat_file;
pub mod model;

pub use equation::{parse_terms, split_equation};
pub use flat_file::{FlatFileParser, LineKind, parse, split_entries};
pub use model::*;
