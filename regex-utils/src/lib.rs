//! Regex utilities for kegg-fetch
//! Extracted to a separate crate for compilation optimization

use once_cell::sync::Lazy;
use regex::Regex;

/// Stoichiometric term patterns used by the equation parser
pub mod term {
    use super::*;

    /// Leading coefficient, whitespace, then the species identifier
    pub static COEFFICIENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(\d+)\s+(\S.*)$").expect("Invalid regex pattern")
    });

    /// Split a trimmed term into its numeric coefficient text and remainder.
    ///
    /// Returns `None` when the term has no leading digit run followed by
    /// whitespace.
    pub fn split_coefficient(term: &str) -> Option<(&str, &str)> {
        let caps = COEFFICIENT_PATTERN.captures(term)?;
        let digits = caps.get(1)?.as_str();
        let rest = caps.get(2)?.as_str();
        Some((digits, rest))
    }
}

/// KEGG identifier patterns
pub mod kegg_id {
    use super::*;

    pub static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:(rn|cpd):)?([A-Z])(\d{5})$").expect("Invalid regex pattern")
    });

    /// A parsed identifier such as `rn:R00200` or `C00031`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EntryId<'a> {
        pub prefix: Option<&'a str>,
        pub letter: char,
        pub number: &'a str,
    }

    /// Match a well-formed KEGG entry identifier
    pub fn parse(text: &str) -> Option<EntryId<'_>> {
        let caps = ENTRY_PATTERN.captures(text.trim())?;
        Some(EntryId {
            prefix: caps.get(1).map(|m| m.as_str()),
            letter: caps.get(2)?.as_str().chars().next()?,
            number: caps.get(3)?.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_coefficient() {
        assert_eq!(term::split_coefficient("2 C00002"), Some(("2", "C00002")));
        assert_eq!(term::split_coefficient("12\tC00080"), Some(("12", "C00080")));
        assert_eq!(term::split_coefficient("C00002"), None);
        assert_eq!(term::split_coefficient("n C00001"), None);
        assert_eq!(term::split_coefficient("2C00002"), None);
    }

    #[test]
    fn test_entry_id_parsing() {
        let id = kegg_id::parse("rn:R00200").unwrap();
        assert_eq!(id.prefix, Some("rn"));
        assert_eq!(id.letter, 'R');
        assert_eq!(id.number, "00200");

        let id = kegg_id::parse("C00031").unwrap();
        assert_eq!(id.prefix, None);
        assert_eq!(id.letter, 'C');

        assert!(kegg_id::parse("INVALID_ID").is_none());
        assert!(kegg_id::parse("R0020").is_none());
    }
}
