//! Line-oriented decoder for the KEGG flat-file format
//!
//! A record is a sequence of header lines (`KEY  value`) optionally followed
//! by continuation lines indented with whitespace. The decoder is a small
//! state machine whose only state is the key of the most recent header line.

use tracing::{debug, trace};

use crate::parser::model::{FlatRecord, SectionValue};

/// Line that terminates an entry in multi-entry responses
pub const ENTRY_TERMINATOR: &str = "///";

/// Classification of one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only
    Blank,

    /// Indented line; carries the trimmed content
    Continuation(&'a str),

    /// New section; `value` is `None` for a bare header with no content
    Header { key: &'a str, value: Option<&'a str> },
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Self::Blank;
        }

        if line.starts_with(char::is_whitespace) {
            return Self::Continuation(line.trim());
        }

        let line = line.trim_end();
        match line.split_once(' ') {
            Some((key, value)) => Self::Header { key, value: Some(value.trim()) },
            None => Self::Header { key: line, value: None },
        }
    }
}

/// Incremental flat-file decoder
#[derive(Debug, Default)]
pub struct FlatFileParser {
    current_section: Option<String>,
    record: FlatRecord,
}

impl FlatFileParser {
    /// Create a decoder with no current section
    pub fn new() -> Self {
        Self::default()
    }

    /// Key that continuation lines currently attach to
    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    /// Consume one line of input
    pub fn feed(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::Blank => {}
            LineKind::Continuation(content) => self.append(content),
            LineKind::Header { key, value } => {
                let value = match value {
                    Some(value) => SectionValue::Single(value.to_string()),
                    None => SectionValue::Lines(Vec::new()),
                };
                self.record.insert(key.to_string(), value);
                self.current_section = Some(key.to_string());
            }
        }
    }

    fn append(&mut self, content: &str) {
        let Some(key) = self.current_section.as_deref() else {
            trace!("Dropping continuation line with no preceding header: {}", content);
            return;
        };

        if let Some(value) = self.record.get_mut(key) {
            value.push_line(content.to_string());
        }
    }

    /// Finish decoding and hand back the record
    pub fn finish(self) -> FlatRecord {
        self.record
    }
}

/// Decode one flat-file entry into an ordered section map.
///
/// Never fails: empty input yields an empty record.
pub fn parse(text: &str) -> FlatRecord {
    let mut parser = FlatFileParser::new();
    for line in text.lines() {
        parser.feed(line);
    }

    let record = parser.finish();
    debug!(sections = record.len(), entry = ?record.entry_id(), "Decoded flat-file entry");
    record
}

/// Split a multi-entry response on `///` lines.
///
/// The terminator line belongs to no entry and whitespace-only blobs are
/// dropped.
pub fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim_end() == ENTRY_TERMINATOR {
            push_entry(&mut entries, &text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    push_entry(&mut entries, &text[start..]);

    entries
}

fn push_entry<'a>(entries: &mut Vec<&'a str>, blob: &'a str) {
    if !blob.trim().is_empty() {
        entries.push(blob);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R00200: &str = "\
ENTRY       R00200                      Reaction
NAME        ATP:pyruvate 2-O-phosphotransferase
DEFINITION  ATP + Pyruvate <=> ADP + Phosphoenolpyruvate
EQUATION    C00002 + C00022 <=> C00008 + C00074
RCLASS      RC00002  C00002_C00008
            RC00015  C00022_C00074
ENZYME      2.7.1.40
PATHWAY     rn00010  Glycolysis / Gluconeogenesis
            rn00620  Pyruvate metabolism
            rn01100  Metabolic pathways
DBLINKS     RHEA: 18157
///
";

    #[test]
    fn test_classify() {
        assert_eq!(LineKind::classify(""), LineKind::Blank);
        assert_eq!(LineKind::classify("   \t "), LineKind::Blank);
        assert_eq!(
            LineKind::classify("            rn00620  Pyruvate"),
            LineKind::Continuation("rn00620  Pyruvate")
        );
        assert_eq!(LineKind::classify("\tindented"), LineKind::Continuation("indented"));
        assert_eq!(
            LineKind::classify("ENZYME      2.7.1.40"),
            LineKind::Header { key: "ENZYME", value: Some("2.7.1.40") }
        );
        assert_eq!(LineKind::classify("REFERENCE"), LineKind::Header { key: "REFERENCE", value: None });
        assert_eq!(LineKind::classify("PATHWAY   "), LineKind::Header { key: "PATHWAY", value: None });
    }

    #[test]
    fn test_parse_reaction_entry() {
        let record = parse(R00200);

        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["ENTRY", "NAME", "DEFINITION", "EQUATION", "RCLASS", "ENZYME", "PATHWAY", "DBLINKS", "///"]
        );
        assert_eq!(record.entry_id(), Some("R00200"));
        assert_eq!(
            record.get("ENTRY"),
            Some(&SectionValue::Single("R00200                      Reaction".to_string()))
        );
        assert_eq!(
            record.get("PATHWAY"),
            Some(&SectionValue::Lines(vec![
                "rn00010  Glycolysis / Gluconeogenesis".to_string(),
                "rn00620  Pyruvate metabolism".to_string(),
                "rn01100  Metabolic pathways".to_string(),
            ]))
        );
        assert_eq!(record.get("///"), Some(&SectionValue::Lines(Vec::new())));
        assert_eq!(record.equation_text(), "C00002 + C00022 <=> C00008 + C00074");
    }

    #[test]
    fn test_continuation_appends_to_header() {
        let record = parse("NAME        D-Glucose;\n            Grape sugar;\n            Dextrose\n");
        assert_eq!(
            record.get("NAME"),
            Some(&SectionValue::Lines(vec![
                "D-Glucose;".to_string(),
                "Grape sugar;".to_string(),
                "Dextrose".to_string(),
            ]))
        );
    }

    #[test]
    fn test_bare_header_collects_continuations() {
        let record = parse("REFERENCE\n  first line\n  second line\n");
        assert_eq!(
            record.get("REFERENCE"),
            Some(&SectionValue::Lines(vec!["first line".to_string(), "second line".to_string()]))
        );
    }

    #[test]
    fn test_continuation_follows_most_recent_header() {
        let text = "PATHWAY     map00010\nMODULE      M00001\nPATHWAY     map00020\n            map00030\n";
        let record = parse(text);

        assert_eq!(
            record.get("PATHWAY"),
            Some(&SectionValue::Lines(vec!["map00020".to_string(), "map00030".to_string()]))
        );
        assert_eq!(record.get("MODULE"), Some(&SectionValue::Single("M00001".to_string())));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["PATHWAY", "MODULE"]);
    }

    #[test]
    fn test_blank_lines_do_not_reset_section() {
        let record = parse("ENZYME      1.1.1.1\n\n   \n            1.1.1.2\n");
        assert_eq!(
            record.get("ENZYME"),
            Some(&SectionValue::Lines(vec!["1.1.1.1".to_string(), "1.1.1.2".to_string()]))
        );
    }

    #[test]
    fn test_orphan_continuation_is_dropped() {
        let mut parser = FlatFileParser::new();
        parser.feed("   stray");
        assert_eq!(parser.current_section(), None);
        parser.feed("ENTRY       C00031");
        assert_eq!(parser.current_section(), Some("ENTRY"));

        let record = parser.finish();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }

    #[test]
    fn test_crlf_input() {
        let record = parse("ENTRY       C00031    Compound\r\nFORMULA     C6H12O6\r\n");
        assert_eq!(record.entry_id(), Some("C00031"));
        assert_eq!(record.get("FORMULA"), Some(&SectionValue::Single("C6H12O6".to_string())));
    }

    #[test]
    fn test_split_entries() {
        let text = "ENTRY       R00200\n///\nENTRY       R00259\n///\n";
        let entries = split_entries(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(parse(entries[0]).entry_id(), Some("R00200"));
        assert_eq!(parse(entries[1]).entry_id(), Some("R00259"));
        assert!(!parse(entries[1]).contains_key(ENTRY_TERMINATOR));
    }

    #[test]
    fn test_split_entries_without_terminator() {
        let entries = split_entries("ENTRY       C00031\nFORMULA     C6H12O6");
        assert_eq!(entries, vec!["ENTRY       C00031\nFORMULA     C6H12O6"]);
        assert!(split_entries("").is_empty());
        assert!(split_entries("///\n\n///\n").is_empty());
    }
}
