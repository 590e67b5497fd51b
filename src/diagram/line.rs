//! Line classifier for the `erDiagram` notation.
//!
//! Each input line is classified into exactly one tagged variant; the
//! parser decides what to do with it based on context (inside or outside
//! a table body). Nothing here ever fails: lines that fit no shape are
//! `Ignored`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Relationship operator on the many form: destination is the many side
/// in the text, so the stored join direction gets swapped.
pub const OP_ONE_TO_MANY: &str = "||--o{";
/// Relationship operator for a strict one-to-one link.
pub const OP_ONE_TO_ONE: &str = "||--||";

/// Regex for a relationship line: `SOURCE OP DESTINATION : condition`.
static RELATIONSHIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)\s*:([^:]*)$").unwrap());

/// A structurally valid relationship line, before direction normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipLine {
    /// Table on the left of the operator
    pub source: String,
    /// Table on the right of the operator
    pub destination: String,
    /// Column referenced on the left of `=` (after the final dot)
    pub source_column: String,
    /// Column referenced on the right of `=` (after the final dot)
    pub destination_column: String,
    /// The relation operator token as written
    pub operator: String,
}

impl RelationshipLine {
    /// True when the textual destination is the many side (`||--o{`),
    /// which means the stored join must swap source and destination.
    pub fn is_reversed(&self) -> bool {
        self.operator == OP_ONE_TO_MANY
    }

    /// True for a strict one-to-one relationship (`||--||`).
    pub fn is_one_to_one(&self) -> bool {
        self.operator == OP_ONE_TO_ONE
    }
}

/// A column declaration line: `type name [PK] [FK] ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLine {
    pub declared_type: String,
    pub name: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `NAME {` — opens a table body
    TableOpen(String),
    /// `}` — closes the current table body
    TableClose,
    /// A relationship edge between two tables
    Relationship(RelationshipLine),
    /// A candidate column declaration (meaningful only inside a body)
    ColumnDef(ColumnLine),
    /// Blank or unrecognized — skipped without error
    Ignored,
}

/// Check whether a line carries any of the relationship markers.
fn has_relationship_marker(line: &str) -> bool {
    line.contains("||") || line.contains("o{") || line.contains("}|")
}

/// Classify a single raw input line.
pub fn classify(raw: &str) -> Line {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Ignored;
    }

    if has_relationship_marker(line) {
        if let Some(rel) = parse_relationship(line) {
            return Line::Relationship(rel);
        }
        // Marker present but the shape doesn't match: never a column
        // declaration, though a `{`-terminated line still opens a table.
        if let Some(head) = line.strip_suffix('{') {
            let name = head.trim();
            if !name.is_empty() {
                return Line::TableOpen(name.to_string());
            }
        }
        return Line::Ignored;
    }

    if line == "}" {
        return Line::TableClose;
    }

    if let Some(head) = line.strip_suffix('{') {
        let name = head.trim();
        if !name.is_empty() {
            return Line::TableOpen(name.to_string());
        }
        return Line::Ignored;
    }

    if let Some(col) = parse_column(line) {
        return Line::ColumnDef(col);
    }

    Line::Ignored
}

/// Parse a relationship line into its structural pieces.
///
/// Requires exactly one `:` with exactly three whitespace tokens before
/// it, and a condition of the form `<ref> = <ref>` where each
/// reference's column is the segment after its final `.`. Surrounding
/// double quotes around the condition are stripped.
fn parse_relationship(line: &str) -> Option<RelationshipLine> {
    if line.matches(':').count() != 1 {
        return None;
    }
    let caps = RELATIONSHIP_RE.captures(line)?;

    let source = caps.get(1)?.as_str();
    let operator = caps.get(2)?.as_str();
    let destination = caps.get(3)?.as_str();

    let condition = caps.get(4)?.as_str().trim().trim_matches('"');

    let mut sides = condition.split('=');
    let left = sides.next()?.trim();
    let right = sides.next()?.trim();
    if sides.next().is_some() || left.is_empty() || right.is_empty() {
        return None;
    }

    let source_column = left.rsplit('.').next()?.to_string();
    let destination_column = right.rsplit('.').next()?.to_string();

    Some(RelationshipLine {
        source: source.to_string(),
        destination: destination.to_string(),
        source_column,
        destination_column,
        operator: operator.to_string(),
    })
}

/// Parse a column declaration: at least `type name`, with optional
/// trailing `PK` / `FK` flag tokens.
fn parse_column(line: &str) -> Option<ColumnLine> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 2 {
        return None;
    }

    let flags = &parts[2..];
    Some(ColumnLine {
        declared_type: parts[0].to_string(),
        name: parts[1].to_string(),
        is_primary_key: flags.contains(&"PK"),
        is_foreign_key: flags.contains(&"FK"),
    })
}
