//! Header row and column resolution
//!
//! Header rows move around between exports, and column order is not fixed.
//! A header row is recognized by known label substrings; each semantic
//! field is then mapped to the first header cell containing its hint, with
//! a fixed default column when no cell matches. Pure functions over raw
//! row grids so the heuristics are testable without workbook fixtures.

use std::collections::HashMap;

use calamine::Data;

/// Rows scanned before giving up on finding a header.
pub const HEADER_SCAN_ROWS: usize = 10;

/// One semantic field: its hint substrings and positional default.
///
/// `hints` is a list of alternatives; each alternative is a conjunction of
/// substrings that must all appear in the header cell. So
/// `&[&["İZİN", "TÜR"]]` needs one cell containing both, while
/// `&[&["NEDEN"], &["SEBEP"]]` accepts either label.
pub struct FieldSpec<'a> {
    pub name: &'a str,
    pub hints: &'a [&'a [&'a str]],
    pub default_col: usize,
}

/// Domain description of what a header row looks like.
pub struct HeaderHints<'a> {
    /// A row qualifies when any cell contains one of these substrings
    pub row_tokens: &'a [&'a str],
    /// When set, the header row must contain a cell whose trimmed text
    /// equals this token exactly; no positional fallback is allowed
    pub exact_token: Option<&'a str>,
    pub fields: &'a [FieldSpec<'a>],
}

/// A resolved header: its row index and the semantic column map.
#[derive(Debug, Clone)]
pub struct Header {
    pub row: usize,
    pub columns: HashMap<String, usize>,
}

impl Header {
    pub fn col(&self, field: &str) -> usize {
        self.columns.get(field).copied().unwrap_or(0)
    }
}

fn cell_upper(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.to_uppercase()),
        _ => None,
    }
}

/// Find the header row among the first `HEADER_SCAN_ROWS` rows.
pub fn find_header_row(rows: &[Vec<Data>], hints: &HeaderHints) -> Option<usize> {
    for (i, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        if let Some(exact) = hints.exact_token {
            if row
                .iter()
                .any(|c| matches!(c, Data::String(s) if s.trim() == exact))
            {
                return Some(i);
            }
            continue;
        }
        let qualifies = row.iter().filter_map(cell_upper).any(|text| {
            hints
                .row_tokens
                .iter()
                .any(|token| text.contains(&token.to_uppercase()))
        });
        if qualifies {
            return Some(i);
        }
    }
    None
}

/// Map each semantic field to its column in the given header row.
fn map_columns(header_row: &[Data], fields: &[FieldSpec]) -> HashMap<String, usize> {
    let cells: Vec<Option<String>> = header_row.iter().map(cell_upper).collect();
    let mut columns = HashMap::new();
    for field in fields {
        let found = cells.iter().position(|cell| {
            cell.as_ref().is_some_and(|text| {
                field.hints.iter().any(|alt| {
                    alt.iter().all(|hint| text.contains(&hint.to_uppercase()))
                })
            })
        });
        columns.insert(
            field.name.to_string(),
            found.unwrap_or(field.default_col),
        );
    }
    columns
}

/// Resolve the header row and column map for a sheet.
///
/// When no row qualifies, degrades to row 0 with every field at its
/// default column — unless an exact token is mandatory, in which case the
/// caller treats `None` as fatal.
pub fn resolve_header(rows: &[Vec<Data>], hints: &HeaderHints) -> Option<Header> {
    match find_header_row(rows, hints) {
        Some(row) => Some(Header {
            row,
            columns: map_columns(&rows[row], hints.fields),
        }),
        None if hints.exact_token.is_some() => None,
        None => {
            let columns = hints
                .fields
                .iter()
                .map(|f| (f.name.to_string(), f.default_col))
                .collect();
            Some(Header { row: 0, columns })
        }
    }
}
