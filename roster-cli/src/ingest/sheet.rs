//! Sheet location heuristics
//!
//! Sheet names in the source workbooks drift between exports ("GÜNCEL",
//! "GÜNCEL (3)", ...), so sheets are found by ordered name substrings with
//! an optional content sniff as the fallback.

use calamine::Data;

/// How many sheets the content sniff inspects.
const SNIFF_SHEETS: usize = 3;
/// How many rows of each sniffed sheet are inspected.
pub const SNIFF_ROWS: usize = 20;

/// Search spec for one target record type.
pub struct SheetSpec<'a> {
    /// Case-insensitive name substrings, tried in order
    pub name_hints: &'a [&'a str],
    /// Content predicate over the first rows of a candidate sheet
    pub sniff: Option<fn(&[Vec<Data>]) -> bool>,
}

/// Find the sheet most likely to hold the target records.
///
/// Name matches win over content matches; within each heuristic the first
/// hit in workbook order wins. `rows_of` is only invoked when the name
/// heuristic fails, and only for the first few sheets.
pub fn locate_sheet<F>(names: &[String], spec: &SheetSpec, mut rows_of: F) -> Option<String>
where
    F: FnMut(&str) -> Option<Vec<Vec<Data>>>,
{
    for hint in spec.name_hints {
        let hint_upper = hint.to_uppercase();
        if let Some(name) = names
            .iter()
            .find(|n| n.trim().to_uppercase().contains(&hint_upper))
        {
            return Some(name.clone());
        }
    }

    if let Some(sniff) = spec.sniff {
        for name in names.iter().take(SNIFF_SHEETS) {
            let Some(rows) = rows_of(name) else {
                continue;
            };
            let peek: Vec<Vec<Data>> = rows.into_iter().take(SNIFF_ROWS).collect();
            if sniff(&peek) {
                return Some(name.clone());
            }
        }
    }

    None
}

/// Find a sheet whose trimmed, upper-cased name equals `target` exactly.
/// Used by the per-category inventory fallback.
pub fn find_sheet_exact(names: &[String], target: &str) -> Option<String> {
    let target_upper = target.trim().to_uppercase();
    names
        .iter()
        .find(|n| n.trim().to_uppercase() == target_upper)
        .cloned()
}

/// True when any cell in the given rows contains the token.
pub fn rows_contain_token(rows: &[Vec<Data>], token: &str) -> bool {
    rows.iter().any(|row| {
        row.iter().any(|cell| match cell {
            Data::String(s) => s.contains(token),
            _ => false,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_hint_order_and_case() {
        let sheets = names(&["Sayılar", "güncel (3)", "Arşiv"]);
        let spec = SheetSpec {
            name_hints: &["GÜNCEL"],
            sniff: None,
        };
        let found = locate_sheet(&sheets, &spec, |_| None);
        assert_eq!(found.as_deref(), Some("güncel (3)"));
    }

    #[test]
    fn test_sniff_fallback() {
        let sheets = names(&["Sayfa1", "Sayfa2"]);
        fn has_snu(rows: &[Vec<Data>]) -> bool {
            rows_contain_token(rows, "S.NU")
        }
        let spec = SheetSpec {
            name_hints: &["GÜNCEL"],
            sniff: Some(has_snu),
        };
        let found = locate_sheet(&sheets, &spec, |name| {
            if name == "Sayfa2" {
                Some(vec![vec![Data::String("S.NU".into())]])
            } else {
                Some(vec![vec![Data::String("BAŞKA".into())]])
            }
        });
        assert_eq!(found.as_deref(), Some("Sayfa2"));
    }

    #[test]
    fn test_not_found() {
        let sheets = names(&["A", "B"]);
        let spec = SheetSpec {
            name_hints: &["GÜNCEL"],
            sniff: None,
        };
        assert_eq!(locate_sheet(&sheets, &spec, |_| None), None);
    }

    #[test]
    fn test_exact_match_trims_and_uppercases() {
        let sheets = names(&[" repsam ", "KALMES"]);
        assert_eq!(
            find_sheet_exact(&sheets, "REPSAM").as_deref(),
            Some(" repsam ")
        );
        assert_eq!(find_sheet_exact(&sheets, "CAPRA"), None);
    }
}
