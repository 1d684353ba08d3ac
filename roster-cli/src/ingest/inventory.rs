//! Inventory (personnel roster) extraction
//!
//! Two source shapes exist. Preferred: a consolidated master sheet (name
//! contains "TÜM" or "LİSTE") where each row is scanned left-to-right for
//! the first plausible name cell. Fallback: one sheet per category with
//! fixed column positions. The workbook is the source of truth — repeated
//! names are kept, not deduplicated.

use calamine::Data;

use super::cell::cell_text;
use super::header::{HeaderHints, find_header_row};
use super::{Extracted, Sheets};
use crate::types::{InventoryRecord, QualityNote};

/// Category sheets read in fallback mode, in report order.
pub const CATEGORIES: [&str; 8] = [
    "REPSAM", "KALMES", "BANGLADEŞ", "NEŞAT", "CAPRA", "ÖZBEK", "TÜRKMEN", "ZİMBAVE",
];

/// Tokens that disqualify a text cell from being a person name: category
/// names plus the sheet names that show up inside consolidated exports.
const CATEGORY_TOKENS: [&str; 10] = [
    "REPSAM", "KALMES", "BANGLADEŞ", "NEŞAT", "CAPRA", "ÖZBEK", "TÜRKMEN", "ZİMBAVE", "SAYILAR",
    "TÜM LİSTE",
];

/// Exact header labels that may repeat inside the data region.
const HEADER_TOKENS: [&str; 3] = ["ADI SOYADI", "ADI", "S.NU"];

const DEFAULT_CATEGORY: &str = "GENEL";

fn is_header_cell(upper: &str) -> bool {
    HEADER_TOKENS.contains(&upper) || upper.contains("S.NO")
}

fn is_category_token(upper: &str) -> bool {
    CATEGORY_TOKENS.contains(&upper)
}

/// A cell is a plausible name/category/tag when it is text longer than two
/// trimmed characters.
fn plausible_text(row: &[Data], col: usize) -> Option<String> {
    let text = cell_text(row, col)?;
    if text.chars().count() > 2 {
        Some(text.to_uppercase())
    } else {
        None
    }
}

/// Extract inventory records from whichever source shape the workbook has.
pub fn extract_inventory(sheets: &mut dyn Sheets) -> Extracted<InventoryRecord> {
    let names = sheets.sheet_names();
    let master = names.iter().find(|n| {
        let upper = n.trim().to_uppercase();
        upper.contains("TÜM") || upper.contains("LİSTE")
    });

    match master.cloned() {
        Some(sheet_name) => extract_consolidated(sheets, &sheet_name),
        None => extract_per_category(sheets),
    }
}

/// Consolidated master sheet: scan each row left-to-right for the first
/// plausible name cell, then take the next two plausible text cells as
/// category and tag.
fn extract_consolidated(sheets: &mut dyn Sheets, sheet_name: &str) -> Extracted<InventoryRecord> {
    let mut out = Extracted::default();

    let rows = match sheets.rows(sheet_name) {
        Some(rows) => rows,
        None => {
            out.notes.push(QualityNote::fail(
                "Envanter Kaynağı",
                format!("\"{}\" sayfası okunamadı.", sheet_name),
            ));
            return out;
        }
    };

    let hints = HeaderHints {
        row_tokens: &["ADI"],
        exact_token: None,
        fields: &[],
    };
    let header_idx = find_header_row(&rows, &hints).unwrap_or(0);

    for row in rows.iter().skip(header_idx + 1) {
        let mut name = None;
        let mut category = None;
        let mut tag = None;

        for col in 0..row.len() {
            let Some(upper) = plausible_text(row, col) else {
                continue;
            };
            if is_header_cell(&upper) || is_category_token(&upper) {
                continue;
            }
            if name.is_none() {
                name = Some(upper);
            } else if category.is_none() {
                category = Some(upper);
            } else {
                tag = Some(upper);
                break;
            }
        }

        if let Some(full_name) = name {
            let category = category.unwrap_or_default();
            let tag = tag.or_else(|| {
                if category.is_empty() {
                    None
                } else {
                    Some(category.clone())
                }
            });
            out.records.push(InventoryRecord {
                full_name,
                category: if category.is_empty() {
                    DEFAULT_CATEGORY.to_string()
                } else {
                    category
                },
                tag: tag.unwrap_or_default(),
                extra: Default::default(),
            });
        }
    }

    log::info!(
        "inventory: {} records from consolidated sheet '{}'",
        out.records.len(),
        sheet_name
    );
    out.notes.push(QualityNote::ok(
        "Envanter Kaynağı",
        format!(
            "\"{}\" sayfasından {} kayıt yüklendi.",
            sheet_name,
            out.records.len()
        ),
    ));
    out
}

/// Fallback: one sheet per known category, name at column 1, tag at
/// column 2 defaulting to the category name. A missing category sheet is
/// a warning, never an abort.
fn extract_per_category(sheets: &mut dyn Sheets) -> Extracted<InventoryRecord> {
    let mut out = Extracted::default();
    let names = sheets.sheet_names();

    for category in CATEGORIES {
        let Some(sheet_name) = super::sheet::find_sheet_exact(&names, category) else {
            out.notes.push(QualityNote::warn(
                format!("Eksik Sayfa: {}", category),
                "Bu kategoriye ait sayfa bulunamadı.",
            ));
            continue;
        };

        let Some(rows) = sheets.rows(&sheet_name) else {
            out.notes.push(QualityNote::warn(
                format!("Eksik Sayfa: {}", category),
                "Bu kategoriye ait sayfa okunamadı.",
            ));
            continue;
        };

        for row in &rows {
            let Some(name) = cell_text(row, 1) else {
                continue;
            };
            if name.chars().count() < 3 {
                continue;
            }
            let name_upper = name.to_uppercase();
            if name_upper.contains("ADI SOYADI") || name_upper.contains("İSİM") {
                continue;
            }

            let tag = match super::cell::cell_string(row, 2).trim() {
                "" => category.to_string(),
                other => other.to_uppercase(),
            };

            out.records.push(InventoryRecord {
                full_name: name_upper,
                category: category.to_string(),
                tag,
                extra: Default::default(),
            });
        }
    }

    log::info!(
        "inventory: {} records from category sheets",
        out.records.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::GridSheets;

    fn s(text: &str) -> Data {
        Data::String(text.into())
    }

    #[test]
    fn test_consolidated_rejects_category_tokens() {
        let mut sheets = GridSheets::new(vec![(
            "TÜM LİSTE".into(),
            vec![
                vec![s(""), s("ADI SOYADI"), s("KATEGORİ")],
                vec![s("1"), s("AHMET YILMAZ"), s("USTA")],
                vec![s("2"), s("REPSAM"), s("X")],
            ],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].full_name, "AHMET YILMAZ");
        assert_eq!(out.records[0].category, "USTA");
        // No third plausible cell: tag falls back to the category
        assert_eq!(out.records[0].tag, "USTA");
    }

    #[test]
    fn test_consolidated_skips_numeric_and_short_cells() {
        let mut sheets = GridSheets::new(vec![(
            "TÜM LİSTE".into(),
            vec![
                vec![s("ADI SOYADI")],
                vec![Data::Int(7), s("AB"), s("CUMHUR BAHADIR"), s("KALIP"), s("VARDİYA 2")],
            ],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].full_name, "CUMHUR BAHADIR");
        assert_eq!(out.records[0].category, "KALIP");
        assert_eq!(out.records[0].tag, "VARDİYA 2");
    }

    #[test]
    fn test_consolidated_defaults() {
        let mut sheets = GridSheets::new(vec![(
            "TÜM LİSTE".into(),
            vec![vec![s("ADI")], vec![s("ALİ VELİ")]],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].category, "GENEL");
        assert_eq!(out.records[0].tag, "");
    }

    #[test]
    fn test_missing_category_sheet_warns_but_continues() {
        let mut sheets = GridSheets::new(vec![(
            "REPSAM".into(),
            vec![
                vec![s("NO"), s("ADI SOYADI"), s("GÖREV")],
                vec![s("1"), s("AHMET YILMAZ"), s("USTA")],
            ],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].category, "REPSAM");
        assert_eq!(out.records[0].tag, "USTA");

        // Every other category emits its own warning
        let capra = out
            .notes
            .iter()
            .find(|n| n.label.contains("CAPRA"))
            .expect("warn note for CAPRA");
        assert_eq!(capra.severity, crate::types::Severity::Warn);
        assert_eq!(out.notes.len(), CATEGORIES.len() - 1);
    }

    #[test]
    fn test_per_category_tag_defaults_to_category() {
        let mut sheets = GridSheets::new(vec![(
            "KALMES".into(),
            vec![vec![s(""), s("MEHMET KAYA")]],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].tag, "KALMES");
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut sheets = GridSheets::new(vec![(
            "TÜM LİSTE".into(),
            vec![
                vec![s("ADI")],
                vec![s("1"), s("AHMET YILMAZ"), s("USTA")],
                vec![s("2"), s("AHMET YILMAZ"), s("KALIP")],
            ],
        )]);

        let out = extract_inventory(&mut sheets);
        assert_eq!(out.records.len(), 2);
    }
}
