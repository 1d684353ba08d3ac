//! Departure record extraction with exit-month bucketing

use calamine::Data;
use chrono::Datelike;

use super::cell::{cell_scalar, cell_string, cell_text};
use super::dates::normalize_date;
use super::header::{FieldSpec, Header, HeaderHints, resolve_header};
use super::{Extracted, Sheets};
use crate::types::{DepartureRecord, QualityNote};

/// Turkish month names in calendar order.
pub const MONTHS_TR: [&str; 12] = [
    "OCAK", "ŞUBAT", "MART", "NİSAN", "MAYIS", "HAZİRAN", "TEMMUZ", "AĞUSTOS", "EYLÜL", "EKİM",
    "KASIM", "ARALIK",
];

/// Bucket for records whose exit date cannot be parsed.
pub const UNDETERMINED_MONTH: &str = "BELİRSİZ";

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", hints: &[&["ADI"], &["PERSONEL"]], default_col: 0 },
    FieldSpec { name: "entry", hints: &[&["GİRİŞ", "TARİH"]], default_col: 1 },
    FieldSpec { name: "exit", hints: &[&["ÇIKIŞ", "TARİH"]], default_col: 2 },
    FieldSpec { name: "reason", hints: &[&["NEDEN"], &["SEBEP"]], default_col: 3 },
    FieldSpec { name: "category", hints: &[&["KATEGORİ"], &["GRUP"]], default_col: 4 },
];

/// Extract departure records from the first sheet. Never aborts the load.
pub fn extract_departures(sheets: &mut dyn Sheets) -> Extracted<DepartureRecord> {
    let mut out = Extracted::default();

    let names = sheets.sheet_names();
    let Some(sheet_name) = names.first().cloned() else {
        out.notes.push(QualityNote::fail(
            "Ayrılanlar Sayfası",
            "Excel'de sayfa bulunamadı.",
        ));
        return out;
    };

    let Some(rows) = sheets.rows(&sheet_name) else {
        out.notes.push(QualityNote::fail(
            "Ayrılanlar Sayfası",
            format!("\"{}\" sayfası okunamadı.", sheet_name),
        ));
        return out;
    };

    let hints = HeaderHints {
        row_tokens: &["ADI", "SOYADI", "PERSONEL"],
        exact_token: None,
        fields: FIELDS,
    };
    let Some(header) = resolve_header(&rows, &hints) else {
        return out;
    };

    extract_rows(&rows, &header, &mut out);

    if out.records.is_empty() {
        out.notes
            .push(QualityNote::warn("Ayrılanlar", "Kayıt bulunamadı."));
    } else {
        out.notes.push(QualityNote::ok(
            "Ayrılanlar",
            format!("{} ayrılan personel kaydı yüklendi.", out.records.len()),
        ));
    }
    out
}

fn extract_rows(rows: &[Vec<Data>], header: &Header, out: &mut Extracted<DepartureRecord>) {
    for row in rows.iter().skip(header.row + 1) {
        if row.is_empty() {
            continue;
        }
        let Some(name) = cell_text(row, header.col("name")) else {
            continue;
        };
        if name.chars().count() < 2 {
            continue;
        }
        let name_upper = name.to_uppercase();
        if name_upper.contains("ADI") || name_upper.contains("PERSONEL") {
            continue;
        }

        let exit_date = cell_scalar(row, header.col("exit"));
        let exit_month = normalize_date(&exit_date)
            .map(|d| MONTHS_TR[d.month0() as usize].to_string())
            .unwrap_or_else(|| UNDETERMINED_MONTH.to_string());

        out.records.push(DepartureRecord {
            full_name: name_upper,
            entry_date: cell_scalar(row, header.col("entry")),
            exit_date,
            exit_month,
            reason: cell_scalar(row, header.col("reason")),
            category: cell_string(row, header.col("category")).trim().to_uppercase(),
            extra: Default::default(),
        });
    }
}
