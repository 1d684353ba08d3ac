//! Process-tracking extraction
//!
//! The tracking sheet is the one domain with no safe positional fallback:
//! without the "S.NU" header token there is no way to tell tracking rows
//! from the surrounding report prose, so a missing sheet or header row
//! aborts the load.

use anyhow::{Result, bail};
use calamine::Data;

use super::cell::{cell_scalar, cell_text};
use super::header::{FieldSpec, Header, HeaderHints, resolve_header};
use super::sheet::{SheetSpec, locate_sheet, rows_contain_token};
use super::{Extracted, Sheets};
use crate::types::ProcessRecord;

/// The unlabeled reference/owner column sits at a fixed position right of
/// the labeled block.
const REFERENCE_COL: usize = 6;

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "s_nu", hints: &[&["S.NU"]], default_col: 0 },
    FieldSpec { name: "name", hints: &[&["SOYADI"]], default_col: 1 },
    FieldSpec { name: "job", hints: &[&["MESLEĞİ"]], default_col: 2 },
    FieldSpec { name: "app_no", hints: &[&["BAŞVURU"]], default_col: 3 },
    FieldSpec { name: "status", hints: &[&["DURUMU"]], default_col: 4 },
    FieldSpec { name: "description", hints: &[&["AÇIKLAMA"]], default_col: 5 },
];

fn sniff_snu(rows: &[Vec<Data>]) -> bool {
    rows_contain_token(rows, "S.NU")
}

/// Extract process-tracking records. Errors are fatal for this domain.
pub fn extract_process(sheets: &mut dyn Sheets) -> Result<Extracted<ProcessRecord>> {
    let names = sheets.sheet_names();
    let spec = SheetSpec {
        name_hints: &["GÜNCEL"],
        sniff: Some(sniff_snu),
    };
    let Some(sheet_name) = locate_sheet(&names, &spec, |n| sheets.rows(n)) else {
        bail!("Takip çizelgesi sayfası (\"GÜNCEL\" veya \"S.NU\" içeren) bulunamadı.");
    };

    let Some(rows) = sheets.rows(&sheet_name) else {
        bail!("Takip çizelgesi sayfası \"{}\" okunamadı.", sheet_name);
    };

    let hints = HeaderHints {
        row_tokens: &[],
        exact_token: Some("S.NU"),
        fields: FIELDS,
    };
    let Some(header) = resolve_header(&rows, &hints) else {
        bail!("\"S.NU\" başlık satırı bulunamadı.");
    };

    let out = extract_rows(&rows, &header);
    log::info!(
        "process: {} records from sheet '{}' (header row {})",
        out.records.len(),
        sheet_name,
        header.row
    );
    Ok(out)
}

fn extract_rows(rows: &[Vec<Data>], header: &Header) -> Extracted<ProcessRecord> {
    let mut out = Extracted::default();

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

        // Tracking number falls back to the first column when the header
        // cell was merged away
        let mut s_nu = cell_scalar(row, header.col("s_nu"));
        if s_nu.is_missing() {
            s_nu = cell_scalar(row, 0);
        }

        out.records.push(ProcessRecord {
            s_nu,
            full_name: name.to_uppercase(),
            job: cell_scalar(row, header.col("job")),
            app_no: cell_scalar(row, header.col("app_no")),
            status: cell_scalar(row, header.col("status")),
            description: cell_scalar(row, header.col("description")),
            reference: cell_scalar(row, REFERENCE_COL),
            extra: Default::default(),
        });
    }

    out
}
