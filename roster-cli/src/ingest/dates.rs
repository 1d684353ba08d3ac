//! Date normalization for spreadsheet values
//!
//! The sources mix three date shapes: Excel serial numbers, `DD.MM.YYYY`
//! text (occasionally with `/` separators or single-digit day/month), and
//! plain prose that happens to contain a date. Everything funnels through
//! `normalize_date` so the extractors and the deadline augmenter agree on
//! what a cell means.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Scalar;

/// Day 0 of the Excel serial calendar. Serial 25569 is 1970-01-01.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// `D.M.YYYY` / `DD/MM/YYYY` substring anywhere in the text.
static TEXT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[./](\d{1,2})[./](\d{4})").unwrap());

/// Convert an Excel date serial to a calendar date.
///
/// The fractional part (time of day) is truncated. Serials before day 1
/// or absurdly far out are rejected rather than mapped to nonsense dates.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 200_000.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(EXCEL_EPOCH.0, EXCEL_EPOCH.1, EXCEL_EPOCH.2)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Scan text for a `DD.MM.YYYY`-shaped substring and parse it.
pub fn parse_text_date(text: &str) -> Option<NaiveDate> {
    let caps = TEXT_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalize any cell scalar to a calendar date, if one is extractable.
pub fn normalize_date(value: &Scalar) -> Option<NaiveDate> {
    match value {
        Scalar::Number(n) => excel_serial_to_date(*n),
        Scalar::Text(s) => parse_text_date(s),
        Scalar::Null => None,
    }
}

/// Render a date in the `DD.MM.YYYY` form the source spreadsheets use.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_epoch_offsets() {
        // 25569 days after 1899-12-30 is the Unix epoch
        assert_eq!(
            excel_serial_to_date(25569.0),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        // The documented reference serial from the source data
        assert_eq!(
            excel_serial_to_date(45000.0),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
    }

    #[test]
    fn test_serial_fraction_truncated() {
        assert_eq!(
            excel_serial_to_date(45000.9),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
    }

    #[test]
    fn test_serial_out_of_range() {
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(-5.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn test_text_date_grammar() {
        assert_eq!(
            parse_text_date("15.03.2023"),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(
            parse_text_date("1/2/2024"),
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        // Date embedded in prose
        assert_eq!(
            parse_text_date("RANDEVU 05.12.2025 SAAT 10:00"),
            NaiveDate::from_ymd_opt(2025, 12, 5)
        );
        assert_eq!(parse_text_date("BEKLEMEDE"), None);
        // Invalid calendar date
        assert_eq!(parse_text_date("31.02.2023"), None);
    }

    #[test]
    fn test_normalize_dispatch() {
        assert_eq!(
            normalize_date(&Scalar::Number(45000.0)),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(
            normalize_date(&Scalar::Text("15.03.2023".into())),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(normalize_date(&Scalar::Null), None);
    }

    #[test]
    fn test_format_roundtrip() {
        let d = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
        assert_eq!(format_date(d), "15.03.2023");
        assert_eq!(parse_text_date(&format_date(d)), Some(d));
    }
}
