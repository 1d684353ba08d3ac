//! Cell coercion helpers shared by the record extractors

use calamine::Data;

use crate::types::Scalar;

/// Coerce a cell to a display string (whole-number floats print as integers).
pub fn cell_string(row: &[Data], col: usize) -> String {
    row.get(col)
        .map(|c| match c {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                if f.fract() == 0.0 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => dt.as_f64().to_string(),
            _ => String::new(),
        })
        .unwrap_or_default()
}

/// Coerce a cell to a scalar, keeping the text/number distinction that the
/// date and identity logic depend on.
pub fn cell_scalar(row: &[Data], col: usize) -> Scalar {
    match row.get(col) {
        Some(Data::String(s)) if !s.trim().is_empty() => Scalar::Text(s.clone()),
        Some(Data::Int(i)) => Scalar::Number(*i as f64),
        Some(Data::Float(f)) => Scalar::Number(*f),
        Some(Data::DateTime(dt)) => Scalar::Number(dt.as_f64()),
        Some(Data::Bool(b)) => Scalar::Text(b.to_string()),
        _ => Scalar::Null,
    }
}

/// The trimmed text of a cell, or `None` for anything that is not text.
///
/// Name admission deliberately rejects non-text cells, so numbers never
/// become names.
pub fn cell_text(row: &[Data], col: usize) -> Option<&str> {
    match row.get(col) {
        Some(Data::String(s)) => Some(s.trim()),
        _ => None,
    }
}

/// True when every cell in the row is empty or blank text.
pub fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_string_coercions() {
        let row = vec![
            Data::String("AHMET".into()),
            Data::Float(42.0),
            Data::Float(3.5),
            Data::Int(7),
            Data::Empty,
        ];
        assert_eq!(cell_string(&row, 0), "AHMET");
        assert_eq!(cell_string(&row, 1), "42");
        assert_eq!(cell_string(&row, 2), "3.5");
        assert_eq!(cell_string(&row, 3), "7");
        assert_eq!(cell_string(&row, 4), "");
        assert_eq!(cell_string(&row, 99), "");
    }

    #[test]
    fn test_cell_scalar_keeps_kinds() {
        let row = vec![
            Data::Float(45000.0),
            Data::String("15.03.2023".into()),
            Data::String("  ".into()),
        ];
        assert_eq!(cell_scalar(&row, 0), Scalar::Number(45000.0));
        assert_eq!(cell_scalar(&row, 1), Scalar::Text("15.03.2023".into()));
        assert_eq!(cell_scalar(&row, 2), Scalar::Null);
        assert_eq!(cell_scalar(&row, 9), Scalar::Null);
    }

    #[test]
    fn test_cell_text_rejects_numbers() {
        let row = vec![Data::Float(12.0), Data::String(" ALİ VELİ ".into())];
        assert_eq!(cell_text(&row, 0), None);
        assert_eq!(cell_text(&row, 1), Some("ALİ VELİ"));
    }

    #[test]
    fn test_row_is_blank() {
        assert!(row_is_blank(&[Data::Empty, Data::String("  ".into())]));
        assert!(!row_is_blank(&[Data::Empty, Data::Int(1)]));
    }
}
