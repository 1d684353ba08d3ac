//! Workbook retrieval and sheet materialization
//!
//! Sources are fetched whole (HTTP or local file) and parsed from memory.
//! Sheets materialize as A1-anchored row grids: calamine ranges start at
//! the first occupied cell, so leading empty rows/columns are padded back
//! in — the fixed-column conventions in the extractors depend on absolute
//! positions.

use std::io::Cursor;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx};

use crate::ingest::Sheets;

/// Fetch and open a workbook from an HTTP(S) URL or a local path.
pub async fn fetch_workbook(path: &str) -> Result<Workbook> {
    let bytes = fetch_bytes(path).await?;
    Workbook::from_bytes(bytes).with_context(|| format!("Veri Yükleme Hatası: {}", path))
}

async fn fetch_bytes(path: &str) -> Result<Vec<u8>> {
    if path.starts_with("http://") || path.starts_with("https://") {
        let response = reqwest::get(path)
            .await
            .with_context(|| format!("Dosya indirilemedi: {}", path))?;
        let status = response.status();
        if !status.is_success() {
            bail!("Dosya indirilemedi: {} (Kod: {})", path, status.as_u16());
        }
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Dosya indirilemedi: {}", path))?;
        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(path)
            .await
            .with_context(|| format!("Dosya okunamadı: {}", path))
    }
}

/// An opened workbook.
pub struct Workbook {
    inner: Xlsx<Cursor<Vec<u8>>>,
}

impl Workbook {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let inner = Xlsx::new(Cursor::new(bytes)).context("Geçersiz Excel dosyası")?;
        Ok(Self { inner })
    }
}

impl Sheets for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    fn rows(&mut self, name: &str) -> Option<Vec<Vec<Data>>> {
        let range = match self.inner.worksheet_range(name) {
            Ok(range) => range,
            Err(err) => {
                log::warn!("failed to read sheet '{}': {}", name, err);
                return None;
            }
        };

        let Some(start) = range.start() else {
            return Some(Vec::new());
        };
        let (start_row, start_col) = (start.0 as usize, start.1 as usize);

        let mut grid: Vec<Vec<Data>> = vec![Vec::new(); start_row];
        for row in range.rows() {
            let mut padded = vec![Data::Empty; start_col];
            padded.extend(row.iter().cloned());
            grid.push(padded);
        }
        Some(grid)
    }
}
