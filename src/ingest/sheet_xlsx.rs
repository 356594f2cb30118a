use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::Path;
use tracing::debug;

use super::{RawRow, RawSheet};

/// Parse the first worksheet of an Excel workbook into a `RawSheet`. Empty
/// cells in the grid are left out of the row map entirely so that alias
/// resolution can distinguish an absent cell from an empty one.
pub fn load(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook {} has no worksheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet `{}` in {}", sheet_name, path.display()))?;

    let mut grid = range.rows();
    let headers: Vec<String> = grid
        .next()
        .map(|row| {
            row.iter()
                .map(|c| c.as_string().unwrap_or_default().trim().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for row in grid {
        let mut cells = RawRow::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() || cell.is_empty() {
                continue;
            }
            if let Some(text) = cell.as_string() {
                cells.insert(header.clone(), text);
            }
        }
        // trailing blank rows below the data are common in exported sheets
        if cells.is_empty() {
            continue;
        }
        rows.push(cells);
    }

    let headers: Vec<String> = headers.into_iter().filter(|h| !h.is_empty()).collect();
    debug!(file = %path.display(), sheet = %sheet_name, rows = rows.len(), "parsed XLSX sheet");
    Ok(RawSheet { headers, rows })
}
