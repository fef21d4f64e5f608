use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};

use super::{CellValue, Table};
use crate::domain::error::{PipelineError, Result};

/// Reads a tabular sheet region into a [`Table`].
///
/// `skip_rows` banner rows are discarded, the next row becomes the header,
/// and the first `drop_cols` columns are removed (sources pad the sheet with
/// a decorative leading column). `sheet` defaults to the first sheet of the
/// workbook.
pub fn load_table(
    path: &Path,
    sheet: Option<&str>,
    skip_rows: usize,
    drop_cols: usize,
) -> Result<Table> {
    if !path.exists() {
        return Err(PipelineError::SourceNotFound(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PipelineError::SourceNotFound(path.to_path_buf()))?,
    };
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows().skip(skip_rows);
    let header = match rows.next() {
        Some(cells) => cells,
        // Nothing left after the banner: an empty table, downstream schema
        // checks will report the missing columns.
        None => return Ok(Table::new(Vec::new())),
    };

    let columns: Vec<String> = header
        .iter()
        .skip(drop_cols)
        .map(|c| CellValue::from(c).display_or_empty())
        .collect();

    let mut table = Table::new(columns);
    for cells in rows {
        let row: Vec<CellValue> = cells.iter().skip(drop_cols).map(CellValue::from).collect();
        table.push_row(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_sheet(path: &Path) {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Datos").unwrap();
        // Two banner rows, then a header with a decorative leading column.
        ws.write_string(0, 0, "REPORTE").unwrap();
        ws.write_string(1, 0, "generado 2024").unwrap();
        ws.write_string(2, 0, "").unwrap();
        ws.write_string(2, 1, "Modelo").unwrap();
        ws.write_string(2, 2, "Codigo").unwrap();
        ws.write_string(3, 1, "M1").unwrap();
        ws.write_number(3, 2, 100.0).unwrap();
        ws.write_string(4, 1, "M2").unwrap();
        ws.write_string(4, 2, "C-2").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn loads_header_and_rows_after_skip_and_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fuente.xlsx");
        write_sheet(&path);

        let table = load_table(&path, Some("Datos"), 2, 1).unwrap();
        assert_eq!(table.columns(), &["Modelo".to_string(), "Codigo".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "Modelo"), Some(&CellValue::Text("M1".to_string())));
        assert_eq!(table.get(0, "Codigo"), Some(&CellValue::Number(100.0)));
        assert_eq!(table.get(1, "Codigo"), Some(&CellValue::Text("C-2".to_string())));
    }

    #[test]
    fn defaults_to_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fuente.xlsx");
        write_sheet(&path);

        let table = load_table(&path, None, 2, 1).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-existe.xlsx");
        match load_table(&path, None, 0, 0) {
            Err(PipelineError::SourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
