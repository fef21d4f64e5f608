use contracts::api::{DataResponse, QueryMode};
use serde_json::{Map, Value};

use crate::domain::error::Result;
use crate::domain::shipments::{
    dedup::dedup_reference,
    filter::{filter_rows, summarize},
    join::{left_join, normalize_for_read, project_for_read},
    JOIN_KEY, PURCHASES_SKIP_ROWS, REFERENCE_DROP_COLS, REFERENCE_SHEET, REFERENCE_SKIP_ROWS,
};
use crate::domain::tabular::{load_table, Table};
use crate::shared::config::Config;

/// Loads both sources fresh from disk and joins them. Shared by the read
/// and the export paths; nothing derived is cached between requests.
pub fn load_joined(config: &Config) -> Result<Table> {
    let reference = load_table(
        &config.files.reference_path(),
        Some(REFERENCE_SHEET),
        REFERENCE_SKIP_ROWS,
        REFERENCE_DROP_COLS,
    )?;
    let reference = dedup_reference(&reference)?;
    let purchases = load_table(&config.files.purchases_path(), None, PURCHASES_SKIP_ROWS, 0)?;
    left_join(&purchases, &reference, JOIN_KEY)
}

/// Read path: join, normalize, project, filter, summarize. An empty filter
/// result is a 200 with a message, never an error.
pub fn run(config: &Config, mode: QueryMode, value: &str) -> Result<DataResponse> {
    let mut joined = load_joined(config)?;
    normalize_for_read(&mut joined)?;
    let projected = project_for_read(&joined)?;
    let filtered = filter_rows(&projected, mode, value)?;

    if filtered.is_empty() {
        return Ok(DataResponse {
            data: vec![],
            info: None,
            mensaje: Some(format!(
                "No se encontraron resultados para {}: {}",
                mode.as_str(),
                value
            )),
        });
    }

    let info = summarize(&filtered);
    let data = rows_to_json(&filtered);
    Ok(DataResponse {
        data,
        info,
        mensaje: None,
    })
}

fn rows_to_json(table: &Table) -> Vec<Map<String, Value>> {
    table
        .rows()
        .iter()
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), cell.to_json()))
                .collect()
        })
        .collect()
}
