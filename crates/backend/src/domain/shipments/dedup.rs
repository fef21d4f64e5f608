use std::collections::HashSet;

use super::{COL_CODIGO, COL_MODELO, JOIN_KEY};
use crate::domain::error::Result;
use crate::domain::tabular::{CellValue, Table};

/// Cleans the translation table into a unique-key lookup.
///
/// Two stable first-occurrence passes, in this exact order:
/// 1. by the composite key `Modelo-Codigo`,
/// 2. by `Modelo` alone (the binding constraint, applied second).
///
/// The order matters: it decides which duplicate survives when a composite
/// clash and a model clash overlap. The surviving `Modelo` is then copied
/// into a new `Codigo_Comercial` column, the join key against purchases.
pub fn dedup_reference(reference: &Table) -> Result<Table> {
    reference.require(&[COL_MODELO, COL_CODIGO])?;
    let modelo_idx = reference.column_idx(COL_MODELO).unwrap();
    let codigo_idx = reference.column_idx(COL_CODIGO).unwrap();

    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut seen_models: HashSet<String> = HashSet::new();
    let mut out = Table::new(reference.columns().to_vec());
    let mut join_keys: Vec<CellValue> = Vec::new();

    for row in reference.rows() {
        let modelo = row[modelo_idx].display_or_empty();
        let codigo = row[codigo_idx].display_or_empty();
        let composite = format!("{modelo}-{codigo}");
        if !seen_keys.insert(composite) {
            continue;
        }
        if !seen_models.insert(modelo) {
            continue;
        }
        join_keys.push(row[modelo_idx].clone());
        out.push_row(row.clone());
    }

    out.add_column(JOIN_KEY, join_keys);
    Ok(out)
}
