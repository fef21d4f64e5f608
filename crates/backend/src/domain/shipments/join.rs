use std::collections::HashMap;

use super::{DISPLAY_RENAMES, READ_COLUMNS};
use crate::domain::error::Result;
use crate::domain::tabular::{CellValue, Table};

/// Left join: every purchase row appears exactly once and in input order,
/// with reference columns filled from the (unique-key) lookup or left null.
/// Reference columns whose name collides with a purchase column are skipped,
/// the purchase value wins.
pub fn left_join(purchases: &Table, reference: &Table, key: &str) -> Result<Table> {
    purchases.require(&[key])?;
    reference.require(&[key])?;
    let left_key = purchases.column_idx(key).unwrap();
    let right_key = reference.column_idx(key).unwrap();

    let carried: Vec<usize> = reference
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, name)| *i != right_key && purchases.column_idx(name).is_none())
        .map(|(i, _)| i)
        .collect();

    // Keys are unique after dedup; keep the first occurrence regardless.
    let mut lookup: HashMap<String, usize> = HashMap::with_capacity(reference.len());
    for (i, row) in reference.rows().iter().enumerate() {
        if let Some(k) = row[right_key].join_key() {
            lookup.entry(k).or_insert(i);
        }
    }

    let mut columns = purchases.columns().to_vec();
    columns.extend(carried.iter().map(|&i| reference.columns()[i].clone()));
    let mut out = Table::new(columns);

    for row in purchases.rows() {
        let mut joined = row.clone();
        let matched = row[left_key]
            .join_key()
            .and_then(|k| lookup.get(&k))
            .map(|&i| &reference.rows()[i]);
        match matched {
            Some(right) => joined.extend(carried.iter().map(|&i| right[i].clone())),
            None => joined.extend(carried.iter().map(|_| CellValue::Null)),
        }
        out.push_row(joined);
    }
    Ok(out)
}

/// Read path: coerce the monetary columns (fallback 0), then derive
/// `Sub Total = PCU1 * Cantidad` and `Precio Total = Sub Total + Flete_US$`.
pub fn normalize_for_read(joined: &mut Table) -> Result<()> {
    joined.require(&["PCU1", "Cantidad", "Flete_US$"])?;
    let mut coerced: HashMap<&str, Vec<f64>> = HashMap::new();
    for col in ["PCU1", "Cantidad", "Flete_US$"] {
        let idx = joined.column_idx(col).unwrap();
        let values: Vec<f64> = joined
            .rows()
            .iter()
            .map(|row| row[idx].to_f64_or_zero())
            .collect();
        coerced.insert(col, values);
    }

    let pcu = coerced.remove("PCU1").unwrap();
    let cantidad = coerced.remove("Cantidad").unwrap();
    let flete = coerced.remove("Flete_US$").unwrap();

    let sub_total: Vec<f64> = pcu
        .iter()
        .zip(cantidad.iter())
        .map(|(p, c)| p * c)
        .collect();
    let precio_total: Vec<f64> = sub_total
        .iter()
        .zip(flete.iter())
        .map(|(s, f)| s + f)
        .collect();

    overwrite_numeric(joined, "PCU1", pcu);
    overwrite_numeric(joined, "Cantidad", cantidad);
    overwrite_numeric(joined, "Flete_US$", flete);
    joined.add_column(
        "Sub Total",
        sub_total.into_iter().map(CellValue::Number).collect(),
    );
    joined.add_column(
        "Precio Total",
        precio_total.into_iter().map(CellValue::Number).collect(),
    );
    Ok(())
}

/// Export path skips coercion: the spreadsheet recomputes both fields with
/// live formulas, so the columns only need to exist for the projection.
pub fn prepare_for_export(joined: &mut Table) {
    let zeros = |n: usize| vec![CellValue::Number(0.0); n];
    joined.add_column("Sub Total", zeros(joined.len()));
    joined.add_column("Precio Total", zeros(joined.len()));
    joined.rename(&DISPLAY_RENAMES);
}

/// Read path projection: fixed column set, then display renames.
pub fn project_for_read(joined: &Table) -> Result<Table> {
    let mut projected = joined.select(&READ_COLUMNS)?;
    projected.rename(&DISPLAY_RENAMES);
    Ok(projected)
}

fn overwrite_numeric(table: &mut Table, column: &str, values: Vec<f64>) {
    let idx = table.column_idx(column).unwrap();
    for (row, value) in table.rows_mut().iter_mut().zip(values) {
        row[idx] = CellValue::Number(value);
    }
}
