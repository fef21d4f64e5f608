//! Minimal dynamic-table engine: named columns over untyped cells, loaded
//! from xlsx sheet regions. The shipment pipeline builds on these pieces.

pub mod cell;
pub mod loader;
pub mod table;

pub use cell::CellValue;
pub use loader::load_table;
pub use table::Table;
