pub mod u501_sync_sources;
pub mod u502_shipment_query;
pub mod u503_export_workbook;

#[cfg(test)]
pub mod test_fixtures;
