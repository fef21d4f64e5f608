pub mod error;
pub mod shipments;
pub mod tabular;
