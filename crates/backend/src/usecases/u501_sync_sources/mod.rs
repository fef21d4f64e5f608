pub mod executor;
pub mod graph_client;

pub use executor::{sync_all, RemoteStore};
