pub mod config;
pub mod fitment;
pub mod history;
pub mod ingest;
pub mod normalize;
pub mod store;
