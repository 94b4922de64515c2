pub mod config;
pub mod document;
pub mod errors;
pub mod holiday_processor;
pub mod lookup;
pub mod months;
pub mod persist;
pub mod scraper_client;
pub mod server;
pub mod snapshot;
pub mod store;
