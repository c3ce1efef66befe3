pub mod app;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod storage;
#[cfg(test)]
mod test_support;
pub mod today;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::LogStore;
