pub mod browser;
pub mod collector;
pub mod config;
pub mod extract;
pub mod models;
pub mod persist;
pub mod utils;

// Re-export commonly used types
pub use config::ScrapeConfig;
pub use models::ListingRecord;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
