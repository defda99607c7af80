pub mod config;
pub mod error;
pub mod result;

pub use config::{AppConfig, RetryPolicy};
pub use error::TaskboardError;
pub use result::TaskboardResult;
