pub mod json_file_store;
pub mod memory_store;
#[cfg(feature = "sqlite")]
pub mod sqlite_store;
pub mod table_file;

pub use json_file_store::{JsonEnvelope, JsonFileStore, FORMAT_VERSION};
pub use memory_store::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteStore;
