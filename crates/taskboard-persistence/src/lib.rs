pub mod record;
pub mod session;
pub mod store;
pub mod traits;
pub mod write_through;

pub use record::RecordTable;
pub use session::BoardSession;
pub use store::*;
pub use traits::*;
pub use write_through::WriteThrough;
