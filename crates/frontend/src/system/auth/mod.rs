pub mod api;
pub mod context;
pub mod guard;
pub mod storage;

pub use storage::LocalStorageSession;
