// Adapters layer: concrete implementations for external systems (filesystem, user table).

pub mod storage;
pub mod users;

pub use storage::LocalStorage;
pub use users::FileUserDirectory;
