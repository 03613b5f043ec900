pub mod connection_pool;
mod mappers;
mod queries;
mod rows;
pub mod sqlite_store;

pub use connection_pool::ConnectionPool;
pub use sqlite_store::SqliteApplicationStore;
