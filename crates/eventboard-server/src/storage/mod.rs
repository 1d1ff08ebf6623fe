// Storage layer for the catalog server
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: sqlx repositories, one transaction per mutation
// - InMemoryDatabase: the same API over a single lock
// - StorageBackend: enum dispatch between the two

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
