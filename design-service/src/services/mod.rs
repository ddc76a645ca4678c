pub mod database;
pub mod memory;
pub mod providers;
pub mod store;

pub use database::MongoDb;
pub use memory::MemoryStore;
pub use store::DesignStore;
