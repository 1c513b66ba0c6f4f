//! KeyValueStore implementations

pub mod kv_store_repository;
pub mod memory_store;

pub use kv_store_repository::SeaOrmKeyValueStore;
pub use memory_store::MemoryKeyValueStore;
