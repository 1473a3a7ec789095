pub mod allocator;
pub mod app_config;
pub mod memory;
pub mod rules;
pub mod table;

pub use memory::MemoryStore;
