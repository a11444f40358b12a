//! Persistence boundary: loading and saving whole ledgers.

pub mod memory;
pub mod repository;

pub use memory::MemoryRepository;
pub use repository::LedgerRepository;
