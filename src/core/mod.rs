//! Core business logic module
//!
//! This module contains the survey storage components:
//! - `traits` - The key-value store abstraction the response store is built on
//! - `memory_store` - DashMap-backed in-memory store
//! - `file_store` - One-file-per-key store with atomic replacement
//! - `response_store` - Load-all and append operations over the CSV document
//! - `validator` - Field rules applied before a submission becomes a record
//! - `auth` - Admin password gate for exports
//! - `statistics` - Counts by region and occupation
//! - `async` - Single-writer append queue

pub mod r#async;
pub mod auth;
pub mod file_store;
pub mod memory_store;
pub mod response_store;
pub mod statistics;
pub mod traits;
pub mod validator;

pub use auth::AdminGate;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use r#async::AppendQueue;
pub use response_store::{ResponseStore, DEFAULT_STORAGE_KEY};
pub use statistics::{write_statistics_csv, Statistics};
pub use traits::KeyValueStore;
