//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (epoch milliseconds)
//! - Storage (LocalStorage on web, in-memory map natively)

pub mod storage;
pub mod time;

pub use storage::{KeyValueStore, MemoryStorage};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use time::now_ms;
