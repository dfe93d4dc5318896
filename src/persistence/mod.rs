//! Persisted account state
//!
//! Everything lives in the key-value store as whole records:
//! - `users`: JSON array of accounts
//! - `currentUser`: plain username of the logged-in account
//! - `attempts_<name>` / `lock_<name>`: failed-login bookkeeping
//!
//! Reads never fail. Missing or corrupt values degrade to "nothing stored".

pub mod attempts;
pub mod users;

pub use attempts::{AttemptStore, LoginAttemptRecord};
pub use users::{User, UserStore};
