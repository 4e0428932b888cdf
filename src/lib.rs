//! # User Records
//!
//! Minimal persistence for user entities: each user (id, name, balance) is
//! stored as a two-line text file `<id>.txt` inside a storage directory.
//!
//! ## Pieces
//!
//! - **Configuration** - storage directory and id range → [`StorageConfig`]
//! - **Storage** - path mapping, id generation, locked reads and writes → [`UserStorage`]
//! - **Entity** - validated in-memory record with load/save → [`UserRecord`]
//! - **Errors** - one typed error for every failure → [`UserError`]
//! - **Tracing** - subscriber setup for binaries → [`setup_tracing`]
//!
//! ## Example
//!
//! ```no_run
//! use user_records::{StorageConfig, UserRecord, UserStorage};
//!
//! # fn main() -> user_records::Result<()> {
//! let storage = UserStorage::new(StorageConfig::new("users"))?;
//!
//! let mut user = UserRecord::new(storage.clone());
//! let id = user.create("Alice", 100.0)?;
//! user.decrease_balance(30.0)?;
//! user.save()?;
//!
//! let reloaded = UserRecord::open(storage, id)?;
//! assert_eq!(reloaded.balance(), 70.0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;
pub mod telemetry;


pub use config::StorageConfig;
pub use domain::{validate_balance, validate_name, UserRecord, MAX_NAME_LEN};
pub use error::{Result, UserError};
pub use storage::UserStorage;
pub use telemetry::setup_tracing;
