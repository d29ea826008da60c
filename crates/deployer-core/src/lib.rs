//! Static Deployer Core Library
//!
//! Domain types, request validation, payload shaping, response normalization
//! and the bounded deployment history ledger.

pub mod error;
pub mod ledger;
pub mod memory;
pub mod normalize;
pub mod payload;
pub mod ports;
pub mod slug;
pub mod types;
pub mod validate;

pub use error::{DeployError, Result, ValidationError};
pub use ledger::{HistoryLedger, DEFAULT_HISTORY_KEY, HISTORY_CAP};
pub use memory::MemoryListStore;
pub use normalize::normalize;
pub use payload::build_payload;
pub use ports::{DeploymentClient, ListStore};
pub use slug::{sanitize, DEFAULT_PROJECT_NAME};
pub use types::*;
pub use validate::{ProjectNamePolicy, RequestValidator};
