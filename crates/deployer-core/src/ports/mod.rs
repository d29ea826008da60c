//! Port traits (interfaces) for dependency injection

pub mod deploy;
pub mod storage;

pub use deploy::DeploymentClient;
pub use storage::ListStore;
