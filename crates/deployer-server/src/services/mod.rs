//! Business logic services

pub mod deploy;

pub use deploy::DeploymentService;
