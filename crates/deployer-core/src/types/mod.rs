//! Core domain types

pub mod deployment;
pub mod history;

pub use deployment::*;
pub use history::*;
