//! Outbound API clients

pub mod vercel;

pub use vercel::VercelClient;
