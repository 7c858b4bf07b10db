//! Module provides various helper functionality.

pub mod config;
pub mod export;
pub mod import;
