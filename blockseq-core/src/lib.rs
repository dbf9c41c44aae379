//! Core traits and types for blockseq containers.
//!
//! This crate holds what every container implementation shares: the error
//! taxonomy, the capability traits a cursor and generic callers program
//! against, and the growth policy configuration.
//!
//! # Features
//!
//! - `yaml` (default): load a [`GrowthPolicy`] from YAML text or files
//! - `logging`: [`logger::init_logging`] bootstrap for applications

pub mod api;
pub mod config;
pub mod error;
#[cfg(feature = "logging")]
pub mod logger;

pub use api::{CursorMutation, ListMutation, LiveSequence};
pub use config::{DEFAULT_GROWTH_BLOCK, DEFAULT_INITIAL_BLOCK, GrowthPolicy, GrowthSettings};
pub use error::{Error, Result};
