//! Shared foundation for the Rollcall attendance tracker
//!
//! Provides the error taxonomy, data-folder resolution, and the SQLite
//! persistence layer used by the web service.

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};

/// Hours credited to a student for a session they attended.
/// Absent students are credited 0.
pub const HOURS_PER_SESSION: i64 = 4;
