#![forbid(unsafe_code)]

//! File-backed persistence for the ecosystem catalog: per-project YAML
//! aggregation, the JSON dataset envelope, and viewer preferences.

mod dataset;
mod error;
mod prefs;

pub use dataset::*;
pub use error::{DatasetError, PrefsError};
pub use prefs::{PrefsStore, Theme};
