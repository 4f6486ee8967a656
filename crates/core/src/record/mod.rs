#![forbid(unsafe_code)]

mod types;
mod web;

pub use types::*;
pub use web::*;
