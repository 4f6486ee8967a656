#![forbid(unsafe_code)]

mod aggregate;
mod file;

pub use aggregate::*;
pub use file::*;
