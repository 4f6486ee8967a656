#![forbid(unsafe_code)]

mod dimension;
mod groups;
mod index;

pub use dimension::*;
pub use groups::*;
pub use index::*;
