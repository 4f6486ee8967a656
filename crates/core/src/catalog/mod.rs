#![forbid(unsafe_code)]

mod state;
mod view;

pub use state::*;
pub use view::*;
