//! Error types

mod config;
mod source;
mod view;

pub use config::*;
pub use source::*;
pub use view::*;
