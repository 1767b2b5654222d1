//! User settings and their on-disk JSON file.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
