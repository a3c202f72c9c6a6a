mod error;

pub mod config;
pub mod path;
pub mod pattern;

pub use error::{Error, Result};
