//! Panel configuration
//!
//! [`GridConfig`] is built in code or, with the `toml` feature, loaded
//! from a TOML document.

#[cfg(feature = "toml")]
pub mod loader;
pub mod types;

pub use types::*;
