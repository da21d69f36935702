//! # CSG Common Library
//!
//! Shared code for the Chromatic Scale Generator crates:
//! - Error type
//! - TOML configuration loading and root folder resolution
//! - Logging initialisation
//! - Generation constants (note names, ranges, reserved output name)

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
