//! Core types and utilities shared by the amoeba evolutionary sandbox.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use types::*;
