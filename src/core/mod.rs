//! Core types and constants for the lake mapper

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
