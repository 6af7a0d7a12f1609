//! # Constants
//! Constant values used by the photometric models.
//!
mod universal;

pub use universal::*;
