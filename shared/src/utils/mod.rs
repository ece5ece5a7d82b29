//! Common utility functions

pub mod phone;

// Re-export commonly used utilities
pub use phone::*;
