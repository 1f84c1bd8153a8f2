//! Utility and helper functions needed for:
//! - Error handling
//! - Fixed point arithmetic
//! - Type casting

pub(crate) mod common;
pub(crate) mod error;
