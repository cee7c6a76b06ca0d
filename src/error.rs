//! Error handling for REP operations
//!
//! This module re-exports the error type and result alias defined in
//! [`crate::common`] so that callers can import them from a dedicated path.

pub use crate::common::RepError;
pub use crate::common::Result;
