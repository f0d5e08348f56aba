//! Common utility functions shared across the domain.
//!
//! Pure functions only - no side effects, no I/O.

pub mod serde_helpers;
pub mod string;

pub use serde_helpers::{
    clamped_count, clamped_offset, coerce_number, lenient_string, null_as_default, optional_string,
};
pub use string::{condition_key_from_label, none_if_blank};
