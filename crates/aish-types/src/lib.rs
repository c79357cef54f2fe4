//! Foundation types for aish.
//!
//! This crate contains the error type and result alias shared by every other
//! aish crate. It sits at the bottom of the dependency graph and stays small
//! on purpose.

pub mod error;
