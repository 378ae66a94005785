//! Foundation types for folio.
//!
//! This crate holds the host-agnostic pieces shared by every folio crate:
//! the error type, keyboard and scroll enums, and the page configuration.

pub mod config;
pub mod error;
pub mod input;
