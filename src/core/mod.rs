//! Core types for rulegen
//!
//! This module holds the error taxonomy shared by every other module.
//!
//! ## `error` - Error Handling
//!
//! - [`RulegenError`] - Enumerated error types covering all failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use rulegen::core::{RulegenError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(RulegenError::ManifestNotFound.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(matches!(friendly.error, RulegenError::ManifestNotFound));
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, RulegenError, user_friendly_error};
