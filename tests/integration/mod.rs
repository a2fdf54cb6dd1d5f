//! Integration test suite for rulegen
//!
//! End-to-end tests that run the `rulegen` binary against temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **generate**: build file generation and output stability
//! - **scopes**: scope inspection in text and JSON
//! - **check**: empty-processor reporting and exit codes
//! - **errors**: user-facing error messages

#[path = "../common/mod.rs"]
mod common;

mod check;
mod errors;
mod generate;
mod scopes;
