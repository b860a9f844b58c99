//! Shared infrastructure for layercheck AWS Lambda functions.
//!
//! This crate provides common functionality used by both Lambda handlers:
//!
//! - [`init_tracing`]: JSON-formatted tracing for CloudWatch Logs
//! - [`init_connector`]: cold-start allocation of the ODBC environment (feature `odbc`)
//! - [`probe_invocation`]: runs one probe and flattens the outcome to text
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fake connector and mock contexts for
//! Lambda handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod invoke;
#[cfg(feature = "odbc")]
mod runtime;
mod tracing_init;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use invoke::probe_invocation;
#[cfg(feature = "odbc")]
pub use runtime::init_connector;
pub use tracing_init::init_tracing;
