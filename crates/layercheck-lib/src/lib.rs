//! Layercheck library entry points.
//!
//! This crate builds the ODBC connection descriptor from the environment,
//! opens a session through a [`Connector`], asks the server for its version
//! and collapses any failure into displayable text. Higher-level consumers
//! (CLI, Lambdas) should only depend on the items exported here instead of
//! reimplementing behavior.
//!
//! The real ODBC backend lives behind the `odbc` feature because it links
//! against the system driver manager.

#![deny(warnings)]

pub mod config;
pub mod connector;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
#[cfg(feature = "odbc")]
pub mod odbc;
pub mod probe;

pub use config::ProbeConfig;
pub use connector::{Connector, Session};
pub use descriptor::ConnectionDescriptor;
pub use diagnostics::{collect_diagnostics, DiagnosticReport, DIAGNOSTICS_TARGET};
pub use error::{Error, Result};
#[cfg(feature = "odbc")]
pub use odbc::{OdbcConnector, OdbcSession};
pub use probe::{query_server_version, run_probe, ProbeMode, ProbeOutcome, VERSION_QUERY};
