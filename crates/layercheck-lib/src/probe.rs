//! The connectivity probe: configure, connect, ask for the version, report.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ProbeConfig;
use crate::connector::{Connector, Session};
use crate::descriptor::ConnectionDescriptor;
use crate::diagnostics::collect_diagnostics;
use crate::error::{Error, Result};

/// Diagnostic query sent to the server.
pub const VERSION_QUERY: &str = "SELECT @@VERSION";

/// Whether to emit packaging diagnostics before connecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeMode {
    #[default]
    Standard,
    Diagnostic,
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// Server version string.
    Version(String),
    /// Description of whatever went wrong.
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Version(_))
    }

    /// Borrow the text regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Version(text) | Self::Failed(text) => text,
        }
    }

    /// Collapse to a single string; callers can only tell the variants apart
    /// by reading it.
    pub fn into_text(self) -> String {
        match self {
            Self::Version(text) | Self::Failed(text) => text,
        }
    }
}

impl From<Result<String>> for ProbeOutcome {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(version) => Self::Version(version),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Connect with `descriptor` and return the server version.
///
/// The session (and the cursor inside it) is released on every return path.
pub fn query_server_version<C: Connector>(
    connector: &C,
    descriptor: &ConnectionDescriptor,
) -> Result<String> {
    let session = connector.connect(descriptor)?;
    session
        .query_text(VERSION_QUERY)?
        .ok_or_else(|| Error::EmptyResult {
            query: VERSION_QUERY.to_string(),
        })
}

/// Run the full probe for `config`. Never fails; errors become text.
pub fn run_probe<C: Connector>(connector: &C, config: &ProbeConfig, mode: ProbeMode) -> ProbeOutcome {
    if mode == ProbeMode::Diagnostic {
        collect_diagnostics(config).log();
    }

    let descriptor = ConnectionDescriptor::from_config(config);
    let start = Instant::now();
    let outcome = ProbeOutcome::from(query_server_version(connector, &descriptor));
    let elapsed_ms = start.elapsed().as_millis();

    match &outcome {
        ProbeOutcome::Version(version) => info!(
            descriptor = %descriptor,
            elapsed_ms = elapsed_ms,
            version = version.lines().next().unwrap_or_default(),
            "probe succeeded"
        ),
        ProbeOutcome::Failed(error) => warn!(
            descriptor = %descriptor,
            elapsed_ms = elapsed_ms,
            error = %error,
            "probe failed"
        ),
    }

    outcome
}
