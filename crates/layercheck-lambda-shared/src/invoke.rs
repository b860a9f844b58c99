//! The invocation routine shared by both Lambda handlers.

use lambda_runtime::Context;
use tracing::{info, info_span, warn};

use layercheck_lib::{run_probe, Connector, Error as LibError, ProbeConfig, ProbeMode};

/// Run one probe for a Lambda invocation and return its text.
///
/// `connector` is the cold-start result; when it failed, its error text is
/// the answer. Success and failure are both plain strings at this boundary.
pub fn probe_invocation<C: Connector>(
    connector: &Result<C, LibError>,
    config: &ProbeConfig,
    context: &Context,
    mode: ProbeMode,
) -> String {
    let span = info_span!("probe", request_id = %context.request_id, mode = ?mode);
    let _guard = span.enter();

    let connector = match connector {
        Ok(connector) => connector,
        Err(e) => {
            warn!(error = %e, "ODBC environment unavailable");
            return e.to_string();
        }
    };

    let outcome = run_probe(connector, config, mode);
    info!(success = outcome.is_success(), "invocation complete");
    outcome.into_text()
}
