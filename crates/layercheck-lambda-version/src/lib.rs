//! AWS Lambda function returning the database server version.
//!
//! The event payload is not inspected. The response is a single JSON string:
//! the server's version banner, or the description of whatever failed.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use layercheck_lambda_shared::probe_invocation;
use layercheck_lib::{Connector, Error as LibError, ProbeConfig, ProbeMode};

/// Entry point used by the Lambda runtime.
#[cfg(feature = "odbc")]
pub async fn run() -> Result<(), Error> {
    use lambda_runtime::service_fn;
    use layercheck_lambda_shared::{init_connector, init_tracing};

    init_tracing();

    // Allocated once per cold start; connections stay per invocation.
    let connector = init_connector();
    let connector = &connector;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(connector, event).await
    }))
    .await
}

/// Probe the configured server and return the version or the error text.
pub async fn handler<C: Connector>(
    connector: &Result<C, LibError>,
    event: LambdaEvent<Value>,
) -> Result<String, Error> {
    info!(request_id = %event.context.request_id, "handling version probe");

    let config = ProbeConfig::from_env();
    Ok(probe_invocation(
        connector,
        &config,
        &event.context,
        ProbeMode::Standard,
    ))
}
