//! AWS Lambda function probing the ODBC driver layer with diagnostics.
//!
//! Before connecting, this handler logs `LD_LIBRARY_PATH`, the contents of
//! the driver installation directory and the driver's dynamic dependencies.
//! Those are debugging aids only; the response is the same single string the
//! version probe returns.

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

    let connector = init_connector();
    let connector = &connector;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(connector, event).await
    }))
    .await
}

pub async fn handler<C: Connector>(
    connector: &Result<C, LibError>,
    event: LambdaEvent<Value>,
) -> Result<String, Error> {
    info!(request_id = %event.context.request_id, "handling diagnostic probe");

    let config = ProbeConfig::from_env();
    Ok(probe_invocation(
        connector,
        &config,
        &event.context,
        ProbeMode::Diagnostic,
    ))
}
