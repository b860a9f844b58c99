//! Cold-start initialization of the ODBC environment.
//!
//! The environment handle belongs to the driver manager and is shared by all
//! invocations of a warm instance. Connections are still opened and closed
//! per invocation.

use std::time::Instant;

use tracing::{error, info};

use layercheck_lib::{Error as LibError, OdbcConnector};

/// Allocate the ODBC environment, logging how long it took.
///
/// A failure is kept rather than raised so every invocation can return the
/// reason as its result.
pub fn init_connector() -> Result<OdbcConnector, LibError> {
    let start = Instant::now();
    let result = OdbcConnector::new();
    let init_ms = start.elapsed().as_millis();

    match &result {
        Ok(_) => info!(init_ms = init_ms, "ODBC environment allocated"),
        Err(e) => error!(init_ms = init_ms, error = %e, "ODBC environment allocation failed"),
    }

    result
}
