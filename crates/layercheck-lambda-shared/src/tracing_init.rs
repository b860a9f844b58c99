//! Tracing initialization for Lambda functions.
//!
//! Configures JSON-formatted tracing output suitable for CloudWatch Logs.
//! The Lambda runtime forwards stdout to CloudWatch, so this is also where the
//! packaging diagnostics end up.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use layercheck_lib::DIAGNOSTICS_TARGET;

/// Initialize tracing with JSON formatting for CloudWatch Logs.
///
/// This should be called once at the start of the Lambda `main` function,
/// before calling `lambda_runtime::run()`.
///
/// The log level can be controlled via the `RUST_LOG` environment variable.
/// Defaults to `info` if not set. Events on [`DIAGNOSTICS_TARGET`] are kept at
/// `info` even when `RUST_LOG` is stricter.
///
/// # Example
///
/// ```no_run
/// use layercheck_lambda_shared::init_tracing;
///
/// #[tokio::main]
/// async fn main() -> Result<(), lambda_runtime::Error> {
///     init_tracing();
///     // ... rest of Lambda setup
///     Ok(())
/// }
/// ```
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_level(true)
        .with_current_span(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .flatten_event(true);

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(keep_diagnostics(filter))
        .with(fmt_layer)
        .try_init();
}

/// Let diagnostic events through regardless of the configured level.
fn keep_diagnostics(filter: EnvFilter) -> EnvFilter {
    match format!("{DIAGNOSTICS_TARGET}=info").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
