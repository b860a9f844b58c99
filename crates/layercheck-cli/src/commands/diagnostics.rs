//! Diagnostics command handler.

use std::process::ExitCode;

use anyhow::{Context, Result};

use layercheck_lib::{collect_diagnostics, ProbeConfig};

/// Print the packaging diagnostics for the configured driver.
///
/// Always succeeds; unavailable parts are reported inside the output.
pub fn handle_diagnostics(config: &ProbeConfig, json: bool) -> Result<ExitCode> {
    let report = collect_diagnostics(config);
    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize diagnostics")?;
        println!("{rendered}");
    } else {
        print!("{report}");
    }
    Ok(ExitCode::SUCCESS)
}
