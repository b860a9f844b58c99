//! Probe command handler.

use std::process::ExitCode;

use anyhow::{Context, Result};

use layercheck_lib::{collect_diagnostics, ProbeConfig, ProbeOutcome};

/// Run the probe and print the version or the error text.
///
/// Exits with status 1 when the probe failed, so scripts can tell the two
/// apart without parsing the text.
pub fn handle_probe(config: &ProbeConfig, diagnostics: bool, json: bool) -> Result<ExitCode> {
    if diagnostics {
        let report = collect_diagnostics(config);
        if json {
            report.log();
        } else {
            print!("{report}");
        }
    }

    let outcome = probe(config)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&outcome).context("failed to serialize probe outcome")?;
        println!("{rendered}");
    } else {
        println!("{}", outcome.text());
    }

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(feature = "odbc")]
fn probe(config: &ProbeConfig) -> Result<ProbeOutcome> {
    use layercheck_lib::{run_probe, OdbcConnector, ProbeMode};

    let connector = OdbcConnector::new().context("failed to allocate ODBC environment")?;
    Ok(run_probe(&connector, config, ProbeMode::Standard))
}

#[cfg(not(feature = "odbc"))]
fn probe(_config: &ProbeConfig) -> Result<ProbeOutcome> {
    anyhow::bail!("ODBC support is not compiled in; rebuild layercheck-cli with --features odbc")
}
