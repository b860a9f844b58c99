//! Descriptor command handler.

use std::process::ExitCode;

use anyhow::Result;

use layercheck_lib::{ConnectionDescriptor, ProbeConfig};

/// Print the connection string, masking the password unless asked not to.
pub fn handle_descriptor(config: &ProbeConfig, show_password: bool) -> Result<ExitCode> {
    let descriptor = ConnectionDescriptor::from_config(config);
    if show_password {
        println!("{}", descriptor.connection_string());
    } else {
        println!("{}", descriptor.redacted());
    }
    Ok(ExitCode::SUCCESS)
}
