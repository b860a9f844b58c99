use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use layercheck_lib::ProbeConfig;

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "ODBC driver layer connectivity probe")]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Command,
}

/// Values that take precedence over the DB_* environment variables.
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Database server host (overrides DB_HOST).
    #[arg(long, global = true)]
    host: Option<String>,
    /// Database name (overrides DB_NAME).
    #[arg(long, global = true)]
    database: Option<String>,
    /// Login user id (overrides DB_USER).
    #[arg(long, global = true)]
    user: Option<String>,
    /// Path to the native ODBC driver (overrides ODBC_DRIVER_PATH).
    #[arg(long, global = true)]
    driver: Option<PathBuf>,
}

impl ConfigOverrides {
    fn apply(self, mut config: ProbeConfig) -> ProbeConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(user) = self.user {
            config.user = user;
        }
        if let Some(driver) = self.driver {
            config.driver_path = driver;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the ODBC connection string built from the environment.
    Descriptor {
        /// Print the password instead of masking it.
        #[arg(long)]
        show_password: bool,
    },
    /// Print the library search path, driver directory and driver dependencies.
    Diagnostics {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Connect to the server and print its version, or the error.
    Probe {
        /// Print packaging diagnostics before connecting.
        #[arg(long)]
        diagnostics: bool,
        /// Emit the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.overrides.apply(ProbeConfig::from_env());

    match cli.command {
        Command::Descriptor { show_password } => {
            commands::descriptor::handle_descriptor(&config, show_password)
        }
        Command::Diagnostics { json } => commands::diagnostics::handle_diagnostics(&config, json),
        Command::Probe { diagnostics, json } => {
            commands::probe::handle_probe(&config, diagnostics, json)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence() {
        let overrides = ConfigOverrides {
            host: Some("testdb".to_string()),
            driver: Some(PathBuf::from("/tmp/libdriver.so")),
            ..ConfigOverrides::default()
        };
        let config = overrides.apply(ProbeConfig::default());
        assert_eq!(config.host, "testdb");
        assert_eq!(config.database, "master");
        assert_eq!(config.driver_path, PathBuf::from("/tmp/libdriver.so"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
