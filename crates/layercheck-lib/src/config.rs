//! Probe configuration sourced from the process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Driver shipped in the runtime layer.
pub const DEFAULT_DRIVER_PATH: &str = "/opt/microsoft/msodbcsql18/lib64/libmsodbcsql-18.5.so.1.1";
pub const DEFAULT_HOST: &str = "db";
pub const DEFAULT_DATABASE: &str = "master";
pub const DEFAULT_USER: &str = "sa";

pub const DRIVER_PATH_VAR: &str = "ODBC_DRIVER_PATH";
pub const HOST_VAR: &str = "DB_HOST";
pub const DATABASE_VAR: &str = "DB_NAME";
pub const USER_VAR: &str = "DB_USER";
pub const PASSWORD_VAR: &str = "DB_PASSWORD";

/// Settings for a single probe invocation.
///
/// Built once at call entry and dropped with the call. A variable that is set
/// to an empty string is taken as-is; defaults only apply when it is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeConfig {
    pub driver_path: PathBuf,
    pub host: String,
    pub database: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub trust_server_certificate: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            driver_path: PathBuf::from(DEFAULT_DRIVER_PATH),
            host: DEFAULT_HOST.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            user: DEFAULT_USER.to_string(),
            password: None,
            trust_server_certificate: true,
        }
    }
}

impl ProbeConfig {
    /// Read the configuration from the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env_value)
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Tests use this to avoid mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            driver_path: lookup(DRIVER_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.driver_path),
            host: lookup(HOST_VAR).unwrap_or(defaults.host),
            database: lookup(DATABASE_VAR).unwrap_or(defaults.database),
            user: lookup(USER_VAR).unwrap_or(defaults.user),
            password: lookup(PASSWORD_VAR),
            trust_server_certificate: defaults.trust_server_certificate,
        }
    }

    /// Directory the driver binary is installed in.
    pub fn driver_dir(&self) -> &Path {
        self.driver_path.parent().unwrap_or_else(|| Path::new("/"))
    }
}

/// Read a variable; a set but non-UTF-8 value is converted lossily, never
/// treated as unset.
pub(crate) fn env_value(name: &str) -> Option<String> {
    std::env::var_os(name).map(lossy)
}

fn lossy(value: OsString) -> String {
    value.to_string_lossy().into_owned()
}
