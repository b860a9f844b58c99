//! ODBC connection descriptor construction.
//!
//! Attributes are always emitted in the same order (driver, server, database,
//! user id, password, trust flag), so identical configuration yields an
//! identical connection string.

use std::fmt;

use crate::config::ProbeConfig;

const REDACTED: &str = "***";

/// Ordered attribute set used to open one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    driver: String,
    server: String,
    database: String,
    uid: String,
    pwd: String,
    trust_server_certificate: bool,
}

impl ConnectionDescriptor {
    /// Build a descriptor from the probe configuration.
    ///
    /// A missing password becomes an empty value; the server rejects the login
    /// rather than the probe refusing to connect.
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            driver: config.driver_path.to_string_lossy().into_owned(),
            server: config.host.clone(),
            database: config.database.clone(),
            uid: config.user.clone(),
            pwd: config.password.clone().unwrap_or_default(),
            trust_server_certificate: config.trust_server_certificate,
        }
    }

    /// Attribute pairs in connection-string order.
    pub fn attributes(&self) -> [(&'static str, &str); 6] {
        [
            ("DRIVER", self.driver.as_str()),
            ("SERVER", self.server.as_str()),
            ("DATABASE", self.database.as_str()),
            ("UID", self.uid.as_str()),
            ("PWD", self.pwd.as_str()),
            (
                "TrustServerCertificate",
                if self.trust_server_certificate {
                    "yes"
                } else {
                    "no"
                },
            ),
        ]
    }

    /// Full connection string, password included.
    pub fn connection_string(&self) -> String {
        self.render(false)
    }

    /// Connection string with the password masked, safe to log.
    pub fn redacted(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact: bool) -> String {
        self.attributes()
            .iter()
            .map(|(key, value)| {
                let value = if redact && *key == "PWD" {
                    REDACTED.to_string()
                } else {
                    escape_value(value)
                };
                format!("{key}={value}")
            })
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Brace-quote a value when it would otherwise break the attribute list.
fn escape_value(value: &str) -> String {
    let needs_braces = value.contains([';', '{', '}'])
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace);
    if needs_braces {
        format!("{{{}}}", value.replace('}', "}}"))
    } else {
        value.to_string()
    }
}
