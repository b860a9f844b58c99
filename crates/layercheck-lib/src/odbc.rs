//! Native ODBC backend built on `odbc-api`.
//!
//! The driver is loaded by path from the `DRIVER=` attribute, so a missing or
//! unloadable driver surfaces as a driver manager error at connect time.

use odbc_api::{Connection, ConnectionOptions, Cursor, Environment};
use tracing::debug;

use crate::connector::{Connector, Session};
use crate::descriptor::ConnectionDescriptor;
use crate::error::{Error, Result};

/// Connector holding the process-wide ODBC environment handle.
pub struct OdbcConnector {
    environment: Environment,
}

impl OdbcConnector {
    /// Allocate the ODBC environment.
    ///
    /// Fails when the driver manager cannot allocate a handle.
    pub fn new() -> Result<Self> {
        let environment = Environment::new()?;
        Ok(Self { environment })
    }
}

impl Connector for OdbcConnector {
    type Session<'c>
        = OdbcSession<'c>
    where
        Self: 'c;

    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<OdbcSession<'_>> {
        debug!(descriptor = %descriptor, "opening ODBC connection");
        let connection = self.environment.connect_with_connection_string(
            &descriptor.connection_string(),
            ConnectionOptions::default(),
        )?;
        Ok(OdbcSession { connection })
    }
}

/// An open ODBC connection. Disconnects on drop.
pub struct OdbcSession<'env> {
    connection: Connection<'env>,
}

impl Session for OdbcSession<'_> {
    fn query_text(&self, query: &str) -> Result<Option<String>> {
        // The cursor is closed when it goes out of scope, before the session.
        let mut cursor = self
            .connection
            .execute(query, ())?
            .ok_or_else(|| Error::NoResultSet {
                query: query.to_string(),
            })?;

        let Some(mut row) = cursor.next_row()? else {
            return Ok(None);
        };

        // Fetched as UTF-16 so the result does not depend on the client locale.
        let mut buf = Vec::new();
        if !row.get_wide_text(1, &mut buf)? {
            return Err(Error::NullValue {
                query: query.to_string(),
            });
        }
        Ok(Some(text_from_utf16(&buf)))
    }
}

fn text_from_utf16(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}
