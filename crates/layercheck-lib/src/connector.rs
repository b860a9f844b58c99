//! Seam between the probe and the database driver.
//!
//! Sessions release their connection (and any open cursor) when dropped, so
//! the probe never closes anything by hand.

use crate::descriptor::ConnectionDescriptor;
use crate::error::Result;

/// Opens database sessions.
pub trait Connector {
    /// An open connection. Dropping it disconnects.
    type Session<'c>: Session
    where
        Self: 'c;

    /// Open a session described by `descriptor`.
    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Self::Session<'_>>;
}

/// An open connection able to run a single-value query.
pub trait Session {
    /// Run `query` and return the first column of the first row as text.
    ///
    /// Returns `Ok(None)` when the result set has no rows.
    fn query_text(&self, query: &str) -> Result<Option<String>>;
}
