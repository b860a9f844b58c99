//! Test utilities for Lambda handler testing.
//!
//! Provides a [`FakeConnector`] that stands in for the ODBC backend and counts
//! open sessions, so tests can assert that every invocation released its
//! connection.
//!
//! # Usage
//!
//! ```ignore
//! use layercheck_lambda_shared::test_utils::{FakeConnector, SQL_SERVER_VERSION};
//!
//! let connector = FakeConnector::answering(SQL_SERVER_VERSION);
//! // ... invoke the handler with Ok(connector)
//! assert_eq!(connector.open_sessions(), 0);
//! ```

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lambda_runtime::Context;
use layercheck_lib::{ConnectionDescriptor, Connector, Error as LibError, Session};
use tracing::{info, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;

/// Message logged by [`FakeConnector`] when a session opens.
pub const FAKE_CONNECT_MESSAGE: &str = "fake connector opened session";

/// Version banner returned by the fake server.
pub const SQL_SERVER_VERSION: &str = "Microsoft SQL Server 2022 (RTM-CU12) (KB5033663) - 16.0.4115.5 (X64)";

/// What the fake does when asked to connect and query.
#[derive(Debug, Clone)]
enum Behavior {
    Answer(Option<String>),
    FailConnect(String),
    FailQuery(String),
}

/// In-memory connector with scripted behavior.
#[derive(Debug)]
pub struct FakeConnector {
    behavior: Behavior,
    open: AtomicUsize,
    connects: AtomicUsize,
    last_connection_string: Mutex<Option<String>>,
}

impl FakeConnector {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            open: AtomicUsize::new(0),
            connects: AtomicUsize::new(0),
            last_connection_string: Mutex::new(None),
        }
    }

    /// Connects and answers the version query with `version`.
    pub fn answering(version: &str) -> Self {
        Self::with_behavior(Behavior::Answer(Some(version.to_string())))
    }

    /// Connects but the query yields no rows.
    pub fn answering_nothing() -> Self {
        Self::with_behavior(Behavior::Answer(None))
    }

    /// Fails to connect with `message`.
    pub fn failing_connect(message: &str) -> Self {
        Self::with_behavior(Behavior::FailConnect(message.to_string()))
    }

    /// Connects but fails the query with `message`.
    pub fn failing_query(message: &str) -> Self {
        Self::with_behavior(Behavior::FailQuery(message.to_string()))
    }

    /// Sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Successful connects so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Connection string of the most recent connect attempt.
    pub fn last_connection_string(&self) -> Option<String> {
        self.last_connection_string
            .lock()
            .expect("connection string lock poisoned")
            .clone()
    }
}

/// Session handed out by [`FakeConnector`]. Decrements the open count on drop.
pub struct FakeSession<'c> {
    connector: &'c FakeConnector,
}

impl Drop for FakeSession<'_> {
    fn drop(&mut self) {
        self.connector.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Connector for FakeConnector {
    type Session<'c>
        = FakeSession<'c>
    where
        Self: 'c;

    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<FakeSession<'_>, LibError> {
        *self
            .last_connection_string
            .lock()
            .expect("connection string lock poisoned") = Some(descriptor.connection_string());

        if let Behavior::FailConnect(message) = &self.behavior {
            return Err(LibError::Driver(message.clone()));
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        self.connects.fetch_add(1, Ordering::SeqCst);
        info!("{FAKE_CONNECT_MESSAGE}");
        Ok(FakeSession { connector: self })
    }
}

impl Session for FakeSession<'_> {
    fn query_text(&self, _query: &str) -> Result<Option<String>, LibError> {
        match &self.connector.behavior {
            Behavior::Answer(answer) => Ok(answer.clone()),
            Behavior::FailQuery(message) => Err(LibError::Driver(message.clone())),
            Behavior::FailConnect(_) => unreachable!("no session exists when connect fails"),
        }
    }
}

/// Create a mock Lambda context for testing.
///
/// `Context` is non-exhaustive, so tests start from the default and set the
/// request ID to "test-request-{suffix}".
pub fn mock_context(suffix: &str) -> Context {
    let mut context = Context::default();
    context.request_id = format!("test-request-{}", suffix);
    context
}

/// In-memory sink for formatted log lines.
///
/// Install [`CapturedLogs::subscriber`] with `tracing::subscriber::set_default`
/// (or `with_default`) and read the lines back with [`CapturedLogs::contents`].
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Plain-text subscriber writing every event at `DEBUG` and above here.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().expect("log buffer lock poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .expect("log buffer lock poisoned")
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layercheck_lib::ProbeConfig;

    #[test]
    fn sessions_are_counted_and_released() {
        let connector = FakeConnector::answering(SQL_SERVER_VERSION);
        let descriptor = ConnectionDescriptor::from_config(&ProbeConfig::default());
        {
            let session = connector.connect(&descriptor).unwrap();
            assert_eq!(connector.open_sessions(), 1);
            assert_eq!(
                session.query_text("SELECT @@VERSION").unwrap().as_deref(),
                Some(SQL_SERVER_VERSION)
            );
        }
        assert_eq!(connector.open_sessions(), 0);
        assert_eq!(connector.connect_count(), 1);
    }

    #[test]
    fn records_connection_string_even_on_failure() {
        let connector = FakeConnector::failing_connect("boom");
        let descriptor = ConnectionDescriptor::from_config(&ProbeConfig::default());
        assert!(connector.connect(&descriptor).is_err());
        assert_eq!(
            connector.last_connection_string(),
            Some(descriptor.connection_string())
        );
        assert_eq!(connector.connect_count(), 0);
    }

    #[test]
    fn captured_logs_record_connect() {
        let logs = CapturedLogs::default();
        let connector = FakeConnector::answering(SQL_SERVER_VERSION);
        let descriptor = ConnectionDescriptor::from_config(&ProbeConfig::default());

        tracing::subscriber::with_default(logs.subscriber(), || {
            drop(connector.connect(&descriptor).unwrap());
        });

        assert!(logs.contents().contains(FAKE_CONNECT_MESSAGE));
    }

    #[test]
    fn mock_context_sets_request_id() {
        assert_eq!(mock_context("123").request_id, "test-request-123");
    }
}
