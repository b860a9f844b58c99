use lambda_runtime::{Context, LambdaEvent};
use serde_json::json;

use layercheck_lambda_shared::test_utils::{FakeConnector, SQL_SERVER_VERSION};
use layercheck_lambda_version::handler;
use layercheck_lib::Error as LibError;

fn event(payload: serde_json::Value) -> LambdaEvent<serde_json::Value> {
    LambdaEvent::new(payload, Context::default())
}

#[tokio::test]
async fn returns_server_version() {
    let connector = Ok(FakeConnector::answering(SQL_SERVER_VERSION));

    let text = handler(&connector, event(json!({})))
        .await
        .expect("handler should succeed");

    assert!(text.starts_with("Microsoft SQL Server"));
    assert!(text.contains("16.0"));
}

#[tokio::test]
async fn ignores_event_payload() {
    let connector = Ok(FakeConnector::answering(SQL_SERVER_VERSION));

    let empty = handler(&connector, event(json!(null))).await.unwrap();
    let noisy = handler(&connector, event(json!({"DB_HOST": "elsewhere", "n": [1, 2]})))
        .await
        .unwrap();

    assert_eq!(empty, noisy);
}

#[tokio::test]
async fn login_failure_is_returned_not_raised() {
    let connector = Ok(FakeConnector::failing_connect(
        "[28000] [Microsoft][ODBC Driver 18 for SQL Server][SQL Server]Login failed for user 'sa'.",
    ));

    let text = handler(&connector, event(json!({})))
        .await
        .expect("failures are returned as text");

    assert!(text.contains("Login failed"));
    assert!(!text.starts_with("Microsoft SQL Server"));
}

#[tokio::test]
async fn driver_load_failure_is_returned_not_raised() {
    let connector: Result<FakeConnector, LibError> = Ok(FakeConnector::failing_connect(
        "[01000] [unixODBC][Driver Manager]Can't open lib '/opt/missing.so' : file not found",
    ));

    let text = handler(&connector, event(json!({}))).await.unwrap();

    assert!(text.contains("file not found"));
}

#[tokio::test]
async fn releases_connection_on_every_path() {
    let ok = Ok(FakeConnector::answering(SQL_SERVER_VERSION));
    let failing_query = Ok(FakeConnector::failing_query("[HY000] Communication link failure"));
    let no_rows = Ok(FakeConnector::answering_nothing());

    for connector in [&ok, &failing_query, &no_rows] {
        handler(connector, event(json!({}))).await.unwrap();
        let fake = connector.as_ref().unwrap();
        assert_eq!(fake.connect_count(), 1);
        assert_eq!(fake.open_sessions(), 0);
    }
}

#[tokio::test]
async fn connection_string_keeps_field_order() {
    let connector = Ok(FakeConnector::answering(SQL_SERVER_VERSION));
    handler(&connector, event(json!({}))).await.unwrap();

    let connection_string = connector
        .as_ref()
        .unwrap()
        .last_connection_string()
        .expect("connect was attempted");
    let keys: Vec<&str> = connection_string
        .split(';')
        .filter_map(|attr| attr.split_once('=').map(|(key, _)| key))
        .collect();

    assert_eq!(
        keys,
        vec!["DRIVER", "SERVER", "DATABASE", "UID", "PWD", "TrustServerCertificate"]
    );
    assert!(connection_string.ends_with("TrustServerCertificate=yes"));
}
