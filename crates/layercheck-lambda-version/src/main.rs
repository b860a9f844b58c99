//! AWS Lambda function for the ODBC version probe.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    layercheck_lambda_version::run().await
}
