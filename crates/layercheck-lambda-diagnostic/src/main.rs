//! AWS Lambda function for the ODBC diagnostic probe.

use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    layercheck_lambda_diagnostic::run().await
}
