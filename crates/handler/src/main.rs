use anyhow::Context;
use serde_json::Value as JsonValue;

use backup_report_handler::{AwsReportHandler, InvocationContext};
use backup_report_infra::ReportConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    backup_report_observability::init();

    let config = ReportConfig::from_env().context("failed to load report configuration")?;
    tracing::info!(
        sender = %config.sender,
        recipient = %config.recipient,
        policy = ?config.empty_policy,
        "configuration loaded"
    );

    let event = match std::env::args().nth(1) {
        Some(raw) => serde_json::from_str(&raw).context("event payload is not valid JSON")?,
        None => JsonValue::Object(Default::default()),
    };

    let handler = AwsReportHandler::from_config(&config).await;
    let result = handler.handle(event, InvocationContext::new()).await;

    println!("{}", serde_json::to_string(&result)?);

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
