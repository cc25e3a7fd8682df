use std::time::Duration;

use novu_http::{prelude::*, ClientOptions, NovuClient, RetryPolicy, TriggerPayload};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let workflow = std::env::args().nth(1).unwrap_or_else(|| "welcome".to_owned());
    let subscriber_id = std::env::args().nth(2).unwrap_or_else(|| "demo-subscriber".to_owned());

    let client = NovuClient::from_env()?.with_options(
        ClientOptions::default()
            .with_timeout_ms(5_000)
            .with_deadline_ms(30_000)
            .with_retry(
                RetryPolicy::new()
                    .with_retry_max(3)
                    .with_wait_max(Duration::from_secs(8)),
            ),
    );

    let payload = TriggerPayload::new(subscriber_id.as_str(), json!({ "source": "demo" }));
    let response = client.events().trigger(&workflow, payload).await?;

    println!(
        "acknowledged={} status={} transaction={}",
        response.data.acknowledged,
        response.data.status,
        response.data.transaction_id.as_deref().unwrap_or("-")
    );
    Ok(())
}
