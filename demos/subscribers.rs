use novu_http::{prelude::*, FeedOptions, NovuClient, SubscriberPayload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = NovuClient::from_env()?;
    let subscriber_id = std::env::args().nth(1).unwrap_or_else(|| "demo-subscriber".to_owned());

    let profile = SubscriberPayload {
        first_name: Some("Demo".to_owned()),
        email: Some("demo@example.com".to_owned()),
        ..SubscriberPayload::default()
    };
    let subscriber = client.subscribers().identify(&subscriber_id, &profile).await?;
    println!("identified {} ({})", subscriber.data.subscriber_id, subscriber.data.id);

    let unseen = client.subscribers().unseen_count(&subscriber_id, Some(false)).await?;
    println!("unseen notifications: {}", unseen.data.count);

    let feed = client
        .subscribers()
        .notification_feed(
            &subscriber_id,
            Some(&FeedOptions {
                limit: Some(5),
                ..FeedOptions::default()
            }),
        )
        .await?;
    for item in &feed.data {
        println!("{item}");
    }
    Ok(())
}
