//! End-to-end publisher tests against a real NATS server.
//!
//! Run with `cargo test -p messaging -- --ignored` (requires Docker).

use futures::StreamExt;
use messaging::{
    ConnectPolicy, EventPublisher, NatsConfig, NatsConnector, PublishOutcome, PublisherState,
};
use serde_json::{Value, json};
use std::future::pending;
use std::time::Duration;
use test_utils::TestNats;

fn connector(url: &str) -> NatsConnector {
    NatsConnector::new(NatsConfig {
        url: url.to_string(),
        ..NatsConfig::default()
    })
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_publisher_declares_durable_queue_and_publishes() {
    let nats = TestNats::new().await;
    let publisher = EventPublisher::new("task_created");

    let state = publisher
        .connect(
            &connector(nats.connection_string()),
            &ConnectPolicy::default(),
            pending(),
        )
        .await
        .unwrap();
    assert_eq!(state, PublisherState::Ready);
    assert!(publisher.is_healthy());

    let outcome = publisher
        .publish(&json!({"taskId": "t1", "userId": "u123", "title": "Buy milk"}))
        .await
        .unwrap();
    assert_eq!(outcome, PublishOutcome::Published);

    let mut stream = nats.jetstream().get_stream("task_created").await.unwrap();
    let info = stream.info().await.unwrap();
    assert_eq!(info.state.messages, 1);
    assert_eq!(
        info.config.retention,
        async_nats::jetstream::stream::RetentionPolicy::WorkQueue
    );

    let consumer = stream
        .create_consumer(async_nats::jetstream::consumer::pull::Config {
            durable_name: Some("reader".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let mut messages = consumer.fetch().max_messages(1).messages().await.unwrap();
    let message = messages.next().await.unwrap().unwrap();
    let payload: Value = serde_json::from_slice(&message.payload).unwrap();
    assert_eq!(payload["userId"], "u123");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reconnecting_publisher_reuses_existing_queue() {
    let nats = TestNats::new().await;

    for _ in 0..2 {
        let publisher = EventPublisher::new("task_created");
        let state = publisher
            .connect(
                &connector(nats.connection_string()),
                &ConnectPolicy::default(),
                pending(),
            )
            .await
            .unwrap();
        assert_eq!(state, PublisherState::Ready);
        publisher.publish(&json!({"n": 1})).await.unwrap();
        publisher.close().await;
    }

    let mut stream = nats.jetstream().get_stream("task_created").await.unwrap();
    assert_eq!(stream.info().await.unwrap().state.messages, 2);
}

#[tokio::test]
async fn test_unreachable_server_gives_up_disconnected() {
    let publisher = EventPublisher::new("task_created");
    let policy = ConnectPolicy::new(2, Duration::from_millis(10));

    let state = publisher
        .connect(&connector("nats://127.0.0.1:1"), &policy, pending())
        .await
        .unwrap();

    assert_eq!(state, PublisherState::Disconnected);
    let outcome = publisher.publish(&json!({"n": 1})).await.unwrap();
    assert_eq!(outcome, PublishOutcome::Unavailable);
}
