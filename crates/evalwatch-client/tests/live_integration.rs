#[allow(dead_code)]
mod common;

use std::time::Duration;

use common::{unreachable_endpoints, MockScript, TestServer};
use evalwatch_client::{LiveChannel, LiveEvent};
use evalwatch_core::ConnectionState;
use tokio::sync::mpsc;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

async fn next_event(events: &mut mpsc::Receiver<LiveEvent>) -> Option<LiveEvent> {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for live event")
}

#[tokio::test]
async fn frames_arrive_in_order_then_server_close() {
    let server = TestServer::new(MockScript {
        frames: vec![
            r#"{"status":"paused"}"#.to_string(),
            "not json".to_string(),
            r#"{"domain":"Math","question":"2+2?","answer":"4","responseTime":12}"#.to_string(),
        ],
        close_reason: Some("runner shutting down".to_string()),
        ..MockScript::default()
    })
    .await;

    let (channel, mut events) = LiveChannel::connect(server.endpoints().live_url(), CONNECT_TIMEOUT);

    assert_eq!(next_event(&mut events).await, Some(LiveEvent::Opened));
    assert_eq!(
        next_event(&mut events).await,
        Some(LiveEvent::Frame(r#"{"status":"paused"}"#.to_string()))
    );
    assert_eq!(
        next_event(&mut events).await,
        Some(LiveEvent::Frame("not json".to_string()))
    );
    assert!(matches!(
        next_event(&mut events).await,
        Some(LiveEvent::Frame(f)) if f.contains("\"domain\":\"Math\"")
    ));
    assert_eq!(
        next_event(&mut events).await,
        Some(LiveEvent::Closed {
            reason: Some("runner shutting down".to_string())
        })
    );
    assert_eq!(channel.connection_state(), ConnectionState::Closed);

    // Exactly one close notification, then the stream ends.
    assert_eq!(next_event(&mut events).await, None);
}

#[tokio::test]
async fn state_is_open_after_opened_event() {
    let server = TestServer::new(MockScript::default()).await;
    let (channel, mut events) = LiveChannel::connect(server.endpoints().live_url(), CONNECT_TIMEOUT);

    assert_eq!(next_event(&mut events).await, Some(LiveEvent::Opened));
    assert_eq!(channel.connection_state(), ConnectionState::Open);

    channel.close().await;
}

#[tokio::test]
async fn caller_close_sends_close_frame_and_emits_nothing() {
    let server = TestServer::new(MockScript {
        frames: vec![r#"{"status":"resumed"}"#.to_string()],
        ..MockScript::default()
    })
    .await;

    let (channel, mut events) = LiveChannel::connect(server.endpoints().live_url(), CONNECT_TIMEOUT);
    assert_eq!(next_event(&mut events).await, Some(LiveEvent::Opened));
    assert!(matches!(next_event(&mut events).await, Some(LiveEvent::Frame(_))));

    channel.close().await;

    assert_eq!(next_event(&mut events).await, None);
    assert!(server.wait_for_client_close().await);
}

#[tokio::test]
async fn unreachable_server_reports_failure() {
    let (channel, mut events) =
        LiveChannel::connect(unreachable_endpoints().live_url(), CONNECT_TIMEOUT);

    assert!(matches!(
        next_event(&mut events).await,
        Some(LiveEvent::Failed { .. })
    ));
    assert_eq!(channel.connection_state(), ConnectionState::Closed);
    assert_eq!(next_event(&mut events).await, None);
}
