use crate::helpers::{spawn_app, valid_order};
use std::time::Duration;

async fn read_until(response: &mut reqwest::Response, needle: &str) -> String {
    let mut received = String::new();
    while !received.contains(needle) {
        let chunk = tokio::time::timeout(Duration::from_secs(5), response.chunk())
            .await
            .expect("Timed out waiting for a live event")
            .expect("Failed to read the event stream")
            .expect("Event stream closed");
        received.push_str(&String::from_utf8_lossy(&chunk));
    }
    received
}

#[tokio::test]
async fn admins_receive_live_order_events() {
    let app = spawn_app().await;
    app.login_as_admin().await;

    let mut stream = app.get("/api/admin/events").await;
    assert_eq!(stream.status().as_u16(), 200);
    assert_eq!(
        stream.headers().get("content-type").unwrap(),
        "text/event-stream"
    );
    read_until(&mut stream, ": connected").await;

    assert_eq!(app.post_order(&valid_order()).await.status().as_u16(), 200);

    let received = read_until(&mut stream, "order_updated").await;
    assert!(received.contains("\"action\":\"created\""));
}

#[tokio::test]
async fn live_events_require_a_session() {
    let app = spawn_app().await;

    let response = app.get("/api/admin/events").await;

    assert_eq!(response.status().as_u16(), 401);
}
