use actix_web::{get, web, HttpResponse};
use futures_util::stream::{self, StreamExt};
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

use crate::core::{AdminSession, EventBroadcaster};

/// Server-Sent Events feed of order, project and settings changes.
#[tracing::instrument(name = "Subscribe Live Events", skip(broadcaster, session), fields(admin = %session.username))]
#[get("/events")]
pub async fn live_events(
    broadcaster: web::Data<EventBroadcaster>,
    session: AdminSession,
) -> HttpResponse {
    let receiver = broadcaster.subscribe();
    tracing::info!(subscribers = broadcaster.subscriber_count(), "Live event subscriber connected");

    let greeting = stream::once(async {
        Ok::<_, Infallible>(web::Bytes::from_static(b": connected\n\n"))
    });

    let updates = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let frame = web::Bytes::from(event.to_sse_frame());
                    return Some((Ok::<_, Infallible>(frame), receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Live event subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(greeting.chain(updates))
}
