//! Live updates for connected admin clients.
//!
//! [`EventBroadcaster`] wraps a `tokio::sync::broadcast` channel. Publishing
//! is fire-and-forget: with no subscribers the event is dropped, and a slow
//! subscriber only loses its own backlog.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    OrderUpdated {
        order_id: i64,
        action: ChangeAction,
        at: DateTime<Utc>,
    },
    ProjectUpdated {
        project_id: i64,
        action: ChangeAction,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        key: String,
        value: String,
        at: DateTime<Utc>,
    },
}

impl LiveEvent {
    pub fn order(order_id: i64, action: ChangeAction) -> Self {
        LiveEvent::OrderUpdated {
            order_id,
            action,
            at: Utc::now(),
        }
    }

    pub fn project(project_id: i64, action: ChangeAction) -> Self {
        LiveEvent::ProjectUpdated {
            project_id,
            action,
            at: Utc::now(),
        }
    }

    pub fn settings(key: impl Into<String>, value: impl Into<String>) -> Self {
        LiveEvent::SettingsUpdated {
            key: key.into(),
            value: value.into(),
            at: Utc::now(),
        }
    }

    /// Render as one Server-Sent Events frame.
    pub fn to_sse_frame(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => format!("data: {}\n\n", json),
            Err(e) => {
                tracing::warn!("Failed to serialize live event: {}", e);
                String::new()
            }
        }
    }
}

pub struct EventBroadcaster {
    sender: broadcast::Sender<LiveEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: LiveEvent) {
        // A send error only means nobody is listening.
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::debug!(receivers, "live event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
