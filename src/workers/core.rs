//! Core worker utilities

use crate::events::{Event, EventType, Payload, Source};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_poller_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        let _ = self
            .sender
            .send(Event::poller_with_level(message, event_type, log_level))
            .await;
    }

    pub async fn send_lookup_event(
        &self,
        source: Source,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
        payload: Payload,
    ) {
        let _ = self
            .sender
            .send(Event::new(source, message, event_type, log_level).with_payload(payload))
            .await;
    }
}
