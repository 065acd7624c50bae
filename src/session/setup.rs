//! Session setup and initialization

use crate::api::{CampusApi, CampusClient};
use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::core::EventSender;
use crate::workers::poller::DashboardPoller;
use crate::workers::view::{EventView, Section};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Cloned into every lookup task
    pub events: EventSender,
    /// Running dashboard poller
    pub poller: DashboardPoller<EventView>,
    /// Visible section, read by the poller on every tick
    pub section_sender: watch::Sender<Section>,
    /// Shutdown sender to stop the session
    pub shutdown_sender: broadcast::Sender<()>,
    pub api: Arc<dyn CampusApi>,
    pub settings: Settings,
}

/// Sets up a session
///
/// Builds the backend client and the event channel, then starts the poller
/// with `initial_section` visible.
pub fn setup_session(
    settings: Settings,
    initial_section: Section,
) -> Result<SessionData, Box<dyn Error>> {
    let api: Arc<dyn CampusApi> = Arc::new(CampusClient::new(settings.environment.clone())?);

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let events = EventSender::new(event_sender);
    let (section_sender, section_receiver) = watch::channel(initial_section);
    let (shutdown_sender, _) = broadcast::channel(1);

    let mut poller = DashboardPoller::new(
        Arc::clone(&api),
        EventView::new(events.clone()),
        section_receiver,
        settings.poll_interval,
        events.clone(),
    );
    poller.start()?;

    Ok(SessionData {
        event_receiver,
        events,
        poller,
        section_sender,
        shutdown_sender,
        api,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use std::time::Duration;

    #[tokio::test]
    async fn test_session_starts_poller_and_stops_cleanly() {
        let settings = Settings {
            environment: Environment::Custom("http://127.0.0.1:9".to_string()),
            poll_interval: Duration::from_secs(2),
        };
        let mut session = setup_session(settings, Section::Student).unwrap();
        assert!(session.poller.is_active());
        assert_eq!(session.api.environment().api_url(), "http://127.0.0.1:9");

        session.poller.stop().await.unwrap();
        assert!(!session.poller.is_active());
        assert_eq!(session.poller.requests_issued(), 1, "only the stop bump");
    }
}
