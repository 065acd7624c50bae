//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::api::CampusApi;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::ui::dashboard::{Command, DashboardState, render_dashboard};
use crate::workers::core::EventSender;
use crate::workers::lookup::spawn_lookup;
use crate::workers::view::Section;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    /// Shown next to the live dashboard.
    pub poll_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, poll_interval: Duration) -> Self {
        Self {
            with_background_color,
            poll_interval,
        }
    }
}

/// Application state
pub struct App {
    state: DashboardState,

    /// Receives events from the poller and the lookups.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Publishes the visible section to the poller.
    section_sender: watch::Sender<Section>,

    /// Broadcasts shutdown signal to the session.
    shutdown_sender: broadcast::Sender<()>,

    api: Arc<dyn CampusApi>,

    /// Handed to each lookup task.
    events: EventSender,
}

impl App {
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        section_sender: watch::Sender<Section>,
        shutdown_sender: broadcast::Sender<()>,
        api: Arc<dyn CampusApi>,
        events: EventSender,
        ui_config: UIConfig,
    ) -> Self {
        let mut state = DashboardState::new(environment, ui_config);
        state.section = *section_sender.borrow();
        Self {
            state,
            event_receiver,
            section_sender,
            shutdown_sender,
            api,
            events,
        }
    }

    /// Queue all incoming events and apply them.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
        self.state.update();
    }

    /// Returns `true` when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.state.handle_key(key) {
            Some(Command::Quit) => {
                let _ = self.shutdown_sender.send(());
                true
            }
            Some(Command::Show(section)) => {
                self.section_sender.send_replace(section);
                false
            }
            Some(Command::Lookup(request)) => {
                spawn_lookup(Arc::clone(&self.api), self.events.clone(), request);
                false
            }
            None => false,
        }
    }
}

/// Runs the UI until the user quits or a shutdown is broadcast.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let mut shutdown_receiver = app.shutdown_sender.subscribe();

    loop {
        if shutdown_receiver.try_recv().is_ok() {
            return Ok(());
        }

        app.drain_events();
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}
