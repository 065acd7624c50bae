//! Admin dashboard poller
//!
//! Owns the refresh timer. While the admin section is visible, every tick
//! fetches a snapshot and renders it into the injected [`DashboardView`].
//!
//! - The first tick fires as soon as the poller starts, then once per interval.
//! - A tick that fires while the previous fetch is still pending is skipped, so
//!   at most one request is ever in flight.
//! - Each request carries a sequence number. A response is rendered only if it
//!   is still the latest request, the poller is still running and the admin
//!   section is still visible.
//! - Failed fetches are logged and leave the view untouched.

use crate::api::CampusApi;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::workers::core::EventSender;
use crate::workers::view::{DashboardFields, DashboardView, Section};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("Dashboard poller is already running")]
    AlreadyRunning,

    /// The polling task died and took the view with it.
    #[error("Dashboard view is no longer available")]
    ViewLost,

    #[error("Dashboard poller task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

enum Lifecycle<V> {
    Idle { view: V },
    Active {
        cancel: CancellationToken,
        handle: JoinHandle<V>,
    },
    Lost,
}

/// Everything the polling task needs besides the view.
#[derive(Clone)]
struct TickContext {
    api: Arc<dyn CampusApi>,
    section: watch::Receiver<Section>,
    interval: Duration,
    events: EventSender,
    issued: Arc<AtomicU64>,
    cancel: CancellationToken,
    classifier: ErrorClassifier,
}

impl TickContext {
    fn admin_visible(&self) -> bool {
        *self.section.borrow() == Section::Admin
    }

    fn next_request(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, request: u64) -> bool {
        !self.cancel.is_cancelled() && self.issued.load(Ordering::SeqCst) == request
    }
}

pub struct DashboardPoller<V: DashboardView> {
    api: Arc<dyn CampusApi>,
    section: watch::Receiver<Section>,
    interval: Duration,
    events: EventSender,
    issued: Arc<AtomicU64>,
    lifecycle: Lifecycle<V>,
}

impl<V: DashboardView> DashboardPoller<V> {
    pub fn new(
        api: Arc<dyn CampusApi>,
        view: V,
        section: watch::Receiver<Section>,
        interval: Duration,
        events: EventSender,
    ) -> Self {
        Self {
            api,
            section,
            interval,
            events,
            issued: Arc::new(AtomicU64::new(0)),
            lifecycle: Lifecycle::Idle { view },
        }
    }

    /// Starts ticking; the first tick runs immediately.
    pub fn start(&mut self) -> Result<(), PollerError> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Lost) {
            Lifecycle::Idle { view } => {
                let cancel = CancellationToken::new();
                let ctx = TickContext {
                    api: Arc::clone(&self.api),
                    section: self.section.clone(),
                    interval: self.interval,
                    events: self.events.clone(),
                    issued: Arc::clone(&self.issued),
                    cancel: cancel.clone(),
                    classifier: ErrorClassifier::new(),
                };
                let handle = tokio::spawn(poll_loop(ctx, view));
                self.lifecycle = Lifecycle::Active { cancel, handle };
                Ok(())
            }
            active @ Lifecycle::Active { .. } => {
                self.lifecycle = active;
                Err(PollerError::AlreadyRunning)
            }
            Lifecycle::Lost => Err(PollerError::ViewLost),
        }
    }

    /// Stops the timer, drops any in-flight request and takes the view back.
    ///
    /// Stopping an idle poller is a no-op. A stopped poller can be started again.
    pub async fn stop(&mut self) -> Result<(), PollerError> {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Lost) {
            Lifecycle::Active { cancel, handle } => {
                cancel.cancel();
                // Anything still in flight is now stale
                self.issued.fetch_add(1, Ordering::SeqCst);
                let view = handle.await?;
                self.lifecycle = Lifecycle::Idle { view };
                Ok(())
            }
            idle @ Lifecycle::Idle { .. } => {
                self.lifecycle = idle;
                Ok(())
            }
            Lifecycle::Lost => Err(PollerError::ViewLost),
        }
    }
}

#[cfg(test)]
impl<V: DashboardView> DashboardPoller<V> {
    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active { .. })
    }

    /// Number of dashboard requests issued so far.
    pub fn requests_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// The render targets, while the poller is idle.
    pub fn view(&self) -> Option<&V> {
        match &self.lifecycle {
            Lifecycle::Idle { view } => Some(view),
            _ => None,
        }
    }
}

async fn poll_loop<V: DashboardView>(ctx: TickContext, mut view: V) -> V {
    let mut ticker = tokio::time::interval(ctx.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_fetch_done: Option<Instant> = None;

    loop {
        let scheduled = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            scheduled = ticker.tick() => scheduled,
        };

        // This tick fell due while the previous fetch was still pending
        if last_fetch_done.is_some_and(|done| scheduled < done) {
            continue;
        }
        if !ctx.admin_visible() {
            continue;
        }

        let request = ctx.next_request();
        let outcome = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => break,
            outcome = ctx.api.dashboard() => outcome,
        };
        last_fetch_done = Some(Instant::now());

        match outcome {
            Ok(snapshot) => {
                if !ctx.is_current(request) || !ctx.admin_visible() {
                    ctx.events
                        .send_poller_event(
                            format!("Discarded stale dashboard response #{}", request),
                            EventType::Discarded,
                            LogLevel::Debug,
                        )
                        .await;
                    continue;
                }
                view.render(DashboardFields::from(&snapshot)).await;
            }
            Err(e) => {
                let log_level = ctx.classifier.classify_fetch_error(&e);
                ctx.events
                    .send_poller_event(format!("Polling error: {}", e), EventType::Error, log_level)
                    .await;
            }
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::environment::Environment;
    use crate::events::Event;
    use crate::model::{AttendanceRecord, ClassStatus, DashboardSnapshot, StudentStatus};
    use crate::workers::view::StatusColor;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    const INTERVAL: Duration = Duration::from_millis(2_000);

    enum Reply {
        Snapshot(DashboardSnapshot),
        Fail(u16),
    }

    /// Backend stand-in that counts dashboard calls and replays scripted replies.
    struct ScriptedApi {
        environment: Environment,
        calls: Arc<AtomicUsize>,
        replies: Mutex<VecDeque<Reply>>,
        latency: Duration,
    }

    impl ScriptedApi {
        fn new(replies: Vec<Reply>, latency: Duration) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let api = Arc::new(Self {
                environment: Environment::Local,
                calls: Arc::clone(&calls),
                replies: Mutex::new(replies.into()),
                latency,
            });
            (api, calls)
        }
    }

    #[async_trait::async_trait]
    impl CampusApi for ScriptedApi {
        fn environment(&self) -> &Environment {
            &self.environment
        }

        async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop_front();
            if !self.latency.is_zero() {
                sleep(self.latency).await;
            }
            match reply {
                Some(Reply::Snapshot(snapshot)) => Ok(snapshot),
                Some(Reply::Fail(status)) => Err(ApiError::Http {
                    status,
                    message: "scripted".to_string(),
                }),
                None => Ok(physics()),
            }
        }

        async fn student_status(&self) -> Result<StudentStatus, ApiError> {
            unimplemented!("not used by the poller")
        }

        async fn attendance(&self, _student_id: &str) -> Result<AttendanceRecord, ApiError> {
            unimplemented!("not used by the poller")
        }

        async fn chat(&self, _message: &str) -> Result<String, ApiError> {
            unimplemented!("not used by the poller")
        }
    }

    /// View that remembers every render.
    #[derive(Default)]
    struct RecordingView {
        renders: Vec<DashboardFields>,
    }

    impl RecordingView {
        fn current(&self) -> Option<&DashboardFields> {
            self.renders.last()
        }
    }

    #[async_trait::async_trait]
    impl DashboardView for RecordingView {
        async fn render(&mut self, fields: DashboardFields) {
            self.renders.push(fields);
        }
    }

    fn physics() -> DashboardSnapshot {
        DashboardSnapshot {
            current_class: "Physics 101".to_string(),
            status: ClassStatus::Ongoing,
            students_present: 27,
            overall_attendance_pct: 92.0,
        }
    }

    fn cancelled() -> DashboardSnapshot {
        DashboardSnapshot {
            current_class: "DBMS".to_string(),
            status: ClassStatus::Other("CANCELLED".to_string()),
            students_present: 0,
            overall_attendance_pct: 88.5,
        }
    }

    fn poller(
        api: Arc<ScriptedApi>,
        section: Section,
    ) -> (
        DashboardPoller<RecordingView>,
        watch::Sender<Section>,
        mpsc::Receiver<Event>,
    ) {
        let (section_tx, section_rx) = watch::channel(section);
        let (event_tx, event_rx) = mpsc::channel(64);
        let poller = DashboardPoller::new(
            api,
            RecordingView::default(),
            section_rx,
            INTERVAL,
            EventSender::new(event_tx),
        );
        (poller, section_tx, event_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_is_immediate_then_once_per_interval() {
        let (api, calls) = ScriptedApi::new(vec![], Duration::ZERO);
        let (mut poller, _section, _events) = poller(api, Section::Admin);

        poller.start().unwrap();
        sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "tick at time 0");

        sleep(Duration::from_millis(1_980)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "no second call before the interval");

        sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        sleep(INTERVAL * 3).await;
        assert_eq!(calls.load(Ordering::SeqCst), 5);

        poller.stop().await.unwrap();
        assert_eq!(poller.requests_issued(), 6, "stop invalidates the last request");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hidden_admin_section_issues_no_requests() {
        let (api, calls) = ScriptedApi::new(vec![], Duration::ZERO);
        let (mut poller, section, _events) = poller(api, Section::Student);

        poller.start().unwrap();
        sleep(INTERVAL * 5 + Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Visible again: the next tick fetches
        section.send(Section::Admin).unwrap();
        sleep(INTERVAL).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        section.send(Section::Teacher).unwrap();
        sleep(INTERVAL * 3).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        poller.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_renders_fields_and_color() {
        let (api, _calls) = ScriptedApi::new(
            vec![Reply::Snapshot(physics()), Reply::Snapshot(cancelled())],
            Duration::ZERO,
        );
        let (mut poller, _section, _events) = poller(api, Section::Admin);

        poller.start().unwrap();
        sleep(Duration::from_millis(2_100)).await;
        poller.stop().await.unwrap();

        let view = poller.view().unwrap();
        assert_eq!(view.renders.len(), 2);

        let first = &view.renders[0];
        assert_eq!(first.current_class, "Physics 101");
        assert_eq!(first.status, "ONGOING");
        assert_eq!(first.status_color, StatusColor::Affirmative);
        assert_eq!(first.students_present, "27");
        assert_eq!(first.attendance_pct, "92%");

        let second = &view.renders[1];
        assert_eq!(second.status, "CANCELLED");
        assert_eq!(second.status_color, StatusColor::Alert);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_previous_fields_and_keeps_polling() {
        let (api, calls) = ScriptedApi::new(
            vec![
                Reply::Snapshot(physics()),
                Reply::Fail(503),
                Reply::Fail(400),
                Reply::Snapshot(cancelled()),
            ],
            Duration::ZERO,
        );
        let (mut poller, _section, mut events) = poller(api, Section::Admin);

        poller.start().unwrap();
        // Ticks at 0, 2s and 4s: one success, two failures
        sleep(Duration::from_millis(4_100)).await;
        poller.stop().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let view = poller.view().unwrap();
        assert_eq!(view.renders.len(), 1);
        assert_eq!(view.current().unwrap().current_class, "Physics 101");

        let mut levels = Vec::new();
        while let Ok(event) = events.try_recv() {
            if event.event_type == EventType::Error {
                assert!(event.msg.starts_with("Polling error"));
                levels.push(event.log_level);
            }
        }
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error]);

        // Restarting resumes where the script left off
        poller.start().unwrap();
        sleep(Duration::from_millis(10)).await;
        poller.stop().await.unwrap();
        assert_eq!(
            poller.view().unwrap().current().unwrap().status_color,
            StatusColor::Alert
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_skips_overlapping_ticks() {
        // Each fetch takes 5s, longer than two intervals
        let (api, calls) = ScriptedApi::new(vec![], Duration::from_millis(5_000));
        let (mut poller, _section, _events) = poller(api, Section::Admin);

        poller.start().unwrap();
        sleep(Duration::from_millis(4_900)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "ticks at 2s and 4s are skipped");

        // Fetch resolves at 5s; the late tick is dropped too
        sleep(Duration::from_millis(200)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Next tick is on the 6s boundary
        sleep(Duration::from_millis(1_000)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        poller.stop().await.unwrap();
        assert_eq!(poller.view().unwrap().renders.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_drops_in_flight_request() {
        let (api, calls) = ScriptedApi::new(vec![], Duration::from_millis(1_000));
        let (mut poller, _section, _events) = poller(api, Section::Admin);

        poller.start().unwrap();
        sleep(Duration::from_millis(500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        poller.stop().await.unwrap();
        assert!(!poller.is_active());

        sleep(INTERVAL * 3).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "no requests after stop");
        assert!(poller.view().unwrap().renders.is_empty(), "late response not applied");
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_leaving_admin_is_discarded() {
        let (api, calls) = ScriptedApi::new(vec![], Duration::from_millis(1_000));
        let (mut poller, section, mut events) = poller(api, Section::Admin);

        poller.start().unwrap();
        sleep(Duration::from_millis(500)).await;
        section.send(Section::Student).unwrap();
        sleep(Duration::from_millis(1_000)).await;
        poller.stop().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(poller.view().unwrap().renders.is_empty());

        let mut discarded = false;
        while let Ok(event) = events.try_recv() {
            discarded |= event.event_type == EventType::Discarded;
        }
        assert!(discarded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_rejected() {
        let (api, _calls) = ScriptedApi::new(vec![], Duration::ZERO);
        let (mut poller, _section, _events) = poller(api, Section::Student);

        assert!(poller.view().is_some());
        poller.start().unwrap();
        assert!(poller.is_active());
        assert!(poller.view().is_none());
        assert!(matches!(poller.start(), Err(PollerError::AlreadyRunning)));

        poller.stop().await.unwrap();
        // Stopping twice is harmless
        poller.stop().await.unwrap();
        assert!(poller.view().is_some());
    }
}
