//! Background runners for one-shot lookups triggered from the UI

use crate::api::CampusApi;
use crate::api::error::ApiError;
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, Payload, Source};
use crate::logging::LogLevel;
use crate::lookups;
use crate::workers::core::EventSender;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A user action that needs one backend round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    ClassLocation,
    Attendance { student_id: String },
    TeacherLocation { teacher: String },
    Chat { message: String },
}

impl LookupRequest {
    pub fn source(&self) -> Source {
        match self {
            LookupRequest::ClassLocation => Source::ClassLookup,
            LookupRequest::Attendance { .. } => Source::AttendanceLookup,
            LookupRequest::TeacherLocation { .. } => Source::TeacherLookup,
            LookupRequest::Chat { .. } => Source::Chat,
        }
    }
}

/// Runs the lookup on the runtime and reports the outcome as an event.
pub fn spawn_lookup(
    api: Arc<dyn CampusApi>,
    events: EventSender,
    request: LookupRequest,
) -> JoinHandle<()> {
    tokio::spawn(async move { run_lookup(api.as_ref(), &events, request).await })
}

pub async fn run_lookup(api: &dyn CampusApi, events: &EventSender, request: LookupRequest) {
    let source = request.source();
    let classifier = ErrorClassifier::new();

    let (message, event_type, log_level, payload) = match request {
        LookupRequest::ClassLocation => match lookups::check_class_location(api).await {
            Ok(location) => (
                format!("Class location: {}", location),
                EventType::Success,
                LogLevel::Info,
                Payload::ClassLocation(Some(location)),
            ),
            Err(e) => failure(&classifier, "class location", &e, Payload::ClassLocation(None)),
        },
        LookupRequest::Attendance { student_id } => {
            match lookups::check_attendance(api, &student_id).await {
                Ok(summary) => (
                    format!("Attendance for {}: {}", student_id, summary),
                    EventType::Success,
                    LogLevel::Info,
                    Payload::Attendance {
                        student_id,
                        summary: Some(summary),
                    },
                ),
                Err(e) => {
                    let payload = Payload::Attendance {
                        student_id: student_id.clone(),
                        summary: None,
                    };
                    failure(&classifier, &format!("attendance for {}", student_id), &e, payload)
                }
            }
        }
        LookupRequest::TeacherLocation { teacher } => {
            match lookups::locate_teacher(api, &teacher).await {
                Ok(location) => (
                    format!("{}: {}", teacher, location),
                    EventType::Success,
                    LogLevel::Info,
                    Payload::TeacherLocation {
                        teacher,
                        location: Some(location),
                    },
                ),
                Err(e) => {
                    let payload = Payload::TeacherLocation {
                        teacher: teacher.clone(),
                        location: None,
                    };
                    failure(&classifier, &format!("location of {}", teacher), &e, payload)
                }
            }
        }
        LookupRequest::Chat { message } => {
            let (reply, error) = lookups::chat_reply(api, &message).await;
            match error {
                None => (
                    "Bot replied".to_string(),
                    EventType::Refresh,
                    LogLevel::Debug,
                    Payload::ChatReply(reply),
                ),
                Some(e) => failure(&classifier, "chat reply", &e, Payload::ChatReply(reply)),
            }
        }
    };

    events
        .send_lookup_event(source, message, event_type, log_level, payload)
        .await;
}

fn failure(
    classifier: &ErrorClassifier,
    what: &str,
    error: &ApiError,
    payload: Payload,
) -> (String, EventType, LogLevel, Payload) {
    (
        format!("Failed to fetch {}: {}", what, error),
        EventType::Error,
        classifier.classify_fetch_error(error),
        payload,
    )
}
