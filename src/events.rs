//! Event System
//!
//! Events flow from workers to the UI loop (or the headless printer). Some
//! carry a payload the UI applies to its state.

use crate::logging::{LogLevel, should_log_with_env};
use crate::lookups::{AttendanceSummary, ClassLocation, TeacherLocation};
use crate::workers::view::DashboardFields;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// Periodic admin dashboard refresh.
    DashboardPoller,
    /// Student "where is my class" lookup.
    ClassLookup,
    /// Student attendance lookup.
    AttendanceLookup,
    /// Teacher locator.
    TeacherLookup,
    /// Admin chat bot.
    Chat,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// A response that arrived too late to be applied.
    Discarded,
    /// Fresh dashboard fields for the live view.
    Snapshot,
}

/// Data an event hands to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Dashboard(DashboardFields),
    ClassLocation(Option<ClassLocation>),
    Attendance {
        student_id: String,
        summary: Option<AttendanceSummary>,
    },
    TeacherLocation {
        teacher: String,
        location: Option<TeacherLocation>,
    },
    ChatReply(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: Option<Payload>,
}

impl Event {
    pub fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn snapshot(fields: DashboardFields) -> Self {
        Self::new(
            Source::DashboardPoller,
            fields.to_string(),
            EventType::Snapshot,
            LogLevel::Info,
        )
        .with_payload(Payload::Dashboard(fields))
    }

    pub fn poller_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::DashboardPoller, msg, event_type, log_level)
    }

    /// Whether the event belongs in the activity log.
    pub fn should_display(&self) -> bool {
        // Snapshots update the live fields, not the log
        if self.event_type == EventType::Snapshot {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::view::StatusColor;

    fn fields() -> DashboardFields {
        DashboardFields {
            current_class: "DBMS".to_string(),
            status: "ONGOING".to_string(),
            status_color: StatusColor::Affirmative,
            students_present: "12".to_string(),
            attendance_pct: "80%".to_string(),
        }
    }

    #[test]
    fn test_snapshot_events_stay_out_of_the_log() {
        let event = Event::snapshot(fields());
        assert!(!event.should_display());
        assert_eq!(event.msg, "DBMS | ONGOING | 12 present | 80%");
    }

    #[test]
    fn test_info_and_above_are_displayed() {
        let warn = Event::poller_with_level("x".to_string(), EventType::Error, LogLevel::Warn);
        assert!(warn.should_display());
        let ok = Event::new(Source::Chat, "y".to_string(), EventType::Success, LogLevel::Debug);
        assert!(ok.should_display());
    }

    #[test]
    fn test_display_format() {
        let event = Event::poller_with_level(
            "Polling error".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        let text = event.to_string();
        assert!(text.starts_with("Error ["));
        assert!(text.ends_with("] Polling error"));
    }
}
