//! Render targets for the live dashboard

use crate::events::Event;
use crate::model::{ClassStatus, DashboardSnapshot};
use crate::workers::core::EventSender;
use std::fmt::{Display, Formatter};

/// Top-level sections of the client; the poller only fetches while `Admin` is shown.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Section {
    #[default]
    Student,
    Teacher,
    Admin,
}

/// Color of the live status field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusColor {
    Affirmative,
    Alert,
}

impl StatusColor {
    pub fn for_status(status: &ClassStatus) -> Self {
        if status.is_ongoing() {
            StatusColor::Affirmative
        } else {
            StatusColor::Alert
        }
    }
}

/// The four live fields plus the status color, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFields {
    pub current_class: String,
    pub status: String,
    pub status_color: StatusColor,
    pub students_present: String,
    pub attendance_pct: String,
}

impl From<&DashboardSnapshot> for DashboardFields {
    fn from(snapshot: &DashboardSnapshot) -> Self {
        Self {
            current_class: snapshot.current_class.clone(),
            status: snapshot.status.to_string(),
            status_color: StatusColor::for_status(&snapshot.status),
            students_present: snapshot.students_present.to_string(),
            attendance_pct: format!("{}%", snapshot.overall_attendance_pct),
        }
    }
}

impl Display for DashboardFields {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} present | {}",
            self.current_class, self.status, self.students_present, self.attendance_pct
        )
    }
}

/// Where the poller writes a fresh snapshot.
///
/// A render replaces every field at once; the poller never calls it for a failed fetch.
#[async_trait::async_trait]
pub trait DashboardView: Send + 'static {
    async fn render(&mut self, fields: DashboardFields);
}

/// Forwards renders to the UI loop as snapshot events.
pub struct EventView {
    events: EventSender,
}

impl EventView {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

#[async_trait::async_trait]
impl DashboardView for EventView {
    async fn render(&mut self, fields: DashboardFields) {
        self.events.send_event(Event::snapshot(fields)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, Payload};
    use tokio::sync::mpsc;

    fn snapshot(class: &str, status: &str, present: u32, pct: f64) -> DashboardSnapshot {
        DashboardSnapshot {
            current_class: class.to_string(),
            status: ClassStatus::from(status.to_string()),
            students_present: present,
            overall_attendance_pct: pct,
        }
    }

    #[test]
    fn test_physics_snapshot_renders_exact_fields() {
        let fields = DashboardFields::from(&snapshot("Physics 101", "ONGOING", 27, 92.0));
        assert_eq!(fields.current_class, "Physics 101");
        assert_eq!(fields.status, "ONGOING");
        assert_eq!(fields.status_color, StatusColor::Affirmative);
        assert_eq!(fields.students_present, "27");
        assert_eq!(fields.attendance_pct, "92%");
    }

    #[test]
    fn test_non_ongoing_status_is_alert() {
        for status in ["CANCELLED", "N/A", "ongoing", ""] {
            let fields = DashboardFields::from(&snapshot("Physics 101", status, 27, 92.0));
            assert_eq!(fields.status_color, StatusColor::Alert, "status {:?}", status);
        }
    }

    #[test]
    fn test_color_ignores_other_fields() {
        let a = DashboardFields::from(&snapshot("DBMS", "CANCELLED", 0, 0.0));
        let b = DashboardFields::from(&snapshot("CSE-2A", "CANCELLED", 30, 100.0));
        assert_eq!(a.status_color, b.status_color);
        assert_eq!(a.status_color, StatusColor::Alert);
    }

    #[test]
    fn test_fractional_percentage_kept() {
        let fields = DashboardFields::from(&snapshot("DBMS", "ONGOING", 3, 85.5));
        assert_eq!(fields.attendance_pct, "85.5%");
    }

    #[tokio::test]
    async fn test_event_view_emits_snapshot_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut view = EventView::new(EventSender::new(tx));
        let fields = DashboardFields::from(&snapshot("DBMS", "ONGOING", 3, 85.5));

        view.render(fields.clone()).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Snapshot);
        assert_eq!(event.payload, Some(Payload::Dashboard(fields)));
    }
}
