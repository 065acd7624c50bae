//! Dashboard state update logic
//!
//! Applies worker events to the dashboard state

use super::state::{ChatRole, DashboardState, Panel};
use crate::events::{Event as WorkerEvent, Payload};

impl DashboardState {
    /// Drain queued events into the state.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            if event.should_display() {
                self.add_to_activity_log(event);
            }
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        let Some(payload) = &event.payload else {
            return;
        };

        match payload {
            Payload::Dashboard(fields) => {
                self.live = Some(fields.clone());
                self.last_refresh = Some(event.timestamp.clone());
            }
            Payload::ClassLocation(location) => {
                self.class_location = to_panel(location.clone());
            }
            Payload::Attendance {
                student_id,
                summary,
            } => {
                // A reply for a student that is no longer selected is dropped
                if self.attendance_for.as_deref() == Some(student_id.as_str()) {
                    self.attendance = to_panel(summary.clone());
                }
            }
            Payload::TeacherLocation { teacher, location } => {
                if self.teacher_for.as_deref() == Some(teacher.as_str()) {
                    self.teacher_location = to_panel(location.clone());
                }
            }
            Payload::ChatReply(reply) => {
                self.push_chat(ChatRole::Bot, reply.clone());
                self.chat_pending = false;
            }
        }
    }
}

fn to_panel<T>(value: Option<T>) -> Panel<T> {
    match value {
        Some(value) => Panel::Ready(value),
        None => Panel::Failed,
    }
}
