//! One-shot lookups
//!
//! Student class location, attendance, teacher locator and the admin chat.
//! Each is a single request whose outcome is rendered once; failures are shown
//! inline by the caller.

use crate::api::CampusApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::{attendance, messages};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassLocation {
    InSession {
        class: String,
        room: String,
        teacher: String,
    },
    Cancelled,
}

impl Display for ClassLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassLocation::InSession {
                class,
                room,
                teacher,
            } => write!(f, "{} | {} | Teacher: {}", class, room, teacher),
            ClassLocation::Cancelled => f.write_str(messages::CLASS_CANCELLED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeacherLocation {
    Teaching { room: String, class: String },
    FreePeriod,
}

impl Display for TeacherLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TeacherLocation::Teaching { room, class } => {
                write!(f, "{} | Teaching: {}", room, class)
            }
            TeacherLocation::FreePeriod => f.write_str(messages::FREE_PERIOD),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttendanceBand {
    /// At or above 85%
    Healthy,
    /// 75% up to 85%
    Warning,
    /// Below 75%
    Critical,
}

impl AttendanceBand {
    pub fn for_pct(pct: f64) -> Self {
        if pct < attendance::CRITICAL_PCT {
            AttendanceBand::Critical
        } else if pct < attendance::HEALTHY_PCT {
            AttendanceBand::Warning
        } else {
            AttendanceBand::Healthy
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub pct: f64,
    pub attended: u32,
    pub total: u32,
    pub band: AttendanceBand,
}

impl AttendanceSummary {
    /// Percentage exactly as the backend reported it.
    pub fn pct_label(&self) -> String {
        format!("{}%", self.pct)
    }

    pub fn attended_label(&self) -> String {
        format!("Attended: {}/{}", self.attended, self.total)
    }
}

impl Display for AttendanceSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.pct_label(), self.attended_label())
    }
}

pub async fn check_class_location(api: &dyn CampusApi) -> Result<ClassLocation, ApiError> {
    let status = api.student_status().await?;
    if status.class_status.is_ongoing() {
        Ok(ClassLocation::InSession {
            class: status.class,
            room: status.room,
            teacher: status.teacher,
        })
    } else {
        Ok(ClassLocation::Cancelled)
    }
}

pub async fn check_attendance(
    api: &dyn CampusApi,
    student_id: &str,
) -> Result<AttendanceSummary, ApiError> {
    let record = api.attendance(student_id).await?;
    Ok(AttendanceSummary {
        pct: record.pct,
        attended: record.attended,
        total: record.total,
        band: AttendanceBand::for_pct(record.pct),
    })
}

/// The backend has no per-teacher endpoint, so this answers from the live slot.
pub async fn locate_teacher(
    api: &dyn CampusApi,
    teacher: &str,
) -> Result<TeacherLocation, ApiError> {
    let status = api.student_status().await?;
    if status.teacher == teacher && status.class_status.is_ongoing() {
        Ok(TeacherLocation::Teaching {
            room: status.room,
            class: status.class,
        })
    } else {
        Ok(TeacherLocation::FreePeriod)
    }
}

/// Trimmed chat message, or `None` when there is nothing to send.
pub fn prepare_chat_message(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The bot's reply, or the fixed apology when the backend can't be reached.
pub async fn chat_reply(api: &dyn CampusApi, message: &str) -> (String, Option<ApiError>) {
    match api.chat(message).await {
        Ok(reply) => (reply, None),
        Err(e) => (messages::CHAT_UNREACHABLE.to_string(), Some(e)),
    }
}
