//! Wire types for the college backend.

use crate::consts::cli_consts::campus::ONGOING;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// State of the class in the current slot.
///
/// Any wire value other than `ONGOING` is kept verbatim so it can be shown as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClassStatus {
    Ongoing,
    Other(String),
}

impl ClassStatus {
    pub fn is_ongoing(&self) -> bool {
        matches!(self, ClassStatus::Ongoing)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClassStatus::Ongoing => ONGOING,
            ClassStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ClassStatus {
    fn from(raw: String) -> Self {
        if raw == ONGOING {
            ClassStatus::Ongoing
        } else {
            ClassStatus::Other(raw)
        }
    }
}

impl From<ClassStatus> for String {
    fn from(status: ClassStatus) -> Self {
        match status {
            ClassStatus::Ongoing => ONGOING.to_string(),
            ClassStatus::Other(raw) => raw,
        }
    }
}

impl Display for ClassStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time read of `GET /admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSnapshot {
    pub current_class: String,
    pub status: ClassStatus,
    pub students_present: u32,
    pub overall_attendance_pct: f64,
}

/// `GET /student/status`: the live class slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentStatus {
    #[serde(default)]
    pub time: Option<String>,
    pub class: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub teacher: String,
    pub class_status: ClassStatus,
    #[serde(default)]
    pub students_present: u32,
    #[serde(default)]
    pub total_students: u32,
}

/// `GET /student/attendance/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: String,
    pub attended: u32,
    pub total: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
