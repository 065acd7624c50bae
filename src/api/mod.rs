use crate::environment::Environment;
use crate::api::error::ApiError;
use crate::model::{AttendanceRecord, DashboardSnapshot, StudentStatus};

pub(crate) mod client;
pub use client::CampusClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// The college backend as seen by the client.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CampusApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Latest admin dashboard snapshot.
    async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError>;

    /// Live class slot: subject, room, teacher and whether it is running.
    async fn student_status(&self) -> Result<StudentStatus, ApiError>;

    /// Attendance totals for one student.
    async fn attendance(&self, student_id: &str) -> Result<AttendanceRecord, ApiError>;

    /// Sends a message to the admin bot and returns its reply.
    async fn chat(&self, message: &str) -> Result<String, ApiError>;
}
