//! College Backend Client
//!
//! JSON over HTTP against the dashboard, student and chat endpoints.

use crate::api::CampusApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::model::{AttendanceRecord, ChatRequest, ChatResponse, DashboardSnapshot, StudentStatus};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with client version
const USER_AGENT: &str = concat!("college-pulse/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CampusClient {
    client: Client,
    environment: Environment,
}

impl CampusClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .json(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl CampusApi for CampusClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
        self.get_request("admin/dashboard").await
    }

    async fn student_status(&self) -> Result<StudentStatus, ApiError> {
        self.get_request("student/status").await
    }

    async fn attendance(&self, student_id: &str) -> Result<AttendanceRecord, ApiError> {
        let endpoint = format!("student/attendance/{}", urlencoding::encode(student_id));
        self.get_request(&endpoint).await
    }

    async fn chat(&self, message: &str) -> Result<String, ApiError> {
        let reply: ChatResponse = self
            .post_request("admin/chat", &ChatRequest { message })
            .await?;
        Ok(reply.response)
    }
}
