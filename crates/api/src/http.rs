// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! REST implementation of [`EntityGateway`].

use crate::config::GatewayConfig;
use crate::error::ApiError;
use crate::gateway::EntityGateway;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, header};
use review_desk_domain::{
    Department, DepartmentId, Employee, Goal, GoalId, ReviewAssignment, ReviewDraft, ReviewId,
    ReviewKind, Task, TaskId, Team, TeamId,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Gateway backed by the HR REST API.
///
/// Every request carries the configured bearer credential.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpGateway {
    /// Builds a gateway from validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let mut headers: header::HeaderMap = header::HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value: header::HeaderValue =
                header::HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(
                    |_| ApiError::InvalidConfig {
                        field: "token",
                        message: String::from("contains characters not allowed in a header"),
                    },
                )?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client: Client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Returns the settings this gateway was built with.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url: String = self.config.endpoint(path);
        debug!(%url, "GET");
        let response: reqwest::Response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from_send)?;
        let body: String = Self::handle_response(path, response).await?;
        decode(&body)
    }

    async fn send_draft(
        &self,
        method: Method,
        path: &str,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError> {
        let url: String = self.config.endpoint(path);
        debug!(%url, %method, "sending review");
        let response: reqwest::Response = self
            .client
            .request(method, &url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::from_send)?;
        let body: String = Self::handle_response(path, response).await?;
        decode(&body)
    }

    async fn handle_response(path: &str, response: reqwest::Response) -> Result<String, ApiError> {
        let status: StatusCode = response.status();
        if status.is_success() {
            return response.text().await.map_err(ApiError::from_send);
        }

        let message: String = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "request failed");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Authentication {
                status: status.as_u16(),
                message,
            }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string())),
            _ => Err(ApiError::Server {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Decodes a JSON body. An empty body reads as `null`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body: &str = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl EntityGateway for HttpGateway {
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get("departments", &[]).await
    }

    async fn list_teams(&self, department_id: DepartmentId) -> Result<Vec<Team>, ApiError> {
        self.get("teams", &[("departmentId", department_id.to_string())])
            .await
    }

    async fn get_team(&self, team_id: TeamId) -> Result<Team, ApiError> {
        self.get(&format!("teams/{team_id}"), &[]).await
    }

    async fn list_goals(&self, team_id: TeamId) -> Result<Vec<Goal>, ApiError> {
        self.get(&format!("goals/team/{team_id}"), &[]).await
    }

    async fn list_tasks(&self, goal_id: GoalId) -> Result<Vec<Task>, ApiError> {
        self.get(&format!("tasks/project/{goal_id}"), &[]).await
    }

    async fn get_task(&self, task_id: TaskId) -> Result<Task, ApiError> {
        self.get(&format!("tasks/{task_id}"), &[]).await
    }

    async fn get_task_employee(&self, task_id: TaskId) -> Result<Option<Employee>, ApiError> {
        self.get(&format!("tasks/task/{task_id}/employee"), &[])
            .await
    }

    async fn list_reviews(&self, kind: ReviewKind) -> Result<Vec<ReviewAssignment>, ApiError> {
        self.get(kind.collection(), &[]).await
    }

    async fn create_review(
        &self,
        kind: ReviewKind,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError> {
        self.send_draft(Method::POST, kind.collection(), draft)
            .await
    }

    async fn update_review(
        &self,
        kind: ReviewKind,
        id: ReviewId,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError> {
        self.send_draft(Method::PUT, &format!("{}/{id}", kind.collection()), draft)
            .await
    }

    async fn delete_review(&self, kind: ReviewKind, id: ReviewId) -> Result<(), ApiError> {
        let path: String = format!("{}/{id}", kind.collection());
        let url: String = self.config.endpoint(&path);
        debug!(%url, "DELETE");
        let response: reqwest::Response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from_send)?;
        Self::handle_response(&path, response).await?;
        Ok(())
    }
}
