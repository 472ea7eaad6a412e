// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;

/// Connection settings for the HR backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the REST API, e.g. `https://hr.example.com/api`.
    pub base_url: String,
    /// Bearer credential sent with every request.
    pub token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000/api"),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Checks that the settings can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is empty or not http(s)
    /// - The timeout is zero
    /// - The token is present but blank
    pub fn validate(&self) -> Result<(), ApiError> {
        let base_url: &str = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::InvalidConfig {
                field: "base_url",
                message: String::from("must not be empty"),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig {
                field: "base_url",
                message: format!("'{base_url}' is not an http(s) URL"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig {
                field: "timeout_secs",
                message: String::from("must be at least 1"),
            });
        }
        if self.token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApiError::InvalidConfig {
                field: "token",
                message: String::from("must not be blank"),
            });
        }
        Ok(())
    }

    /// Joins a resource path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
