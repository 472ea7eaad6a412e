// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the gateway and session layer.

use review_desk::{CoreError, FetchFailure};
use review_desk_domain::DomainError;
use thiserror::Error;

/// Gateway and session errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the credential (401 or 403).
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend returned an error status.
    #[error("Server error {status}: {message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The backend could not be reached (connection refused, DNS, timeout).
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Any other HTTP client failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The backend rejected a create or update.
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The form rejected a command.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A domain rule was violated outside the form.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The gateway configuration is unusable.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending setting.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// Every effect task has finished but the form is still waiting.
    #[error("Session has no outstanding work to wait on")]
    SessionIdle,
}

impl ApiError {
    /// Maps a failure to send a request, distinguishing an unreachable
    /// backend from other client errors.
    #[must_use]
    pub fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Http(err)
        }
    }

    /// Returns true if the backend could not be reached at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// Converts the error into the failure a form level records.
    #[must_use]
    pub fn to_fetch_failure(&self) -> FetchFailure {
        if self.is_unreachable() {
            FetchFailure::unreachable(self.to_string())
        } else {
            FetchFailure::new(self.to_string())
        }
    }
}
