// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use review_desk_domain::{DomainError, RequiredField, ReviewKind};

/// Errors that can occur during form state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The chosen option is not in the current selectable list.
    OptionNotAvailable {
        /// The field being set.
        field: RequiredField,
        /// The rejected identifier.
        id: i64,
    },
    /// The field does not exist for this kind of review.
    WrongReviewKind {
        /// The kind of review the form is editing.
        kind: ReviewKind,
        /// The field that was set.
        field: &'static str,
    },
    /// The employee is derived from the selected task and cannot be set.
    EmployeeIsDerived,
    /// The candidate endpoints are unreachable; the form is view-only.
    ReadOnly,
    /// A submission is already outstanding.
    SubmissionInFlight,
    /// The review was stored. The form accepts no further commands.
    Closed,
    /// A fetch completion carried data for a different level.
    UnexpectedPayload {
        /// The level that was waiting on the request.
        level: &'static str,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::OptionNotAvailable { field, id } => {
                write!(f, "{id} is not a selectable {field}")
            }
            Self::WrongReviewKind { kind, field } => {
                write!(f, "A {kind} review has no '{field}' field")
            }
            Self::EmployeeIsDerived => {
                write!(f, "The reviewing employee is taken from the selected task")
            }
            Self::ReadOnly => write!(f, "The form is read-only: the backend is unreachable"),
            Self::SubmissionInFlight => write!(f, "A submission is already in progress"),
            Self::Closed => write!(f, "The review was already stored; open a new form"),
            Self::UnexpectedPayload { level } => {
                write!(f, "Fetch result does not match the {level} level")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
