// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::review::ReviewStatus;
use crate::snapshot::RequiredField;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required assignment field has not been filled in.
    MissingField(RequiredField),
    /// The review would be due before the subject it reviews.
    DueDateBeforeSubject {
        /// The requested review due date.
        due_date: Date,
        /// The due date of the goal or task under review.
        subject_due_date: Date,
    },
    /// Every candidate subject already has an active review.
    NoEligibleSubject,
    /// A review status change that the lifecycle does not allow.
    InvalidStatusTransition {
        /// The current status.
        from: ReviewStatus,
        /// The requested status.
        to: ReviewStatus,
    },
    /// A review status string that is not recognized.
    InvalidReviewStatus(String),
    /// A goal status string that is not recognized.
    InvalidGoalStatus(String),
    /// A review kind string that is not recognized.
    InvalidReviewKind(String),
    /// Submitted review text is empty.
    EmptyReviewText,
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Required field '{field}' is empty"),
            Self::DueDateBeforeSubject {
                due_date,
                subject_due_date,
            } => {
                write!(
                    f,
                    "Review due date {due_date} is before the subject due date {subject_due_date}"
                )
            }
            Self::NoEligibleSubject => {
                write!(f, "No eligible subject: every candidate already has an active review")
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot move a review from '{from}' to '{to}'")
            }
            Self::InvalidReviewStatus(value) => write!(f, "Invalid review status: {value}"),
            Self::InvalidGoalStatus(value) => write!(f, "Invalid goal status: {value}"),
            Self::InvalidReviewKind(value) => {
                write!(f, "Invalid review kind: {value}. Expected 'goal' or 'task'")
            }
            Self::EmptyReviewText => write!(f, "Review text cannot be empty"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
