// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review assignments and their lifecycle.
//!
//! Goal reviews and task reviews share one record shape. The subject
//! reference is the only structural difference and is modeled by
//! [`SubjectRef`], which serializes as either a `goalId` or a `taskId` key.
//!
//! Lifecycle:
//! - Pending → In Progress
//! - Pending → Completed
//! - In Progress → Completed
//!
//! Completed is terminal. Deletion is a hard delete and has no status.

use crate::error::DomainError;
use crate::iso_date;
use crate::types::{DepartmentId, EmployeeId, GoalId, ReviewId, TaskId, TeamId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Which kind of review an assignment is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewKind {
    /// A manager reviews a team goal.
    Goal,
    /// An employee reviews their task.
    Task,
}

impl ReviewKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Task => "task",
        }
    }

    /// Returns the backend collection that stores this kind of review.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Goal => "goalReviews",
            Self::Task => "taskReviews",
        }
    }
}

impl FromStr for ReviewKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "goal" => Ok(Self::Goal),
            "task" => Ok(Self::Task),
            _ => Err(DomainError::InvalidReviewKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a review assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReviewStatus {
    /// Assigned by HR, not yet started.
    #[default]
    Pending,
    /// The reviewer has started.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Review text has been submitted. Terminal.
    Completed,
}

impl ReviewStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns true if an assignment in this status still blocks a new
    /// assignment for the same subject.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Completed)
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress | Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }
}

impl FromStr for ReviewStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" | "pending" => Ok(Self::Pending),
            "In Progress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "Completed" | "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidReviewStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The goal or task a review targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectRef {
    /// A goal review subject.
    #[serde(rename = "goalId")]
    Goal(GoalId),
    /// A task review subject.
    #[serde(rename = "taskId")]
    Task(TaskId),
}

impl SubjectRef {
    /// Returns the kind of review this subject implies.
    #[must_use]
    pub const fn kind(&self) -> ReviewKind {
        match self {
            Self::Goal(_) => ReviewKind::Goal,
            Self::Task(_) => ReviewKind::Task,
        }
    }

    /// Returns the goal id if this is a goal subject.
    #[must_use]
    pub const fn goal_id(&self) -> Option<GoalId> {
        match self {
            Self::Goal(id) => Some(*id),
            Self::Task(_) => None,
        }
    }

    /// Returns the task id if this is a task subject.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Task(id) => Some(*id),
            Self::Goal(_) => None,
        }
    }
}

/// A goal review or task review record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssignment {
    /// The review identifier.
    pub id: ReviewId,
    /// The reviewed goal or task.
    #[serde(flatten)]
    pub subject: SubjectRef,
    /// The team the subject belongs to.
    pub team_id: TeamId,
    /// The department selected when the review was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// The reviewing employee (task reviews only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// When the review is due.
    #[serde(with = "iso_date")]
    pub due_date: Date,
    /// Instructions for the reviewer.
    #[serde(default)]
    pub description: String,
    /// Current status.
    pub status: ReviewStatus,
    /// The submitted review text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    /// When the review text was submitted.
    #[serde(
        default,
        rename = "submissionDate",
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_on: Option<Date>,
    /// Title of the subject, when the backend embeds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_title: Option<String>,
    /// Due date of the subject, when the backend embeds it.
    #[serde(
        default,
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject_due_date: Option<Date>,
}

impl ReviewAssignment {
    /// Returns the kind of review this is.
    #[must_use]
    pub const fn kind(&self) -> ReviewKind {
        self.subject.kind()
    }

    /// Returns true if this assignment blocks a new one for its subject.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Create/update request body for a review assignment.
///
/// This is the serialized form of a validated assignment snapshot, or of an
/// existing record being updated by its reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    /// The reviewed goal or task.
    #[serde(flatten)]
    pub subject: SubjectRef,
    /// The team the subject belongs to.
    pub team_id: TeamId,
    /// The selected department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// The reviewing employee (task reviews only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// When the review is due.
    #[serde(with = "iso_date")]
    pub due_date: Date,
    /// Instructions for the reviewer.
    pub description: String,
    /// Requested status.
    pub status: ReviewStatus,
    /// Submitted review text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    /// Submission date of the review text.
    #[serde(
        default,
        rename = "submissionDate",
        with = "iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_on: Option<Date>,
}

impl From<&ReviewAssignment> for ReviewDraft {
    fn from(record: &ReviewAssignment) -> Self {
        Self {
            subject: record.subject,
            team_id: record.team_id,
            department_id: record.department_id,
            employee_id: record.employee_id,
            due_date: record.due_date,
            description: record.description.clone(),
            status: record.status,
            review: record.review.clone(),
            submitted_on: record.submitted_on,
        }
    }
}

/// Records the reviewer's submitted text and marks the review completed.
///
/// # Arguments
///
/// * `record` - The assignment being completed
/// * `text` - The review text
/// * `submitted_on` - The submission date
///
/// # Errors
///
/// Returns an error if:
/// - The text is empty after trimming
/// - The assignment is already completed
pub fn complete_review(
    record: &ReviewAssignment,
    text: &str,
    submitted_on: Date,
) -> Result<ReviewAssignment, DomainError> {
    let text: &str = text.trim();
    if text.is_empty() {
        return Err(DomainError::EmptyReviewText);
    }

    if !record.status.can_transition_to(ReviewStatus::Completed) {
        return Err(DomainError::InvalidStatusTransition {
            from: record.status,
            to: ReviewStatus::Completed,
        });
    }

    let mut completed: ReviewAssignment = record.clone();
    completed.status = ReviewStatus::Completed;
    completed.review = Some(text.to_string());
    completed.submitted_on = Some(submitted_on);
    Ok(completed)
}
