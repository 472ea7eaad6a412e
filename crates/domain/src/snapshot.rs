// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::review::{ReviewAssignment, ReviewKind, ReviewStatus};
use crate::types::{DepartmentId, EmployeeId, GoalId, TaskId, TeamId};
use time::Date;

/// The user-editable fields of an in-progress review assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentSnapshot {
    /// The selected department (or the manager's department).
    pub department_id: Option<DepartmentId>,
    /// The selected team.
    pub team_id: Option<TeamId>,
    /// The selected goal.
    pub goal_id: Option<GoalId>,
    /// The selected task (task reviews only).
    pub task_id: Option<TaskId>,
    /// The task's assignee (task reviews only, derived).
    pub employee_id: Option<EmployeeId>,
    /// When the review is due.
    pub due_date: Option<Date>,
    /// Instructions for the reviewer.
    pub description: String,
    /// Requested status.
    pub status: ReviewStatus,
}

impl AssignmentSnapshot {
    /// Seeds a snapshot from an existing assignment.
    ///
    /// A task review does not record its goal, so `goal_id` is taken from
    /// the caller (it is `None` when unknown).
    #[must_use]
    pub fn from_assignment(record: &ReviewAssignment, goal_id: Option<GoalId>) -> Self {
        Self {
            department_id: record.department_id,
            team_id: Some(record.team_id),
            goal_id: record.subject.goal_id().or(goal_id),
            task_id: record.subject.task_id(),
            employee_id: record.employee_id,
            due_date: Some(record.due_date),
            description: record.description.clone(),
            status: record.status,
        }
    }
}

/// A field that must be filled in before an assignment can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// The department or manager.
    Department,
    /// The team.
    Team,
    /// The goal.
    Goal,
    /// The task.
    Task,
    /// The review due date.
    DueDate,
    /// The review description.
    Description,
}

impl RequiredField {
    /// Returns the fields a review of the given kind requires, in form order.
    #[must_use]
    pub const fn for_kind(kind: ReviewKind) -> &'static [Self] {
        match kind {
            ReviewKind::Goal => &[
                Self::Department,
                Self::Team,
                Self::Goal,
                Self::DueDate,
                Self::Description,
            ],
            ReviewKind::Task => &[
                Self::Department,
                Self::Team,
                Self::Goal,
                Self::Task,
                Self::DueDate,
                Self::Description,
            ],
        }
    }

    /// Returns the field name used in messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Team => "team",
            Self::Goal => "goal",
            Self::Task => "task",
            Self::DueDate => "due date",
            Self::Description => "description",
        }
    }

    /// Returns true if this field has a value in the snapshot.
    #[must_use]
    pub fn is_filled(self, snapshot: &AssignmentSnapshot) -> bool {
        match self {
            Self::Department => snapshot.department_id.is_some(),
            Self::Team => snapshot.team_id.is_some(),
            Self::Goal => snapshot.goal_id.is_some(),
            Self::Task => snapshot.task_id.is_some(),
            Self::DueDate => snapshot.due_date.is_some(),
            Self::Description => !snapshot.description.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
