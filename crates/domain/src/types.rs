// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::iso_date;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Declares a transparent numeric identifier so ids of different entities
/// cannot be mixed up.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a backend identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the backend identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a department.
    DepartmentId
);
entity_id!(
    /// Identifier of a team.
    TeamId
);
entity_id!(
    /// Identifier of a goal.
    GoalId
);
entity_id!(
    /// Identifier of a task.
    TaskId
);
entity_id!(
    /// Identifier of an employee.
    EmployeeId
);
entity_id!(
    /// Identifier of a goal or task review assignment.
    ReviewId
);

/// A department, the root of the selection hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// The department identifier.
    pub id: DepartmentId,
    /// The department name.
    pub name: String,
}

/// A team. Every team belongs to exactly one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// The team identifier.
    pub id: TeamId,
    /// The team name.
    pub name: String,
    /// The owning department.
    pub department_id: DepartmentId,
}

/// Progress of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// Not started yet.
    Scheduled,
    /// Work is underway.
    InProgress,
    /// The goal is done.
    Completed,
}

impl GoalStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidGoalStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A goal owned by a team.
///
/// The goals-by-team listing does not repeat the team id, so `team_id` is
/// optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// The goal identifier.
    pub id: GoalId,
    /// The goal title.
    pub title: String,
    /// The owning team, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    /// Current progress. `None` when the goal is only known from a review
    /// summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    /// The date the goal is due.
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
}

/// Progress of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
    /// A status value this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A task belonging to a goal and assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// The task identifier.
    pub id: TaskId,
    /// The task title.
    #[serde(default)]
    pub title: String,
    /// The owning goal, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
    /// The assignee, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// The date the task is due.
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
    /// Current progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// An employee, as returned by the task-assignee lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The employee identifier.
    pub id: EmployeeId,
    /// The login name.
    pub username: String,
    /// The employee's role, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
