// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use review_desk_domain::{
    Department, DepartmentId, Employee, EmployeeId, Goal, GoalId, ReviewAssignment, ReviewDraft,
    ReviewId, ReviewKind, ReviewStatus, Task, TaskId, Team, TeamId,
};
use time::Date;

/// Identifies one outstanding fetch or submission.
///
/// Ids increase monotonically within a form. A completion is applied only
/// if the level that issued it is still waiting on the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Wraps a raw request number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw request number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A command represents user intent or an I/O completion as data only.
///
/// Commands are the only way to change the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose (or clear) the department.
    SelectDepartment(Option<DepartmentId>),
    /// Choose (or clear) the team.
    SelectTeam(Option<TeamId>),
    /// Choose (or clear) the goal.
    SelectGoal(Option<GoalId>),
    /// Choose (or clear) the task. Task reviews only.
    SelectTask(Option<TaskId>),
    /// Attempt to set the reviewing employee. Always rejected: the employee
    /// is derived from the task.
    SelectEmployee(Option<EmployeeId>),
    /// Set the review due date.
    SetDueDate(Option<Date>),
    /// Set the reviewer instructions.
    SetDescription(String),
    /// Set the review status.
    SetStatus(ReviewStatus),
    /// Re-fetch the existing reviews used for duplicate prevention.
    RefreshExistingReviews,
    /// A fetch issued by an earlier [`Effect::Fetch`] finished.
    FetchCompleted {
        /// The request the result belongs to.
        request: RequestId,
        /// The fetched data, or why the fetch failed.
        result: Result<FetchPayload, FetchFailure>,
    },
    /// Validate and submit the form.
    Submit,
    /// A submission issued by an earlier [`Effect::Submit`] finished.
    SubmitCompleted {
        /// The request the result belongs to.
        request: RequestId,
        /// The stored record, or the backend's error message.
        result: Result<ReviewAssignment, String>,
    },
}

/// What a fetch effect should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    /// All departments.
    Departments,
    /// Teams of a department.
    Teams(DepartmentId),
    /// One team, to learn its department. Issued when an edited review
    /// records a team but no department.
    TeamDepartment(TeamId),
    /// Goals of a team.
    Goals(TeamId),
    /// Tasks of a goal.
    Tasks(GoalId),
    /// A task's details and its assignee, looked up in parallel.
    TaskAssignee(TaskId),
    /// All existing reviews of a kind.
    ExistingReviews(ReviewKind),
}

/// Data returned by a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPayload {
    /// Result of [`FetchTarget::Departments`].
    Departments(Vec<Department>),
    /// Result of [`FetchTarget::Teams`].
    Teams(Vec<Team>),
    /// Result of [`FetchTarget::TeamDepartment`].
    Team(Team),
    /// Result of [`FetchTarget::Goals`].
    Goals(Vec<Goal>),
    /// Result of [`FetchTarget::Tasks`].
    Tasks(Vec<Task>),
    /// Result of [`FetchTarget::TaskAssignee`].
    TaskAssignee {
        /// The task details, including its due date.
        task: Task,
        /// The assignee, if the task has one.
        employee: Option<Employee>,
    },
    /// Result of [`FetchTarget::ExistingReviews`].
    ExistingReviews(Vec<ReviewAssignment>),
}

/// Why a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// A human-readable description of the failure.
    pub message: String,
    /// True if the backend could not be reached at all.
    pub unreachable: bool,
}

impl FetchFailure {
    /// A failure reported by a reachable backend.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unreachable: false,
        }
    }

    /// A failure to reach the backend.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unreachable: true,
        }
    }
}

/// I/O requested by a transition. The caller performs it and feeds the
/// outcome back as a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load data for a level.
    Fetch {
        /// The request id to report back with.
        request: RequestId,
        /// What to load.
        target: FetchTarget,
    },
    /// Create or update a review.
    Submit {
        /// The request id to report back with.
        request: RequestId,
        /// The kind of review.
        kind: ReviewKind,
        /// The review being updated, or `None` to create one.
        review_id: Option<ReviewId>,
        /// The request body.
        draft: ReviewDraft,
    },
}
