// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod error;
pub mod iso_date;
mod review;
mod snapshot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{Subject, available_subjects, excluded_subjects};
pub use error::DomainError;
pub use review::{
    ReviewAssignment, ReviewDraft, ReviewKind, ReviewStatus, SubjectRef, complete_review,
};
pub use snapshot::{AssignmentSnapshot, RequiredField};
pub use types::{
    Department, DepartmentId, Employee, EmployeeId, Goal, GoalId, GoalStatus, ReviewId, Task,
    TaskId, TaskStatus, Team, TeamId,
};
pub use validation::{
    DueDateCheck, ValidationReport, is_complete, is_due_date_valid, missing_fields,
    validate_assignment,
};
