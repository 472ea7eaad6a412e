// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The boundary to the HR backend.

use crate::error::ApiError;
use async_trait::async_trait;
use review_desk::{FetchPayload, FetchTarget};
use review_desk_domain::{
    Department, DepartmentId, Employee, Goal, GoalId, ReviewAssignment, ReviewDraft, ReviewId,
    ReviewKind, Task, TaskId, Team, TeamId,
};

/// Stateless read/write access to the entities the form works with.
///
/// Implementations hold no cache; every call reaches the backend.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    /// Lists all departments.
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError>;

    /// Lists the teams of a department.
    async fn list_teams(&self, department_id: DepartmentId) -> Result<Vec<Team>, ApiError>;

    /// Fetches one team with its department.
    async fn get_team(&self, team_id: TeamId) -> Result<Team, ApiError>;

    /// Lists the goals of a team.
    async fn list_goals(&self, team_id: TeamId) -> Result<Vec<Goal>, ApiError>;

    /// Lists the tasks of a goal.
    async fn list_tasks(&self, goal_id: GoalId) -> Result<Vec<Task>, ApiError>;

    /// Fetches one task with its due date.
    async fn get_task(&self, task_id: TaskId) -> Result<Task, ApiError>;

    /// Fetches the employee assigned to a task, if any.
    async fn get_task_employee(&self, task_id: TaskId) -> Result<Option<Employee>, ApiError>;

    /// Lists every review of a kind.
    async fn list_reviews(&self, kind: ReviewKind) -> Result<Vec<ReviewAssignment>, ApiError>;

    /// Creates a review.
    async fn create_review(
        &self,
        kind: ReviewKind,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError>;

    /// Replaces an existing review.
    async fn update_review(
        &self,
        kind: ReviewKind,
        id: ReviewId,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError>;

    /// Deletes a review.
    async fn delete_review(&self, kind: ReviewKind, id: ReviewId) -> Result<(), ApiError>;
}

/// Performs the fetch a form level asked for.
///
/// The task assignee target issues the task and employee lookups in
/// parallel and succeeds only if both do.
///
/// # Errors
///
/// Returns the first gateway error encountered.
pub async fn fetch<G: EntityGateway + ?Sized>(
    gateway: &G,
    target: FetchTarget,
) -> Result<FetchPayload, ApiError> {
    let payload: FetchPayload = match target {
        FetchTarget::Departments => FetchPayload::Departments(gateway.list_departments().await?),
        FetchTarget::Teams(department_id) => {
            FetchPayload::Teams(gateway.list_teams(department_id).await?)
        }
        FetchTarget::TeamDepartment(team_id) => {
            FetchPayload::Team(gateway.get_team(team_id).await?)
        }
        FetchTarget::Goals(team_id) => FetchPayload::Goals(gateway.list_goals(team_id).await?),
        FetchTarget::Tasks(goal_id) => FetchPayload::Tasks(gateway.list_tasks(goal_id).await?),
        FetchTarget::TaskAssignee(task_id) => {
            let (task, employee) = futures::try_join!(
                gateway.get_task(task_id),
                gateway.get_task_employee(task_id)
            )?;
            FetchPayload::TaskAssignee { task, employee }
        }
        FetchTarget::ExistingReviews(kind) => {
            FetchPayload::ExistingReviews(gateway.list_reviews(kind).await?)
        }
    };
    Ok(payload)
}
