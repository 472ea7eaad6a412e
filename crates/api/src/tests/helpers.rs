// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, EntityGateway};
use async_trait::async_trait;
use review_desk_domain::{
    Department, DepartmentId, Employee, EmployeeId, Goal, GoalId, GoalStatus, ReviewAssignment,
    ReviewDraft, ReviewId, ReviewKind, ReviewStatus, SubjectRef, Task, TaskId, TaskStatus, Team,
    TeamId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use time::{Date, macros::date};
use tokio::sync::Notify;

/// How a fake call should fail.
#[derive(Debug, Clone, Copy)]
pub enum FakeFailure {
    Unreachable,
    Status(u16),
}

/// In-memory backend. Calls are keyed (e.g. `goals/10`, `create goalReviews`)
/// so tests can hold one back behind a gate or make it fail.
pub struct FakeGateway {
    departments: Vec<Department>,
    teams: Vec<Team>,
    goals: Vec<Goal>,
    tasks: Vec<Task>,
    employees: Vec<Employee>,
    reviews: Mutex<Vec<ReviewAssignment>>,
    next_id: AtomicI64,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failures: Mutex<HashMap<String, FakeFailure>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    /// Engineering (1) has Platform (10) and Mobile (11); Sales (2) has Field (20).
    /// Platform owns goals 1 and 2; goal 1 owns tasks 100 (alice) and 101 (bob).
    pub fn new() -> Self {
        Self {
            departments: vec![
                Department {
                    id: DepartmentId::new(1),
                    name: String::from("Engineering"),
                },
                Department {
                    id: DepartmentId::new(2),
                    name: String::from("Sales"),
                },
            ],
            teams: vec![
                create_test_team(10, "Platform", 1),
                create_test_team(11, "Mobile", 1),
                create_test_team(20, "Field", 2),
            ],
            goals: vec![
                create_test_goal(1, 10, date!(2025 - 06 - 01)),
                create_test_goal(2, 10, date!(2025 - 06 - 15)),
                create_test_goal(3, 11, date!(2025 - 08 - 01)),
            ],
            tasks: vec![
                create_test_task(100, 1, 7, date!(2025 - 06 - 01)),
                create_test_task(101, 1, 8, date!(2025 - 06 - 10)),
            ],
            employees: vec![
                Employee {
                    id: EmployeeId::new(7),
                    username: String::from("alice"),
                    role: None,
                },
                Employee {
                    id: EmployeeId::new(8),
                    username: String::from("bob"),
                    role: None,
                },
            ],
            reviews: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
            gates: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reviews(self, reviews: Vec<ReviewAssignment>) -> Self {
        *self.reviews.lock().unwrap() = reviews;
        self
    }

    /// Holds the keyed call until the returned gate is notified.
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate: Arc<Notify> = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(String::from(key), Arc::clone(&gate));
        gate
    }

    pub fn fail(&self, key: &str, failure: FakeFailure) {
        self.failures
            .lock()
            .unwrap()
            .insert(String::from(key), failure);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored_reviews(&self) -> Vec<ReviewAssignment> {
        self.reviews.lock().unwrap().clone()
    }

    async fn enter(&self, key: String) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(key.clone());
        let gate: Option<Arc<Notify>> = self.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let failure: Option<FakeFailure> = self.failures.lock().unwrap().get(&key).copied();
        match failure {
            None => Ok(()),
            Some(FakeFailure::Unreachable) => {
                Err(ApiError::Unreachable(String::from("connection refused")))
            }
            Some(FakeFailure::Status(status)) => Err(ApiError::Server {
                status,
                message: format!("{key} failed"),
            }),
        }
    }
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn stored_from_draft(id: ReviewId, draft: &ReviewDraft) -> ReviewAssignment {
    ReviewAssignment {
        id,
        subject: draft.subject,
        team_id: draft.team_id,
        department_id: draft.department_id,
        employee_id: draft.employee_id,
        due_date: draft.due_date,
        description: draft.description.clone(),
        status: draft.status,
        review: draft.review.clone(),
        submitted_on: draft.submitted_on,
        subject_title: None,
        subject_due_date: None,
    }
}

#[async_trait]
impl EntityGateway for FakeGateway {
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.enter(String::from("departments")).await?;
        Ok(self.departments.clone())
    }

    async fn list_teams(&self, department_id: DepartmentId) -> Result<Vec<Team>, ApiError> {
        self.enter(format!("teams/{department_id}")).await?;
        Ok(self
            .teams
            .iter()
            .filter(|t| t.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn get_team(&self, team_id: TeamId) -> Result<Team, ApiError> {
        self.enter(format!("team/{team_id}")).await?;
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("teams/{team_id}")))
    }

    async fn list_goals(&self, team_id: TeamId) -> Result<Vec<Goal>, ApiError> {
        self.enter(format!("goals/{team_id}")).await?;
        Ok(self
            .goals
            .iter()
            .filter(|g| g.team_id == Some(team_id))
            .cloned()
            .collect())
    }

    async fn list_tasks(&self, goal_id: GoalId) -> Result<Vec<Task>, ApiError> {
        self.enter(format!("tasks/{goal_id}")).await?;
        Ok(self
            .tasks
            .iter()
            .filter(|t| t.goal_id == Some(goal_id))
            .cloned()
            .collect())
    }

    async fn get_task(&self, task_id: TaskId) -> Result<Task, ApiError> {
        self.enter(format!("task/{task_id}")).await?;
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("tasks/{task_id}")))
    }

    async fn get_task_employee(&self, task_id: TaskId) -> Result<Option<Employee>, ApiError> {
        self.enter(format!("employee/{task_id}")).await?;
        let employee_id: Option<EmployeeId> = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .and_then(|t| t.employee_id);
        Ok(self
            .employees
            .iter()
            .find(|e| Some(e.id) == employee_id)
            .cloned())
    }

    async fn list_reviews(&self, kind: ReviewKind) -> Result<Vec<ReviewAssignment>, ApiError> {
        self.enter(String::from(kind.collection())).await?;
        Ok(self
            .stored_reviews()
            .into_iter()
            .filter(|r| r.kind() == kind)
            .collect())
    }

    async fn create_review(
        &self,
        kind: ReviewKind,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError> {
        self.enter(format!("create {}", kind.collection())).await?;
        let id: ReviewId = ReviewId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record: ReviewAssignment = stored_from_draft(id, draft);
        self.reviews.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_review(
        &self,
        kind: ReviewKind,
        id: ReviewId,
        draft: &ReviewDraft,
    ) -> Result<ReviewAssignment, ApiError> {
        self.enter(format!("update {}/{id}", kind.collection()))
            .await?;
        let record: ReviewAssignment = stored_from_draft(id, draft);
        let mut reviews = self.reviews.lock().unwrap();
        let slot: &mut ReviewAssignment = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("{}/{id}", kind.collection())))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete_review(&self, kind: ReviewKind, id: ReviewId) -> Result<(), ApiError> {
        self.enter(format!("delete {}/{id}", kind.collection()))
            .await?;
        let mut reviews = self.reviews.lock().unwrap();
        let before: usize = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(ApiError::NotFound(format!("{}/{id}", kind.collection())));
        }
        Ok(())
    }
}

pub fn create_test_team(id: i64, name: &str, department: i64) -> Team {
    Team {
        id: TeamId::new(id),
        name: String::from(name),
        department_id: DepartmentId::new(department),
    }
}

pub fn create_test_goal(id: i64, team: i64, due_date: Date) -> Goal {
    Goal {
        id: GoalId::new(id),
        title: format!("Goal {id}"),
        team_id: Some(TeamId::new(team)),
        status: Some(GoalStatus::InProgress),
        due_date: Some(due_date),
    }
}

pub fn create_test_task(id: i64, goal: i64, employee: i64, due_date: Date) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        goal_id: Some(GoalId::new(goal)),
        employee_id: Some(EmployeeId::new(employee)),
        due_date: Some(due_date),
        status: Some(TaskStatus::Todo),
    }
}

/// Goal reviews come back without a department, as the backend stores them.
pub fn create_test_review(id: i64, subject: SubjectRef, status: ReviewStatus) -> ReviewAssignment {
    let (department_id, employee_id): (Option<DepartmentId>, Option<EmployeeId>) = match subject {
        SubjectRef::Goal(_) => (None, None),
        SubjectRef::Task(_) => (Some(DepartmentId::new(1)), Some(EmployeeId::new(7))),
    };
    ReviewAssignment {
        id: ReviewId::new(id),
        subject,
        team_id: TeamId::new(10),
        department_id,
        employee_id,
        due_date: date!(2025 - 07 - 01),
        description: String::from("Check delivery against the plan"),
        status,
        review: None,
        submitted_on: None,
        subject_title: None,
        subject_due_date: None,
    }
}
