// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Command, Effect, FetchFailure, FetchPayload, FetchTarget, FormState, RequestId,
    TransitionResult, apply, open_create,
};
use review_desk_domain::{
    Department, DepartmentId, Employee, EmployeeId, Goal, GoalId, GoalStatus, ReviewAssignment,
    ReviewId, ReviewKind, ReviewStatus, SubjectRef, Task, TaskId, TaskStatus, Team, TeamId,
};
use std::collections::VecDeque;
use time::{Date, macros::date};

/// In-memory answers for every fetch the form can issue.
pub struct TestBackend {
    pub departments: Vec<Department>,
    pub teams: Vec<Team>,
    pub goals: Vec<Goal>,
    pub tasks: Vec<Task>,
    pub employees: Vec<Employee>,
    pub reviews: Vec<ReviewAssignment>,
}

impl TestBackend {
    pub fn respond(&self, target: FetchTarget) -> Result<FetchPayload, FetchFailure> {
        match target {
            FetchTarget::Departments => Ok(FetchPayload::Departments(self.departments.clone())),
            FetchTarget::Teams(department_id) => Ok(FetchPayload::Teams(
                self.teams
                    .iter()
                    .filter(|t| t.department_id == department_id)
                    .cloned()
                    .collect(),
            )),
            FetchTarget::TeamDepartment(team_id) => self
                .teams
                .iter()
                .find(|t| t.id == team_id)
                .cloned()
                .map(FetchPayload::Team)
                .ok_or_else(|| FetchFailure::new("Team not found")),
            FetchTarget::Goals(team_id) => Ok(FetchPayload::Goals(
                self.goals
                    .iter()
                    .filter(|g| g.team_id == Some(team_id))
                    .cloned()
                    .collect(),
            )),
            FetchTarget::Tasks(goal_id) => Ok(FetchPayload::Tasks(
                self.tasks
                    .iter()
                    .filter(|t| t.goal_id == Some(goal_id))
                    .cloned()
                    .collect(),
            )),
            FetchTarget::TaskAssignee(task_id) => {
                let task: Task = self
                    .tasks
                    .iter()
                    .find(|t| t.id == task_id)
                    .cloned()
                    .ok_or_else(|| FetchFailure::new("Task not found"))?;
                let employee: Option<Employee> = self
                    .employees
                    .iter()
                    .find(|e| Some(e.id) == task.employee_id)
                    .cloned();
                Ok(FetchPayload::TaskAssignee { task, employee })
            }
            FetchTarget::ExistingReviews(kind) => Ok(FetchPayload::ExistingReviews(
                self.reviews
                    .iter()
                    .filter(|r| r.kind() == kind)
                    .cloned()
                    .collect(),
            )),
        }
    }
}

pub fn create_test_department(id: i64, name: &str) -> Department {
    Department {
        id: DepartmentId::new(id),
        name: String::from(name),
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
        status: Some(TaskStatus::InProgress),
    }
}

pub fn create_test_employee(id: i64, username: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        username: String::from(username),
        role: Some(String::from("Employee")),
    }
}

/// Engineering (1) has Platform (10) and Mobile (11); Sales (2) has Field (20).
/// Platform owns goals 1 and 2; goal 1 owns tasks 100 (alice) and 101 (bob).
pub fn create_test_backend() -> TestBackend {
    TestBackend {
        departments: vec![
            create_test_department(1, "Engineering"),
            create_test_department(2, "Sales"),
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
            create_test_goal(4, 20, date!(2025 - 09 - 01)),
        ],
        tasks: vec![
            create_test_task(100, 1, 7, date!(2025 - 06 - 01)),
            create_test_task(101, 1, 8, date!(2025 - 06 - 10)),
            create_test_task(102, 3, 7, date!(2025 - 08 - 01)),
        ],
        employees: vec![
            create_test_employee(7, "alice"),
            create_test_employee(8, "bob"),
        ],
        reviews: Vec::new(),
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

pub fn run(state: &FormState, command: Command) -> TransitionResult {
    apply(state, command).unwrap()
}

/// Answers every fetch effect from the backend in issue order until no
/// fetch is outstanding. Submit effects are left unanswered.
pub fn settle(backend: &TestBackend, transition: TransitionResult) -> FormState {
    let mut state: FormState = transition.new_state;
    let mut pending: VecDeque<Effect> = transition.effects.into();
    while let Some(effect) = pending.pop_front() {
        if let Effect::Fetch { request, target } = effect {
            let next: TransitionResult = run(
                &state,
                Command::FetchCompleted {
                    request,
                    result: backend.respond(target),
                },
            );
            state = next.new_state;
            pending.extend(next.effects);
        }
    }
    state
}

pub fn select(backend: &TestBackend, state: &FormState, command: Command) -> FormState {
    settle(backend, run(state, command))
}

/// Returns the request issued for `target`.
pub fn request_for(effects: &[Effect], target: FetchTarget) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch { request, target: t } if *t == target => Some(*request),
            _ => None,
        })
        .unwrap()
}

pub fn fetch_targets(effects: &[Effect]) -> Vec<FetchTarget> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Fetch { target, .. } => Some(*target),
            Effect::Submit { .. } => None,
        })
        .collect()
}

/// A settled form with Engineering and Platform selected.
pub fn create_form_at_team(backend: &TestBackend, kind: ReviewKind) -> FormState {
    let state: FormState = settle(backend, open_create(kind));
    let state: FormState = select(
        backend,
        &state,
        Command::SelectDepartment(Some(DepartmentId::new(1))),
    );
    select(backend, &state, Command::SelectTeam(Some(TeamId::new(10))))
}

pub fn goal_ids(goals: &[Goal]) -> Vec<i64> {
    goals.iter().map(|g| g.id.value()).collect()
}

pub fn task_ids(tasks: &[Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id.value()).collect()
}
