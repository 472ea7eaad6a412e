// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DepartmentId, EmployeeId, Goal, GoalId, GoalStatus, ReviewAssignment, ReviewId, ReviewStatus,
    SubjectRef, Task, TaskId, TeamId,
};
use time::{Date, macros::date};

pub fn create_test_goal(id: i64, due_date: Date) -> Goal {
    Goal {
        id: GoalId::new(id),
        title: format!("Goal {id}"),
        team_id: Some(TeamId::new(10)),
        status: Some(GoalStatus::InProgress),
        due_date: Some(due_date),
    }
}

pub fn create_test_task(id: i64, due_date: Date) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        goal_id: Some(GoalId::new(100)),
        employee_id: Some(EmployeeId::new(7)),
        due_date: Some(due_date),
        status: None,
    }
}

pub fn create_test_goal_review(id: i64, goal: i64, status: ReviewStatus) -> ReviewAssignment {
    ReviewAssignment {
        id: ReviewId::new(id),
        subject: SubjectRef::Goal(GoalId::new(goal)),
        team_id: TeamId::new(10),
        department_id: Some(DepartmentId::new(1)),
        employee_id: None,
        due_date: date!(2025 - 07 - 01),
        description: String::from("Quarterly goal review"),
        status,
        review: None,
        submitted_on: None,
        subject_title: None,
        subject_due_date: None,
    }
}

pub fn create_test_task_review(id: i64, task: i64, status: ReviewStatus) -> ReviewAssignment {
    ReviewAssignment {
        id: ReviewId::new(id),
        subject: SubjectRef::Task(TaskId::new(task)),
        team_id: TeamId::new(10),
        department_id: Some(DepartmentId::new(1)),
        employee_id: Some(EmployeeId::new(7)),
        due_date: date!(2025 - 07 - 01),
        description: String::from("Task retrospective"),
        status,
        review: None,
        submitted_on: None,
        subject_title: None,
        subject_due_date: None,
    }
}
