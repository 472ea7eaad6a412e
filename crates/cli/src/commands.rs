// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommand implementations. Each returns the JSON document to print.

use crate::{AssignArgs, EditArgs, SelectionArgs};
use review_desk::{Availability, Command, FormState};
use review_desk_api::{
    AssignmentSession, EntityGateway, complete_assignment, delete_assignment, find_assignment,
    list_assignments,
};
use review_desk_domain::{
    Department, DepartmentId, DueDateCheck, Employee, Goal, GoalId, RequiredField, ReviewAssignment,
    ReviewId, ReviewKind, Task, TaskId, Team, TeamId, ValidationReport, iso_date,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tracing::debug;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn reviews<G: EntityGateway + ?Sized>(
    gateway: &G,
    kind: ReviewKind,
    active: bool,
) -> CliResult<Value> {
    let reviews: Vec<ReviewAssignment> = list_assignments(gateway, kind, active).await?;
    Ok(serde_json::to_value(reviews)?)
}

pub async fn assign<G: EntityGateway + 'static>(
    gateway: Arc<G>,
    args: &AssignArgs,
) -> CliResult<Value> {
    let mut session: AssignmentSession<G> =
        AssignmentSession::open_create(gateway, args.selection.kind);
    select_path(&mut session, &args.selection).await?;

    session.dispatch(Command::SetDueDate(Some(args.due)))?;
    session.dispatch(Command::SetDescription(args.description.clone()))?;

    let mut reviews: Vec<ReviewAssignment> = session.state().existing.candidates.clone();
    let stored: ReviewAssignment = session.submit(&mut reviews).await?;
    Ok(serde_json::to_value(stored)?)
}

pub async fn edit<G: EntityGateway + 'static>(gateway: Arc<G>, args: &EditArgs) -> CliResult<Value> {
    let record: ReviewAssignment =
        find_assignment(gateway.as_ref(), args.selection.kind, ReviewId::new(args.id)).await?;
    let mut session: AssignmentSession<G> = AssignmentSession::open_update(gateway, record);
    select_path(&mut session, &args.selection).await?;

    if let Some(due) = args.due {
        session.dispatch(Command::SetDueDate(Some(due)))?;
    }
    if let Some(description) = &args.description {
        session.dispatch(Command::SetDescription(description.clone()))?;
    }
    if let Some(status) = args.status {
        session.dispatch(Command::SetStatus(status))?;
    }

    let mut reviews: Vec<ReviewAssignment> = session.state().existing.candidates.clone();
    let stored: ReviewAssignment = session.submit(&mut reviews).await?;
    Ok(serde_json::to_value(stored)?)
}

pub async fn complete<G: EntityGateway + ?Sized>(
    gateway: &G,
    kind: ReviewKind,
    id: i64,
    text: &str,
    date: Option<Date>,
) -> CliResult<Value> {
    let record: ReviewAssignment = find_assignment(gateway, kind, ReviewId::new(id)).await?;
    let submitted_on: Date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let stored: ReviewAssignment = complete_assignment(gateway, &record, text, submitted_on).await?;
    Ok(serde_json::to_value(stored)?)
}

pub async fn delete<G: EntityGateway + ?Sized>(
    gateway: &G,
    kind: ReviewKind,
    id: i64,
) -> CliResult<Value> {
    let mut reviews: Vec<ReviewAssignment> = list_assignments(gateway, kind, false).await?;
    let listed: bool = delete_assignment(gateway, &mut reviews, kind, ReviewId::new(id)).await?;
    Ok(json!({
        "deleted": id,
        "listed": listed,
        "remaining": reviews.len(),
    }))
}

pub async fn options<G: EntityGateway + 'static>(
    gateway: Arc<G>,
    args: &SelectionArgs,
) -> CliResult<Value> {
    let mut session: AssignmentSession<G> = AssignmentSession::open_create(gateway, args.kind);
    select_path(&mut session, args).await?;
    Ok(serde_json::to_value(OptionsReport::from_state(session.state()))?)
}

/// Walks the selection levels top-down, waiting for each level to load
/// before choosing from it.
async fn select_path<G: EntityGateway + 'static>(
    session: &mut AssignmentSession<G>,
    selection: &SelectionArgs,
) -> CliResult<()> {
    session.settle().await?;
    check_levels(session.state())?;

    let steps: [Option<Command>; 4] = [
        selection
            .department
            .map(|id| Command::SelectDepartment(Some(DepartmentId::new(id)))),
        selection
            .team
            .map(|id| Command::SelectTeam(Some(TeamId::new(id)))),
        selection
            .goal
            .map(|id| Command::SelectGoal(Some(GoalId::new(id)))),
        selection
            .task
            .map(|id| Command::SelectTask(Some(TaskId::new(id)))),
    ];

    for command in steps.into_iter().flatten() {
        debug!(?command, "selecting");
        session.dispatch(command)?;
        session.settle().await?;
        check_levels(session.state())?;
    }
    Ok(())
}

/// Fails with the first level error, so a selection is not attempted
/// against a list that never loaded.
fn check_levels(state: &FormState) -> CliResult<()> {
    let failures: [(&str, Option<&str>); 6] = [
        ("departments", state.departments.error()),
        ("teams", state.teams.error()),
        ("goals", state.goals.error()),
        ("tasks", state.tasks.error()),
        ("assignee", state.assignee.error()),
        ("existing reviews", state.existing.error()),
    ];
    failures
        .into_iter()
        .find_map(|(level, error)| error.map(|message| (level, message)))
        .map_or(Ok(()), |(level, message)| {
            Err(format!("could not load {level}: {message}").into())
        })
}

/// One dependent list as shown to the user.
#[derive(Debug, Serialize)]
pub struct LevelReport<T> {
    pub options: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl<T: Clone> From<Availability<T>> for LevelReport<T> {
    fn from(availability: Availability<T>) -> Self {
        Self {
            options: availability.options().to_vec(),
            note: availability.placeholder(),
        }
    }
}

/// What the form offers for the current selection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsReport {
    pub kind: ReviewKind,
    pub departments: Vec<Department>,
    pub teams: Vec<Team>,
    pub goals: LevelReport<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<LevelReport<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
    pub subject_due_date: Option<String>,
    pub missing: Vec<&'static str>,
    pub due_date_check: &'static str,
    pub can_submit: bool,
}

impl OptionsReport {
    #[must_use]
    pub fn from_state(state: &FormState) -> Self {
        let report: ValidationReport = state.validation();
        let tasks: Option<LevelReport<Task>> = match state.kind {
            ReviewKind::Goal => None,
            ReviewKind::Task => Some(state.selectable_tasks().into()),
        };
        Self {
            kind: state.kind,
            departments: state.departments.candidates.clone(),
            teams: state.selectable_teams().to_vec(),
            goals: state.selectable_goals().into(),
            tasks,
            employee: state.assignee.candidates.first().cloned(),
            subject_due_date: state.subject_due_date.map(iso_date::format),
            missing: report.missing.iter().map(RequiredField::as_str).collect(),
            due_date_check: match report.due_date {
                DueDateCheck::Valid => "valid",
                DueDateCheck::Unverified => "unverified",
                DueDateCheck::BeforeSubject { .. } => "before-subject",
            },
            can_submit: state.can_submit(),
        }
    }
}
