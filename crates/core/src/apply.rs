// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, Effect, FetchFailure, FetchPayload, FetchTarget, RequestId};
use crate::error::CoreError;
use crate::state::{Availability, FormMode, FormState, Outcome, SubmissionPhase, TransitionResult};
use review_desk_domain::{
    AssignmentSnapshot, DepartmentId, DomainError, Goal, GoalId, RequiredField, ReviewAssignment,
    ReviewDraft, ReviewKind, ReviewStatus, SubjectRef, TaskId, TeamId,
};

/// Position in the selection cascade, parent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Department,
    Team,
    Goal,
    Task,
    Employee,
}

/// The level a completed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelKey {
    Departments,
    Teams,
    Goals,
    Tasks,
    Assignee,
    Existing,
}

impl LevelKey {
    const fn name(self) -> &'static str {
        match self {
            Self::Departments => "department",
            Self::Teams => "team",
            Self::Goals => "goal",
            Self::Tasks => "task",
            Self::Assignee => "assignee",
            Self::Existing => "existing review",
        }
    }
}

/// Opens an empty form for assigning a new review.
///
/// The returned effects load the department list and the existing reviews.
#[must_use]
pub fn open_create(kind: ReviewKind) -> TransitionResult {
    let mut state: FormState =
        FormState::new(kind, FormMode::Create, AssignmentSnapshot::default());
    let mut effects: Vec<Effect> = Vec::new();

    start_fetch(&mut state, &mut effects, FetchTarget::Departments);
    start_fetch(&mut state, &mut effects, FetchTarget::ExistingReviews(kind));

    TransitionResult {
        new_state: state,
        effects,
        outcome: Outcome::Applied,
    }
}

/// Opens a form seeded from an existing review.
///
/// Every level of the cascade is fetched at once, top-down, so the
/// intermediate option lists are populated before the form is interactive.
/// Seeded selections survive their level's load only if the loaded list
/// still contains them.
#[must_use]
pub fn open_update(record: ReviewAssignment) -> TransitionResult {
    let kind: ReviewKind = record.kind();
    let snapshot: AssignmentSnapshot = AssignmentSnapshot::from_assignment(&record, None);
    let subject_due_date = record.subject_due_date;
    let mut state: FormState = FormState::new(kind, FormMode::Update(Box::new(record)), snapshot);
    state.subject_due_date = subject_due_date;
    let mut effects: Vec<Effect> = Vec::new();

    start_fetch(&mut state, &mut effects, FetchTarget::Departments);
    // Goal reviews do not record a department; it is taken from the team.
    match (state.snapshot.department_id, state.snapshot.team_id) {
        (Some(department_id), _) => {
            start_fetch(&mut state, &mut effects, FetchTarget::Teams(department_id));
        }
        (None, Some(team_id)) => {
            start_fetch(&mut state, &mut effects, FetchTarget::TeamDepartment(team_id));
        }
        (None, None) => {}
    }
    if let Some(team_id) = state.snapshot.team_id {
        start_fetch(&mut state, &mut effects, FetchTarget::Goals(team_id));
    }
    if kind == ReviewKind::Task {
        if let Some(goal_id) = state.snapshot.goal_id {
            start_fetch(&mut state, &mut effects, FetchTarget::Tasks(goal_id));
        }
        if let Some(task_id) = state.snapshot.task_id {
            start_fetch(&mut state, &mut effects, FetchTarget::TaskAssignee(task_id));
        }
    }
    start_fetch(&mut state, &mut effects, FetchTarget::ExistingReviews(kind));

    TransitionResult {
        new_state: state,
        effects,
        outcome: Outcome::Applied,
    }
}

/// Applies a command to the form, producing a new state and the I/O to
/// perform.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and effects
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The form is read-only, a submission is outstanding, or the review
///   was already stored
/// - The chosen option is not currently selectable
/// - The field does not apply to this kind of review
/// - A status change violates the review lifecycle
/// - Submission is attempted while validation fails
/// - A completion carries data for a different level
pub fn apply(state: &FormState, command: Command) -> Result<TransitionResult, CoreError> {
    let is_completion: bool = matches!(
        command,
        Command::FetchCompleted { .. } | Command::SubmitCompleted { .. }
    );
    if !is_completion {
        if state.read_only {
            return Err(CoreError::ReadOnly);
        }
        match state.submission {
            SubmissionPhase::InFlight(_) => return Err(CoreError::SubmissionInFlight),
            SubmissionPhase::Succeeded(_) => return Err(CoreError::Closed),
            SubmissionPhase::Idle | SubmissionPhase::Failed(_) => {}
        }
    }

    let mut next: FormState = state.clone();
    let mut effects: Vec<Effect> = Vec::new();

    let outcome: Outcome = match command {
        Command::SelectDepartment(department_id) => {
            select_department(&mut next, &mut effects, department_id)?
        }
        Command::SelectTeam(team_id) => select_team(&mut next, &mut effects, team_id)?,
        Command::SelectGoal(goal_id) => select_goal(&mut next, &mut effects, goal_id)?,
        Command::SelectTask(task_id) => select_task(&mut next, &mut effects, task_id)?,
        Command::SelectEmployee(_) => {
            return Err(match state.kind {
                ReviewKind::Task => CoreError::EmployeeIsDerived,
                ReviewKind::Goal => CoreError::WrongReviewKind {
                    kind: ReviewKind::Goal,
                    field: "employee",
                },
            });
        }
        Command::SetDueDate(due_date) => {
            if next.snapshot.due_date == due_date {
                Outcome::Unchanged
            } else {
                next.snapshot.due_date = due_date;
                Outcome::Applied
            }
        }
        Command::SetDescription(description) => {
            if next.snapshot.description == description {
                Outcome::Unchanged
            } else {
                next.snapshot.description = description;
                Outcome::Applied
            }
        }
        Command::SetStatus(status) => set_status(&mut next, status)?,
        Command::RefreshExistingReviews => {
            let kind: ReviewKind = next.kind;
            start_fetch(&mut next, &mut effects, FetchTarget::ExistingReviews(kind));
            Outcome::Applied
        }
        Command::FetchCompleted { request, result } => {
            fetch_completed(&mut next, &mut effects, request, result)?
        }
        Command::Submit => submit(&mut next, &mut effects)?,
        Command::SubmitCompleted { request, result } => {
            if next.submission == SubmissionPhase::InFlight(request) {
                next.submission = match result {
                    Ok(record) => SubmissionPhase::Succeeded(Box::new(record)),
                    Err(message) => SubmissionPhase::Failed(message),
                };
                Outcome::Applied
            } else {
                Outcome::Stale
            }
        }
    };

    if outcome != Outcome::Applied {
        return Ok(TransitionResult {
            new_state: state.clone(),
            effects: Vec::new(),
            outcome,
        });
    }

    Ok(TransitionResult {
        new_state: next,
        effects,
        outcome,
    })
}

fn start_fetch(state: &mut FormState, effects: &mut Vec<Effect>, target: FetchTarget) {
    let request: RequestId = state.allocate_request();
    match target {
        FetchTarget::Departments => state.departments.start(request),
        FetchTarget::Teams(_) | FetchTarget::TeamDepartment(_) => state.teams.start(request),
        FetchTarget::Goals(_) => state.goals.start(request),
        FetchTarget::Tasks(_) => state.tasks.start(request),
        FetchTarget::TaskAssignee(_) => state.assignee.start(request),
        FetchTarget::ExistingReviews(_) => state.existing.start(request),
    }
    effects.push(Effect::Fetch { request, target });
}

/// Clears every selection below `tier` and resets the levels that depend
/// on them. Outstanding fetches for those levels become stale.
fn clear_below(state: &mut FormState, tier: Tier) {
    if tier < Tier::Team {
        state.snapshot.team_id = None;
        state.teams.reset();
    }
    if tier < Tier::Goal {
        state.snapshot.goal_id = None;
        state.goals.reset();
    }
    if tier < Tier::Task {
        state.snapshot.task_id = None;
        state.tasks.reset();
    }
    if tier < Tier::Employee {
        state.snapshot.employee_id = None;
        state.assignee.reset();
    }

    let subject_cleared: bool = match state.kind {
        ReviewKind::Goal => tier < Tier::Goal,
        ReviewKind::Task => tier <= Tier::Task,
    };
    if subject_cleared {
        state.subject_due_date = None;
    }
}

fn select_department(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    department_id: Option<DepartmentId>,
) -> Result<Outcome, CoreError> {
    if state.snapshot.department_id == department_id {
        return Ok(Outcome::Unchanged);
    }
    if let Some(id) = department_id
        .filter(|id| !state.departments.candidates.iter().any(|d| d.id == *id))
    {
        return Err(CoreError::OptionNotAvailable {
            field: RequiredField::Department,
            id: id.value(),
        });
    }

    state.snapshot.department_id = department_id;
    clear_below(state, Tier::Department);
    if let Some(id) = department_id {
        start_fetch(state, effects, FetchTarget::Teams(id));
    }
    Ok(Outcome::Applied)
}

fn select_team(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    team_id: Option<TeamId>,
) -> Result<Outcome, CoreError> {
    if state.snapshot.team_id == team_id {
        return Ok(Outcome::Unchanged);
    }
    if let Some(id) = team_id
        .filter(|id| !state.selectable_teams().iter().any(|t| t.id == *id))
    {
        return Err(CoreError::OptionNotAvailable {
            field: RequiredField::Team,
            id: id.value(),
        });
    }

    state.snapshot.team_id = team_id;
    clear_below(state, Tier::Team);
    if let Some(id) = team_id {
        start_fetch(state, effects, FetchTarget::Goals(id));
    }
    Ok(Outcome::Applied)
}

fn select_goal(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    goal_id: Option<GoalId>,
) -> Result<Outcome, CoreError> {
    if state.snapshot.goal_id == goal_id {
        return Ok(Outcome::Unchanged);
    }
    let goal: Option<Goal> = match goal_id {
        Some(id) => Some(
            state
                .selectable_goals()
                .options()
                .iter()
                .find(|g| g.id == id)
                .cloned()
                .ok_or(CoreError::OptionNotAvailable {
                    field: RequiredField::Goal,
                    id: id.value(),
                })?,
        ),
        None => None,
    };

    state.snapshot.goal_id = goal_id;
    clear_below(state, Tier::Goal);
    match state.kind {
        ReviewKind::Goal => {
            state.subject_due_date = goal.and_then(|g| g.due_date);
        }
        ReviewKind::Task => {
            if let Some(id) = goal_id {
                start_fetch(state, effects, FetchTarget::Tasks(id));
            }
        }
    }
    Ok(Outcome::Applied)
}

fn select_task(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    task_id: Option<TaskId>,
) -> Result<Outcome, CoreError> {
    if state.kind == ReviewKind::Goal {
        return Err(CoreError::WrongReviewKind {
            kind: ReviewKind::Goal,
            field: "task",
        });
    }
    if state.snapshot.task_id == task_id {
        return Ok(Outcome::Unchanged);
    }
    if let Some(id) = task_id
        .filter(|id| !state.selectable_tasks().options().iter().any(|t| t.id == *id))
    {
        return Err(CoreError::OptionNotAvailable {
            field: RequiredField::Task,
            id: id.value(),
        });
    }

    state.snapshot.task_id = task_id;
    clear_below(state, Tier::Task);
    if let Some(id) = task_id {
        start_fetch(state, effects, FetchTarget::TaskAssignee(id));
    }
    Ok(Outcome::Applied)
}

fn set_status(state: &mut FormState, status: ReviewStatus) -> Result<Outcome, CoreError> {
    if state.snapshot.status == status {
        return Ok(Outcome::Unchanged);
    }
    // New reviews are always created Pending; edits follow the lifecycle
    // from the stored status.
    let base: ReviewStatus = state
        .editing()
        .map_or(ReviewStatus::Pending, |record| record.status);
    if status != base && !base.can_transition_to(status) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: base,
                to: status,
            },
        ));
    }
    state.snapshot.status = status;
    Ok(Outcome::Applied)
}

fn awaiting_level(state: &FormState, request: RequestId) -> Option<LevelKey> {
    [
        (state.departments.pending_request(), LevelKey::Departments),
        (state.teams.pending_request(), LevelKey::Teams),
        (state.goals.pending_request(), LevelKey::Goals),
        (state.tasks.pending_request(), LevelKey::Tasks),
        (state.assignee.pending_request(), LevelKey::Assignee),
        (state.existing.pending_request(), LevelKey::Existing),
    ]
    .into_iter()
    .find_map(|(pending, key)| (pending == Some(request)).then_some(key))
}

fn fetch_completed(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    request: RequestId,
    result: Result<FetchPayload, FetchFailure>,
) -> Result<Outcome, CoreError> {
    let Some(level) = awaiting_level(state, request) else {
        return Ok(Outcome::Stale);
    };

    match result {
        Ok(payload) => apply_payload(state, effects, level, payload)?,
        Err(failure) => apply_failure(state, level, failure),
    }
    Ok(Outcome::Applied)
}

fn apply_payload(
    state: &mut FormState,
    effects: &mut Vec<Effect>,
    level: LevelKey,
    payload: FetchPayload,
) -> Result<(), CoreError> {
    match (level, payload) {
        (LevelKey::Departments, FetchPayload::Departments(departments)) => {
            state.departments.finish(departments);
            let known: bool = state
                .snapshot
                .department_id
                .is_none_or(|id| state.departments.candidates.iter().any(|d| d.id == id));
            if !known {
                state.snapshot.department_id = None;
                clear_below(state, Tier::Department);
            }
        }
        (LevelKey::Teams, FetchPayload::Teams(teams)) => {
            state.teams.finish(teams);
            let known: bool = state
                .snapshot
                .team_id
                .is_none_or(|id| state.teams.candidates.iter().any(|t| t.id == id));
            if !known {
                state.snapshot.team_id = None;
                clear_below(state, Tier::Team);
            }
        }
        (LevelKey::Teams, FetchPayload::Team(team)) => {
            if state.snapshot.department_id.is_none() && state.snapshot.team_id == Some(team.id) {
                state.snapshot.department_id = Some(team.department_id);
                start_fetch(state, effects, FetchTarget::Teams(team.department_id));
            } else {
                state.teams.reset();
            }
        }
        (LevelKey::Goals, FetchPayload::Goals(goals)) => {
            state.goals.finish(goals);
            reconcile_subject(state);
        }
        (LevelKey::Tasks, FetchPayload::Tasks(tasks)) => {
            state.tasks.finish(tasks);
            reconcile_subject(state);
        }
        (LevelKey::Assignee, FetchPayload::TaskAssignee { task, employee }) => {
            state.snapshot.employee_id = employee.as_ref().map(|e| e.id);
            state.assignee.finish(employee.into_iter().collect());
            state.subject_due_date = task.due_date;
            adopt_goal_of_task(state, effects, task.goal_id);
        }
        (LevelKey::Existing, FetchPayload::ExistingReviews(reviews)) => {
            let kind: ReviewKind = state.kind;
            state
                .existing
                .finish(reviews.into_iter().filter(|r| r.kind() == kind).collect());
            reconcile_subject(state);
        }
        (level, _) => {
            return Err(CoreError::UnexpectedPayload {
                level: level.name(),
            });
        }
    }
    Ok(())
}

/// A task review records its task but not the task's goal. When the form
/// was seeded without a goal, the task lookup supplies it.
fn adopt_goal_of_task(state: &mut FormState, effects: &mut Vec<Effect>, goal_id: Option<GoalId>) {
    if state.kind != ReviewKind::Task || state.snapshot.goal_id.is_some() {
        return;
    }
    let Some(goal_id) = goal_id else {
        return;
    };
    if state.goals.is_loaded() && !state.goals.candidates.iter().any(|g| g.id == goal_id) {
        return;
    }

    state.snapshot.goal_id = Some(goal_id);
    if state.tasks.is_settled() && !state.tasks.is_loaded() {
        start_fetch(state, effects, FetchTarget::Tasks(goal_id));
    }
}

/// Re-checks the selected goal and task against the current option lists.
///
/// Runs after the goal list, the task list, or the existing reviews load,
/// so the duplicate filter is applied once both of its inputs are current.
fn reconcile_subject(state: &mut FormState) {
    if let Some(goal_id) = state.snapshot.goal_id {
        match state.kind {
            ReviewKind::Goal => match state.selectable_goals() {
                Availability::Ready(goals) => match goals.iter().find(|g| g.id == goal_id) {
                    Some(goal) => state.subject_due_date = goal.due_date,
                    None => clear_goal(state),
                },
                Availability::NoEligibleSubject => clear_goal(state),
                Availability::Idle | Availability::Pending | Availability::Failed(_) => {}
            },
            ReviewKind::Task => {
                let editing_this_task: bool = state
                    .editing()
                    .is_some_and(|record| record.subject.task_id() == state.snapshot.task_id);
                if state.goals.is_loaded()
                    && !editing_this_task
                    && !state.goals.candidates.iter().any(|g| g.id == goal_id)
                {
                    clear_goal(state);
                }
            }
        }
    }

    if let Some(task_id) = state.snapshot.task_id {
        match state.selectable_tasks() {
            Availability::Ready(tasks) if tasks.iter().any(|t| t.id == task_id) => {}
            Availability::Ready(_) | Availability::NoEligibleSubject => {
                state.snapshot.task_id = None;
                clear_below(state, Tier::Task);
            }
            Availability::Idle | Availability::Pending | Availability::Failed(_) => {}
        }
    }
}

fn clear_goal(state: &mut FormState) {
    state.snapshot.goal_id = None;
    clear_below(state, Tier::Goal);
}

fn apply_failure(state: &mut FormState, level: LevelKey, failure: FetchFailure) {
    let FetchFailure {
        message,
        unreachable,
    } = failure;
    match level {
        LevelKey::Departments => {
            state.departments.fail(message);
            state.snapshot.department_id = None;
            clear_below(state, Tier::Department);
            if unreachable {
                state.read_only = true;
            }
        }
        LevelKey::Teams => {
            state.teams.fail(message);
            state.snapshot.team_id = None;
            clear_below(state, Tier::Team);
        }
        LevelKey::Goals => {
            state.goals.fail(message);
            clear_goal(state);
        }
        LevelKey::Tasks => {
            state.tasks.fail(message);
            state.snapshot.task_id = None;
            clear_below(state, Tier::Task);
        }
        LevelKey::Assignee => {
            state.assignee.fail(message);
            state.snapshot.employee_id = None;
            state.subject_due_date = None;
        }
        LevelKey::Existing => state.existing.fail(message),
    }
}

fn submit(state: &mut FormState, effects: &mut Vec<Effect>) -> Result<Outcome, CoreError> {
    state.validation().into_result()?;
    let draft: ReviewDraft = build_draft(state)?;

    let request: RequestId = state.allocate_request();
    state.submission = SubmissionPhase::InFlight(request);
    effects.push(Effect::Submit {
        request,
        kind: state.kind,
        review_id: state.editing_id(),
        draft,
    });
    Ok(Outcome::Applied)
}

/// Serializes the snapshot into a create/update request body.
fn build_draft(state: &FormState) -> Result<ReviewDraft, CoreError> {
    let snapshot: &AssignmentSnapshot = &state.snapshot;
    let missing = |field: RequiredField| CoreError::DomainViolation(DomainError::MissingField(field));

    let subject: SubjectRef = match state.kind {
        ReviewKind::Goal => SubjectRef::Goal(
            snapshot
                .goal_id
                .ok_or_else(|| missing(RequiredField::Goal))?,
        ),
        ReviewKind::Task => SubjectRef::Task(
            snapshot
                .task_id
                .ok_or_else(|| missing(RequiredField::Task))?,
        ),
    };
    let employee_id = match state.kind {
        ReviewKind::Goal => None,
        ReviewKind::Task => snapshot.employee_id,
    };

    Ok(ReviewDraft {
        subject,
        team_id: snapshot
            .team_id
            .ok_or_else(|| missing(RequiredField::Team))?,
        department_id: snapshot.department_id,
        employee_id,
        due_date: snapshot
            .due_date
            .ok_or_else(|| missing(RequiredField::DueDate))?,
        description: snapshot.description.trim().to_string(),
        status: snapshot.status,
        review: state.editing().and_then(|record| record.review.clone()),
        submitted_on: state.editing().and_then(|record| record.submitted_on),
    })
}
