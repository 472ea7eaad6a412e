// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Effect, RequestId};
use review_desk_domain::{
    AssignmentSnapshot, Department, Employee, Goal, ReviewAssignment, ReviewId, ReviewKind,
    Subject, Task, Team, ValidationReport, available_subjects, validate_assignment,
};
use time::Date;

/// Progress of one dependent level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelPhase {
    /// No parent is selected; nothing to load.
    #[default]
    Idle,
    /// Waiting on the given request.
    Loading(RequestId),
    /// Candidates are current for the selected parent.
    Loaded,
    /// The last fetch failed.
    Failed(String),
}

/// Candidates for one dependent level together with their load phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level<T> {
    /// The load phase.
    pub phase: LevelPhase,
    /// The fetched candidates. Empty unless `phase` is `Loaded`.
    pub candidates: Vec<T>,
}

impl<T> Default for Level<T> {
    fn default() -> Self {
        Self {
            phase: LevelPhase::Idle,
            candidates: Vec::new(),
        }
    }
}

impl<T> Level<T> {
    /// Returns the request this level is waiting on, if any.
    #[must_use]
    pub const fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            LevelPhase::Loading(request) => Some(request),
            _ => None,
        }
    }

    /// Returns true if the level is loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.phase, LevelPhase::Loaded)
    }

    /// Returns true if the level is not waiting on a request.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self.phase, LevelPhase::Loading(_))
    }

    /// Returns the error of the last fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LevelPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.phase = LevelPhase::Idle;
        self.candidates.clear();
    }

    pub(crate) fn start(&mut self, request: RequestId) {
        self.phase = LevelPhase::Loading(request);
        self.candidates.clear();
    }

    pub(crate) fn finish(&mut self, candidates: Vec<T>) {
        self.phase = LevelPhase::Loaded;
        self.candidates = candidates;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = LevelPhase::Failed(message);
        self.candidates.clear();
    }
}

/// The selectable subjects (goals or tasks) after duplicate filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<T> {
    /// No parent is selected.
    Idle,
    /// The candidates or the existing reviews are still loading.
    Pending,
    /// The candidates or the existing reviews could not be loaded.
    Failed(String),
    /// Every candidate already has an active review.
    NoEligibleSubject,
    /// The subjects that may be chosen.
    Ready(Vec<T>),
}

impl<T> Availability<T> {
    /// Returns the selectable subjects, or an empty slice.
    #[must_use]
    pub fn options(&self) -> &[T] {
        match self {
            Self::Ready(options) => options,
            _ => &[],
        }
    }

    /// Returns the placeholder text to show instead of a selectable list.
    #[must_use]
    pub const fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Idle => Some("select a parent first"),
            Self::Pending => Some("loading"),
            Self::Failed(_) => Some("could not load options"),
            Self::NoEligibleSubject => Some("no eligible subject"),
            Self::Ready(_) => None,
        }
    }
}

/// Whether the form creates a new review or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// A new review is being assigned.
    Create,
    /// An existing review is being edited.
    Update(Box<ReviewAssignment>),
}

/// Progress of the submit action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Waiting on the given request.
    InFlight(RequestId),
    /// The backend stored the review. The form is closed.
    Succeeded(Box<ReviewAssignment>),
    /// The backend rejected the review. The form stays populated.
    Failed(String),
}

/// The complete state of one create/edit dialog.
///
/// Selections in `snapshot` are always consistent with the level
/// candidates: a transition that changes a parent clears every descendant
/// before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Goal or task review.
    pub kind: ReviewKind,
    /// Create or update.
    pub mode: FormMode,
    /// The editable fields.
    pub snapshot: AssignmentSnapshot,
    /// Root level.
    pub departments: Level<Department>,
    /// Teams of the selected department.
    pub teams: Level<Team>,
    /// Goals of the selected team.
    pub goals: Level<Goal>,
    /// Tasks of the selected goal (task reviews only).
    pub tasks: Level<Task>,
    /// Assignee of the selected task (task reviews only).
    pub assignee: Level<Employee>,
    /// Existing reviews of the same kind, for duplicate prevention.
    pub existing: Level<ReviewAssignment>,
    /// The due date of the selected goal or task, once known.
    pub subject_due_date: Option<Date>,
    /// Progress of the submit action.
    pub submission: SubmissionPhase,
    /// Set when the backend is unreachable; the form accepts no edits.
    pub read_only: bool,
    pub(crate) next_request: u64,
}

impl FormState {
    pub(crate) fn new(kind: ReviewKind, mode: FormMode, snapshot: AssignmentSnapshot) -> Self {
        Self {
            kind,
            mode,
            snapshot,
            departments: Level::default(),
            teams: Level::default(),
            goals: Level::default(),
            tasks: Level::default(),
            assignee: Level::default(),
            existing: Level::default(),
            subject_due_date: None,
            submission: SubmissionPhase::Idle,
            read_only: false,
            next_request: 1,
        }
    }

    pub(crate) const fn allocate_request(&mut self) -> RequestId {
        let request: RequestId = RequestId::new(self.next_request);
        self.next_request += 1;
        request
    }

    /// Returns the review being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&ReviewAssignment> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Update(record) => Some(record),
        }
    }

    /// Returns the id of the review being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<ReviewId> {
        self.editing().map(|record| record.id)
    }

    /// The edited review, but only while its own team is selected, so its
    /// subject is never offered under a different parent.
    fn pinned(&self) -> Option<&ReviewAssignment> {
        self.editing()
            .filter(|record| self.snapshot.team_id == Some(record.team_id))
    }

    /// Returns the teams that may be chosen.
    #[must_use]
    pub fn selectable_teams(&self) -> &[Team] {
        &self.teams.candidates
    }

    /// Returns the goals that may be chosen.
    ///
    /// For goal reviews this is the duplicate-filtered list. Task reviews
    /// filter at the task level, so every goal is offered.
    #[must_use]
    pub fn selectable_goals(&self) -> Availability<Goal> {
        match self.kind {
            ReviewKind::Goal => self.filtered(&self.goals),
            ReviewKind::Task => unfiltered(&self.goals),
        }
    }

    /// Returns the tasks that may be chosen (task reviews only).
    #[must_use]
    pub fn selectable_tasks(&self) -> Availability<Task> {
        match self.kind {
            ReviewKind::Goal => Availability::Idle,
            ReviewKind::Task => self.filtered(&self.tasks),
        }
    }

    /// Returns true if the subject level for this kind of review offers at
    /// least one choice.
    #[must_use]
    pub fn has_eligible_subject(&self) -> bool {
        match self.kind {
            ReviewKind::Goal => matches!(self.selectable_goals(), Availability::Ready(_)),
            ReviewKind::Task => matches!(self.selectable_tasks(), Availability::Ready(_)),
        }
    }

    fn filtered<S: Subject>(&self, level: &Level<S>) -> Availability<S> {
        match (&level.phase, &self.existing.phase) {
            (LevelPhase::Idle, _) => Availability::Idle,
            (LevelPhase::Failed(message), _) | (_, LevelPhase::Failed(message)) => {
                Availability::Failed(message.clone())
            }
            (LevelPhase::Loaded, LevelPhase::Loaded) => {
                let available: Vec<S> =
                    available_subjects(&level.candidates, &self.existing.candidates, self.pinned());
                if available.is_empty() {
                    Availability::NoEligibleSubject
                } else {
                    Availability::Ready(available)
                }
            }
            _ => Availability::Pending,
        }
    }

    /// Evaluates the validation rules against the current snapshot.
    #[must_use]
    pub fn validation(&self) -> ValidationReport {
        validate_assignment(
            &self.snapshot,
            self.kind,
            self.subject_due_date,
            self.has_eligible_subject(),
            self.editing().is_some(),
        )
    }

    /// Returns true if the submit control should be enabled.
    ///
    /// False once the review is stored.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.read_only
            && matches!(
                self.submission,
                SubmissionPhase::Idle | SubmissionPhase::Failed(_)
            )
            && self.validation().can_submit()
    }

    /// Returns true if no fetch is outstanding.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.departments.is_settled()
            && self.teams.is_settled()
            && self.goals.is_settled()
            && self.tasks.is_settled()
            && self.assignee.is_settled()
            && self.existing.is_settled()
    }
}

fn unfiltered<T: Clone>(level: &Level<T>) -> Availability<T> {
    match &level.phase {
        LevelPhase::Idle => Availability::Idle,
        LevelPhase::Loading(_) => Availability::Pending,
        LevelPhase::Failed(message) => Availability::Failed(message.clone()),
        LevelPhase::Loaded if level.candidates.is_empty() => Availability::NoEligibleSubject,
        LevelPhase::Loaded => Availability::Ready(level.candidates.clone()),
    }
}

/// What a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed.
    Applied,
    /// The command set a field to its current value. Nothing changed.
    Unchanged,
    /// A completion arrived for a request that is no longer awaited and was
    /// discarded.
    Stale,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: FormState,
    /// I/O the caller must perform.
    pub effects: Vec<Effect>,
    /// What the transition did.
    pub outcome: Outcome,
}
