// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async driver for one assignment form.
//!
//! The form itself is a pure state machine. A session owns one form,
//! executes the effects each transition requests on tokio tasks, and
//! feeds the completions back through a channel. Completions are applied
//! one at a time in arrival order; the form discards the ones that no
//! longer match an outstanding request.

use crate::error::ApiError;
use crate::gateway::{EntityGateway, fetch};
use review_desk::{
    Command, Effect, FetchFailure, FetchPayload, FormState, Outcome, SubmissionPhase,
    TransitionResult, apply, merge_submitted, open_create, open_update,
};
use review_desk_domain::{DueDateCheck, ReviewAssignment, ReviewKind};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// One open create or edit dialog.
///
/// Must be opened inside a tokio runtime.
pub struct AssignmentSession<G: EntityGateway + 'static> {
    gateway: Arc<G>,
    state: FormState,
    completions_tx: mpsc::UnboundedSender<Command>,
    completions_rx: mpsc::UnboundedReceiver<Command>,
    outstanding: usize,
}

impl<G: EntityGateway + 'static> AssignmentSession<G> {
    /// Opens an empty form for a new review and starts loading the
    /// departments and the existing reviews.
    #[must_use]
    pub fn open_create(gateway: Arc<G>, kind: ReviewKind) -> Self {
        info!(%kind, "opening assignment form");
        Self::start(gateway, open_create(kind))
    }

    /// Opens a form seeded from an existing review and starts loading every
    /// level of its cascade.
    #[must_use]
    pub fn open_update(gateway: Arc<G>, record: ReviewAssignment) -> Self {
        info!(id = %record.id, kind = %record.kind(), "opening review for editing");
        Self::start(gateway, open_update(record))
    }

    fn start(gateway: Arc<G>, opened: TransitionResult) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut session: Self = Self {
            gateway,
            state: opened.new_state,
            completions_tx,
            completions_rx,
            outstanding: 0,
        };
        session.spawn_effects(opened.effects);
        session
    }

    /// Returns the number of effects whose completion has not been applied.
    #[must_use]
    pub const fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Returns the current form state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Applies a command and starts any I/O it requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the form rejects the command.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, ApiError> {
        let was_read_only: bool = self.state.read_only;
        let transition: TransitionResult = apply(&self.state, command)?;

        match transition.outcome {
            Outcome::Stale => debug!("discarded a completion for a superseded request"),
            Outcome::Unchanged => debug!("command left the form unchanged"),
            Outcome::Applied => {}
        }

        self.state = transition.new_state;
        if self.state.read_only && !was_read_only {
            error!("backend unreachable, form is read-only");
        }
        self.spawn_effects(transition.effects);
        Ok(transition.outcome)
    }

    /// Waits for the next I/O completion and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion does not fit the form or if no
    /// work is outstanding.
    pub async fn next_completion(&mut self) -> Result<Outcome, ApiError> {
        // The session holds a sender, so the channel never closes while it
        // lives; waiting with no effect task running would block forever.
        if self.outstanding == 0 {
            return Err(ApiError::SessionIdle);
        }
        let command: Command = self
            .completions_rx
            .recv()
            .await
            .ok_or(ApiError::SessionIdle)?;
        self.outstanding -= 1;
        self.dispatch(command)
    }

    /// Applies completions until no fetch is outstanding.
    ///
    /// # Errors
    ///
    /// Returns an error if a completion does not fit the form.
    pub async fn settle(&mut self) -> Result<(), ApiError> {
        while !self.state.is_settled() {
            self.next_completion().await?;
        }
        Ok(())
    }

    /// Submits the form and waits for the backend's answer.
    ///
    /// On success the stored record is merged into `reviews` (replacing the
    /// edited entry, or appended for a new review) and returned. On failure
    /// the form keeps its fields so the caller can retry.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a submission is already in
    /// flight, or the backend rejects the review.
    pub async fn submit(
        &mut self,
        reviews: &mut Vec<ReviewAssignment>,
    ) -> Result<ReviewAssignment, ApiError> {
        if self.state.validation().due_date == DueDateCheck::Unverified {
            warn!("submitting before the subject due date is known; due date not verified");
        }
        self.dispatch(Command::Submit)?;

        while self.submission_in_flight() {
            self.next_completion().await?;
        }

        match &self.state.submission {
            SubmissionPhase::Succeeded(record) => {
                let record: ReviewAssignment = record.as_ref().clone();
                info!(id = %record.id, kind = %record.kind(), "review stored");
                merge_submitted(reviews, record.clone(), self.state.editing_id());
                Ok(record)
            }
            SubmissionPhase::Failed(message) => {
                warn!(%message, "submission rejected");
                Err(ApiError::Rejected(message.clone()))
            }
            SubmissionPhase::Idle | SubmissionPhase::InFlight(_) => Err(ApiError::SessionIdle),
        }
    }

    const fn submission_in_flight(&self) -> bool {
        matches!(self.state.submission, SubmissionPhase::InFlight(_))
    }

    fn spawn_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.outstanding += 1;
            let gateway: Arc<G> = Arc::clone(&self.gateway);
            let completions: mpsc::UnboundedSender<Command> = self.completions_tx.clone();
            tokio::spawn(async move {
                let command: Command = execute(gateway.as_ref(), effect).await;
                if completions.send(command).is_err() {
                    debug!("session closed before a completion arrived");
                }
            });
        }
    }
}

/// Performs one effect against the gateway and turns the result into the
/// completion command for the form.
pub async fn execute<G: EntityGateway + ?Sized>(gateway: &G, effect: Effect) -> Command {
    match effect {
        Effect::Fetch { request, target } => {
            debug!(%request, ?target, "fetching");
            let result: Result<FetchPayload, FetchFailure> =
                fetch(gateway, target).await.map_err(|err| {
                    warn!(%request, ?target, error = %err, "fetch failed");
                    err.to_fetch_failure()
                });
            Command::FetchCompleted { request, result }
        }
        Effect::Submit {
            request,
            kind,
            review_id,
            draft,
        } => {
            info!(%request, %kind, ?review_id, "submitting review");
            let stored: Result<ReviewAssignment, ApiError> = match review_id {
                Some(id) => gateway.update_review(kind, id, &draft).await,
                None => gateway.create_review(kind, &draft).await,
            };
            Command::SubmitCompleted {
                request,
                result: stored.map_err(|err| err.to_string()),
            }
        }
    }
}
