// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Duplicate-assignment prevention.
//!
//! A goal (or task) may have at most one active review. The selectable
//! subjects are therefore the raw candidates minus the subjects of existing
//! active reviews:
//!
//! `selectable = candidates \ { r.subject : r ∈ existing, r.is_active(), r.id ≠ editing }`
//!
//! The single exception is the review being edited: its own subject is
//! never excluded, and is added back when the raw candidate list no longer
//! contains it (for example because the goal's status changed).

use crate::review::ReviewAssignment;
use crate::types::{Goal, GoalId, ReviewId, Task, TaskId};
use std::collections::HashSet;
use std::hash::Hash;
use time::Date;

/// An entity a review can target.
pub trait Subject: Clone {
    /// The identifier type of the subject.
    type Id: Copy + Eq + Hash + std::fmt::Debug;

    /// Returns the subject's identifier.
    fn subject_id(&self) -> Self::Id;

    /// Returns the subject's due date, if known.
    fn subject_due_date(&self) -> Option<Date>;

    /// Returns the subject of this type referenced by a review, if any.
    fn referenced_by(review: &ReviewAssignment) -> Option<Self::Id>;

    /// Builds a stand-in subject from the summary embedded in a review.
    ///
    /// Returns `None` if the review does not reference a subject of this type.
    fn from_review(review: &ReviewAssignment) -> Option<Self>;
}

impl Subject for Goal {
    type Id = GoalId;

    fn subject_id(&self) -> GoalId {
        self.id
    }

    fn subject_due_date(&self) -> Option<Date> {
        self.due_date
    }

    fn referenced_by(review: &ReviewAssignment) -> Option<GoalId> {
        review.subject.goal_id()
    }

    fn from_review(review: &ReviewAssignment) -> Option<Self> {
        let id: GoalId = review.subject.goal_id()?;
        Some(Self {
            id,
            title: review
                .subject_title
                .clone()
                .unwrap_or_else(|| format!("Goal #{id}")),
            team_id: Some(review.team_id),
            status: None,
            due_date: review.subject_due_date,
        })
    }
}

impl Subject for Task {
    type Id = TaskId;

    fn subject_id(&self) -> TaskId {
        self.id
    }

    fn subject_due_date(&self) -> Option<Date> {
        self.due_date
    }

    fn referenced_by(review: &ReviewAssignment) -> Option<TaskId> {
        review.subject.task_id()
    }

    fn from_review(review: &ReviewAssignment) -> Option<Self> {
        let id: TaskId = review.subject.task_id()?;
        Some(Self {
            id,
            title: review
                .subject_title
                .clone()
                .unwrap_or_else(|| format!("Task #{id}")),
            goal_id: None,
            employee_id: review.employee_id,
            due_date: review.subject_due_date,
            status: None,
        })
    }
}

/// Builds the set of subject ids that already have an active review.
///
/// The review identified by `editing` is left out so its subject stays
/// selectable.
#[must_use]
pub fn excluded_subjects<S: Subject>(
    existing: &[ReviewAssignment],
    editing: Option<ReviewId>,
) -> HashSet<S::Id> {
    existing
        .iter()
        .filter(|review| review.is_active())
        .filter(|review| Some(review.id) != editing)
        .filter_map(S::referenced_by)
        .collect()
}

/// Computes the subjects that may be assigned a new review.
///
/// # Arguments
///
/// * `candidates` - The raw candidate list for the current parent selection
/// * `existing` - All known review assignments of the matching kind
/// * `editing` - The review being edited, if any
///
/// # Returns
///
/// The candidates, in their original order, minus every subject with an
/// active review other than `editing`. When `editing` references a subject
/// missing from `candidates`, a stand-in built from the review is appended.
#[must_use]
pub fn available_subjects<S: Subject>(
    candidates: &[S],
    existing: &[ReviewAssignment],
    editing: Option<&ReviewAssignment>,
) -> Vec<S> {
    let excluded: HashSet<S::Id> = excluded_subjects::<S>(existing, editing.map(|r| r.id));

    let mut available: Vec<S> = candidates
        .iter()
        .filter(|candidate| !excluded.contains(&candidate.subject_id()))
        .cloned()
        .collect();

    if let Some(pinned) = editing.and_then(S::from_review) {
        let pinned_id: S::Id = pinned.subject_id();
        if !available.iter().any(|s| s.subject_id() == pinned_id) {
            available.push(pinned);
        }
    }

    available
}
