// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment form validation.
//!
//! Every function here is pure and synchronous. The form re-evaluates them
//! after each transition.

use crate::error::DomainError;
use crate::review::ReviewKind;
use crate::snapshot::{AssignmentSnapshot, RequiredField};
use time::Date;

/// Outcome of comparing the review due date with the subject due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateCheck {
    /// The review is due on or after the subject.
    Valid,
    /// The subject due date (or the review due date) is not known yet.
    ///
    /// This passes validation (fail open). Callers should surface it, since
    /// the subject lookup may still be in flight.
    Unverified,
    /// The review would be due before the subject.
    BeforeSubject {
        /// The requested review due date.
        due_date: Date,
        /// The subject's due date.
        subject_due_date: Date,
    },
}

impl DueDateCheck {
    /// Compares a review due date with its subject's due date.
    #[must_use]
    pub fn evaluate(due_date: Option<Date>, subject_due_date: Option<Date>) -> Self {
        match (due_date, subject_due_date) {
            (Some(due_date), Some(subject_due_date)) if due_date < subject_due_date => {
                Self::BeforeSubject {
                    due_date,
                    subject_due_date,
                }
            }
            (Some(_), Some(_)) => Self::Valid,
            _ => Self::Unverified,
        }
    }

    /// Returns true unless the review is known to be due too early.
    #[must_use]
    pub const fn passes(&self) -> bool {
        !matches!(self, Self::BeforeSubject { .. })
    }
}

/// Returns true if every field the review kind requires is filled in.
#[must_use]
pub fn is_complete(snapshot: &AssignmentSnapshot, kind: ReviewKind) -> bool {
    missing_fields(snapshot, kind).is_empty()
}

/// Lists the required fields that are still empty, in form order.
#[must_use]
pub fn missing_fields(snapshot: &AssignmentSnapshot, kind: ReviewKind) -> Vec<RequiredField> {
    RequiredField::for_kind(kind)
        .iter()
        .copied()
        .filter(|field| !field.is_filled(snapshot))
        .collect()
}

/// Returns true if the review is not due before its subject.
///
/// An unknown subject due date counts as valid.
#[must_use]
pub fn is_due_date_valid(due_date: Date, subject_due_date: Option<Date>) -> bool {
    DueDateCheck::evaluate(Some(due_date), subject_due_date).passes()
}

/// The full validation result for an assignment form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required fields that are still empty.
    pub missing: Vec<RequiredField>,
    /// The due date comparison.
    pub due_date: DueDateCheck,
    /// Whether the subject list offers at least one choice.
    pub has_eligible_subject: bool,
    /// Whether an existing assignment is being edited.
    pub editing: bool,
}

impl ValidationReport {
    /// Returns true if all required fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Returns true if the form may be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_complete() && self.due_date.passes() && (self.has_eligible_subject || self.editing)
    }

    /// Converts the report into the first blocking error, in form order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The subject list is empty and no assignment is being edited
    /// - A required field is empty
    /// - The review is due before its subject
    pub fn into_result(self) -> Result<(), DomainError> {
        if !self.has_eligible_subject && !self.editing {
            return Err(DomainError::NoEligibleSubject);
        }
        if let Some(field) = self.missing.first() {
            return Err(DomainError::MissingField(*field));
        }
        if let DueDateCheck::BeforeSubject {
            due_date,
            subject_due_date,
        } = self.due_date
        {
            return Err(DomainError::DueDateBeforeSubject {
                due_date,
                subject_due_date,
            });
        }
        Ok(())
    }
}

/// Validates an assignment snapshot.
///
/// # Arguments
///
/// * `snapshot` - The form fields
/// * `kind` - Goal or task review
/// * `subject_due_date` - The subject's due date, if resolved
/// * `has_eligible_subject` - Whether the filtered subject list is non-empty
/// * `editing` - Whether an existing assignment is being edited
#[must_use]
pub fn validate_assignment(
    snapshot: &AssignmentSnapshot,
    kind: ReviewKind,
    subject_due_date: Option<Date>,
    has_eligible_subject: bool,
    editing: bool,
) -> ValidationReport {
    ValidationReport {
        missing: missing_fields(snapshot, kind),
        due_date: DueDateCheck::evaluate(snapshot.due_date, subject_due_date),
        has_eligible_subject,
        editing,
    }
}
