// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review operations that do not go through the assignment form.

use crate::error::ApiError;
use crate::gateway::EntityGateway;
use review_desk::remove_assignment;
use review_desk_domain::{ReviewAssignment, ReviewDraft, ReviewId, ReviewKind, complete_review};
use time::Date;
use tracing::info;

/// Lists the reviews of a kind, optionally only the active ones.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn list_assignments<G: EntityGateway + ?Sized>(
    gateway: &G,
    kind: ReviewKind,
    active_only: bool,
) -> Result<Vec<ReviewAssignment>, ApiError> {
    let mut reviews: Vec<ReviewAssignment> = gateway.list_reviews(kind).await?;
    if active_only {
        reviews.retain(ReviewAssignment::is_active);
    }
    Ok(reviews)
}

/// Finds one review by id.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if no review of this kind has the id, or
/// the backend error if the listing fails.
pub async fn find_assignment<G: EntityGateway + ?Sized>(
    gateway: &G,
    kind: ReviewKind,
    id: ReviewId,
) -> Result<ReviewAssignment, ApiError> {
    gateway
        .list_reviews(kind)
        .await?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("{}/{id}", kind.collection())))
}

/// Records the reviewer's text on a review and stores it as completed.
///
/// # Errors
///
/// Returns an error if the text is empty, the review is already completed,
/// or the backend rejects the update.
pub async fn complete_assignment<G: EntityGateway + ?Sized>(
    gateway: &G,
    record: &ReviewAssignment,
    text: &str,
    submitted_on: Date,
) -> Result<ReviewAssignment, ApiError> {
    let completed: ReviewAssignment = complete_review(record, text, submitted_on)?;
    let draft: ReviewDraft = ReviewDraft::from(&completed);
    let stored: ReviewAssignment = gateway
        .update_review(record.kind(), record.id, &draft)
        .await?;
    info!(id = %stored.id, kind = %stored.kind(), "review completed");
    Ok(stored)
}

/// Deletes a review and drops it from the caller's list.
///
/// Returns true if the list contained the review.
///
/// # Errors
///
/// Returns an error if the backend rejects the delete. The list is left
/// unchanged in that case.
pub async fn delete_assignment<G: EntityGateway + ?Sized>(
    gateway: &G,
    reviews: &mut Vec<ReviewAssignment>,
    kind: ReviewKind,
    id: ReviewId,
) -> Result<bool, ApiError> {
    gateway.delete_review(kind, id).await?;
    info!(%id, %kind, "review deleted");
    Ok(remove_assignment(reviews, id))
}
