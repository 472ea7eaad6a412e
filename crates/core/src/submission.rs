// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use review_desk_domain::{ReviewAssignment, ReviewId};

/// Reconciles a stored review into a caller-held list.
///
/// When `editing` names a review present in the list, that entry is
/// replaced in place. Otherwise the record is appended. The stored record
/// is taken as-is; fields the backend computed win over the draft.
pub fn merge_submitted(
    reviews: &mut Vec<ReviewAssignment>,
    record: ReviewAssignment,
    editing: Option<ReviewId>,
) {
    let id: ReviewId = editing.unwrap_or(record.id);
    match reviews.iter().position(|r| r.id == id) {
        Some(index) => reviews[index] = record,
        None => reviews.push(record),
    }
}

/// Removes a deleted review from a caller-held list.
///
/// Returns true if the list contained it.
pub fn remove_assignment(reviews: &mut Vec<ReviewAssignment>, id: ReviewId) -> bool {
    let before: usize = reviews.len();
    reviews.retain(|r| r.id != id);
    reviews.len() != before
}
