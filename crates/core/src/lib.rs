// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;
mod submission;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, open_create, open_update};
pub use command::{Command, Effect, FetchFailure, FetchPayload, FetchTarget, RequestId};
pub use error::CoreError;
pub use state::{
    Availability, FormMode, FormState, Level, LevelPhase, Outcome, SubmissionPhase,
    TransitionResult,
};
pub use submission::{merge_submitted, remove_assignment};
