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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod error;
mod gateway;
mod http;
mod operations;
mod session;

#[cfg(test)]
mod tests;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use gateway::{EntityGateway, fetch};
pub use http::HttpGateway;
pub use operations::{complete_assignment, delete_assignment, find_assignment, list_assignments};
pub use session::{AssignmentSession, execute};
