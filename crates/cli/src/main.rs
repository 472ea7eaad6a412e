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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Args as ClapArgs, Parser, Subcommand};
use review_desk_api::{GatewayConfig, HttpGateway};
use review_desk_domain::{ReviewKind, ReviewStatus, iso_date};
use std::sync::Arc;
use time::Date;
use tracing::info;

/// Review Desk - assign and track goal and task reviews
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the HR REST API
    #[arg(
        long,
        env = "REVIEW_DESK_API_URL",
        default_value = "http://localhost:3000/api"
    )]
    api_url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "REVIEW_DESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "REVIEW_DESK_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: CliCommand,
}

impl Args {
    fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.api_url.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// List reviews of one kind
    Reviews {
        /// `goal` or `task`
        kind: ReviewKind,
        /// Only show reviews that are not completed
        #[arg(long)]
        active: bool,
    },
    /// Assign a new review
    Assign(AssignArgs),
    /// Change an existing review
    Edit(EditArgs),
    /// Record the reviewer's text and mark a review completed
    Complete {
        /// `goal` or `task`
        kind: ReviewKind,
        /// The review id
        id: i64,
        /// The review text
        #[arg(long)]
        text: String,
        /// Submission date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Delete a review
    Delete {
        /// `goal` or `task`
        kind: ReviewKind,
        /// The review id
        id: i64,
    },
    /// Show the selectable options for a partial selection
    Options(SelectionArgs),
}

/// A path through the department, team, goal and task levels.
#[derive(ClapArgs, Debug, Clone)]
pub struct SelectionArgs {
    /// `goal` or `task`
    pub kind: ReviewKind,
    /// Department id
    #[arg(long)]
    pub department: Option<i64>,
    /// Team id
    #[arg(long)]
    pub team: Option<i64>,
    /// Goal id
    #[arg(long)]
    pub goal: Option<i64>,
    /// Task id (task reviews only)
    #[arg(long)]
    pub task: Option<i64>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AssignArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Review due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub due: Date,
    /// Instructions for the reviewer
    #[arg(long)]
    pub description: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// The review id
    #[arg(long)]
    pub id: i64,
    /// New due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub due: Option<Date>,
    /// New reviewer instructions
    #[arg(long)]
    pub description: Option<String>,
    /// New status (`pending`, `in-progress`, `completed`)
    #[arg(long)]
    pub status: Option<ReviewStatus>,
}

fn parse_date(value: &str) -> Result<Date, String> {
    iso_date::parse(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing; stdout is reserved for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let gateway: Arc<HttpGateway> = Arc::new(HttpGateway::new(args.gateway_config())?);
    info!(url = %gateway.config().base_url, "using HR backend");

    let output: serde_json::Value = match args.command {
        CliCommand::Reviews { kind, active } => {
            commands::reviews(gateway.as_ref(), kind, active).await?
        }
        CliCommand::Assign(assign) => commands::assign(gateway, &assign).await?,
        CliCommand::Edit(edit) => commands::edit(gateway, &edit).await?,
        CliCommand::Complete {
            kind,
            id,
            text,
            date,
        } => commands::complete(gateway.as_ref(), kind, id, &text, date).await?,
        CliCommand::Delete { kind, id } => {
            commands::delete(gateway.as_ref(), kind, id).await?
        }
        CliCommand::Options(selection) => commands::options(gateway, &selection).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
