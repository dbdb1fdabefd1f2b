//! glass - command-line front end for Glass Tasks.

mod render;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use glass_core::config::{
    DEFAULT_BACKEND_URL, ENV_BACKEND_URL, ENV_HTTP_TIMEOUT_SECS, parse_timeout_secs,
};
use glass_core::domain::{CategoryFilter, Priority, PriorityFilter, StatusFilter};
use glass_core::impls::TracingEventSink;
use glass_core::{AppBuilder, FilterState, GatewayConfig, Session, TaskDraft, TaskId, TaskPatch};

#[derive(Debug, Parser)]
#[command(name = "glass", about = "Organize your tasks from the terminal", version)]
struct Cli {
    /// Backend base URL (the API lives under /api)
    #[arg(long, global = true, env = ENV_BACKEND_URL, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// HTTP timeout in seconds (transport default when unset)
    #[arg(long, global = true, env = ENV_HTTP_TIMEOUT_SECS, value_parser = parse_timeout)]
    timeout_secs: Option<Duration>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Change fields of a task
    Edit(EditArgs),
    /// Mark a task completed, or reopen it
    Toggle { id: String },
    /// Delete a task
    Rm { id: String },
    /// Show available categories
    Categories,
    /// Show total / completed / pending counts
    Stats,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive text to look for in title or description
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value = "all")]
    category: CategoryFilter,
    #[arg(long, default_value = "all")]
    priority: PriorityFilter,
    /// all, completed or pending
    #[arg(long, default_value = "all")]
    status: StatusFilter,
}

#[derive(Debug, Args)]
struct AddArgs {
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = glass_core::domain::DEFAULT_CATEGORY)]
    category: String,
    #[arg(long, default_value = "medium")]
    priority: Priority,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    priority: Option<Priority>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due: Option<NaiveDate>,
    #[arg(long)]
    completed: Option<bool>,
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    parse_timeout_secs(raw).map_err(|e| e.to_string())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("glass_core=debug,glass=debug,info")
        } else {
            EnvFilter::new("glass_core=info,warn")
        }
    });

    // stdout は結果の出力に使うのでログは stderr へ
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

async fn open_session(cli: &Cli) -> Result<Session> {
    let mut config = GatewayConfig::new(&cli.backend_url).context("invalid backend url")?;
    if let Some(timeout) = cli.timeout_secs {
        config = config.with_timeout(timeout);
    }

    debug!(api = %config.api_base(), "opening session");
    let mut session = AppBuilder::new()
        .http(&config)?
        .event_sink(TracingEventSink)
        .build()?;
    session
        .mount()
        .await
        .with_context(|| format!("could not load tasks from {}", config.api_base()))?;
    Ok(session)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut session = open_session(&cli).await?;
    let out = render::Output::new(cli.json);

    match cli.command {
        Command::List(args) => {
            session.set_filter(
                FilterState::default()
                    .with_search(args.search)
                    .with_category(args.category)
                    .with_priority(args.priority)
                    .with_status(args.status),
            );
            out.view(&session.view())?;
        }
        Command::Add(args) => {
            let mut draft = TaskDraft::new(args.title)
                .with_description(args.description)
                .with_category(args.category)
                .with_priority(args.priority);
            if let Some(due) = args.due {
                draft = draft.with_due_date(due);
            }
            let task = session
                .store_mut()
                .create(draft)
                .await
                .context("failed to add task")?;
            out.task(&task)?;
        }
        Command::Edit(args) => {
            let patch = TaskPatch {
                title: args.title,
                description: args.description,
                category: args.category,
                priority: args.priority,
                due_date: args.due,
                completed: args.completed,
            };
            if patch.is_empty() {
                bail!("nothing to change; pass at least one field flag");
            }
            let task = session
                .store_mut()
                .update(&TaskId::new(args.id), patch)
                .await
                .context("failed to update task")?;
            out.task(&task)?;
        }
        Command::Toggle { id } => {
            let task = session
                .store_mut()
                .toggle_completion(&TaskId::new(id))
                .await
                .context("failed to update task")?;
            out.task(&task)?;
        }
        Command::Rm { id } => {
            let id = TaskId::new(id);
            session
                .store_mut()
                .remove(&id)
                .await
                .context("failed to delete task")?;
            out.deleted(&id)?;
        }
        Command::Categories => out.categories(session.store().categories().names())?,
        Command::Stats => out.stats(&session.stats())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_defaults_to_no_filtering() {
        let cli = Cli::try_parse_from(["glass", "list"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.category, CategoryFilter::All);
        assert_eq!(args.priority, PriorityFilter::All);
        assert_eq!(args.status, StatusFilter::All);
        assert!(args.search.is_empty());
    }

    #[test]
    fn add_parses_priority_and_due_date() {
        let cli = Cli::try_parse_from([
            "glass", "add", "Buy milk", "--priority", "high", "--due", "2025-03-14", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.priority, Priority::High);
        assert_eq!(args.due, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(args.category, "general");
    }

    #[test]
    fn bad_status_is_rejected() {
        assert!(Cli::try_parse_from(["glass", "list", "--status", "done"]).is_err());
        assert!(Cli::try_parse_from(["glass", "stats", "--timeout-secs", "0"]).is_err());
    }
}
