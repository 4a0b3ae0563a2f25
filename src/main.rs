mod commands;
mod render;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hackdeck_core::filter::{SortKey, TypeFilter};
use hackdeck_core::params::{ListParams, ViewMode};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "hackdeck")]
#[command(about = "Browse the hackathon event catalog: search, filter, schedule and calendar export")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ListArgs {
    /// Start from a shared query string, e.g. "q=rust&type=workshop"
    #[arg(long)]
    params: Option<String>,

    /// Search names, descriptions and speakers
    #[arg(short, long)]
    query: Option<String>,

    /// Event type: all, workshop, tech_talk, activity
    #[arg(short = 't', long = "type")]
    filter: Option<TypeFilter>,

    /// Sort by: date, name, duration, type
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Layout: grid or schedule
    #[arg(long)]
    view: Option<ViewMode>,
}

impl ListArgs {
    /// Explicit flags win over values from `--params`.
    fn into_params(self) -> ListParams {
        let mut params = self
            .params
            .as_deref()
            .map(ListParams::parse)
            .unwrap_or_default();

        if let Some(query) = self.query {
            params.query = query;
        }
        if let Some(filter) = self.filter {
            params.filter = filter;
        }
        if let Some(sort) = self.sort {
            params.sort = sort;
        }
        if let Some(view) = self.view {
            params.view = view;
        }

        params
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List visible events
    List(ListArgs),
    /// Show one event in detail
    Show {
        /// Event id
        id: u64,
    },
    /// Write an .ics file for an event
    Export {
        /// Event id
        id: u64,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        out: std::path::PathBuf,

        /// Print the calendar to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },
    /// Summary statistics for the catalog
    Stats,
    /// Search interactively: type a query per line, results update as you go
    Browse {
        /// Event type: all, workshop, tech_talk, activity
        #[arg(short = 't', long = "type", default_value = "all")]
        filter: TypeFilter,

        /// Sort by: date, name, duration, type
        #[arg(short, long, default_value = "date")]
        sort: SortKey,
    },
    /// Log in to see private events
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Log out
    Logout,
    /// Show whether you are logged in
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            utils::error::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    let mut ctx = Context::load()?;

    match command {
        Commands::List(args) => commands::list::run(&mut ctx, args.into_params()).await,
        Commands::Show { id } => commands::show::run(&mut ctx, id).await,
        Commands::Export { id, out, stdout } => {
            let target = if stdout { None } else { Some(out) };
            commands::export::run(&mut ctx, id, target).await
        }
        Commands::Stats => commands::stats::run(&mut ctx).await,
        Commands::Browse { filter, sort } => commands::browse::run(&mut ctx, filter, sort).await,
        Commands::Login { username } => commands::auth::login(&mut ctx, username),
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackdeck_core::event::EventType;

    fn list_params(args: &[&str]) -> ListParams {
        let cli = Cli::try_parse_from(["hackdeck", "list"].iter().chain(args).copied()).unwrap();
        match cli.command {
            Commands::List(args) => args.into_params(),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_list_defaults() {
        assert_eq!(list_params(&[]), ListParams::default());
    }

    #[test]
    fn test_flags_override_shared_params() {
        let params = list_params(&["--params", "?q=rust&type=workshop&view=schedule", "--type", "activity"]);

        assert_eq!(params.query, "rust");
        assert_eq!(params.filter, TypeFilter::Only(EventType::Activity));
        assert_eq!(params.view, ViewMode::Schedule);
        assert_eq!(params.sort, SortKey::Date);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        assert!(Cli::try_parse_from(["hackdeck", "list", "--sort", "popularity"]).is_err());
    }
}
