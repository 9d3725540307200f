use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pagination_kit::config::{get_config, Config};
use pagination_kit::{Pagination, PaginationError, PaginationOptions, PaginationSnapshot};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use utoipa::PartialSchema;

#[derive(Parser)]
#[command(
    name = "pagination-kit",
    version,
    about = "Compute pagination metadata for a window over a collection",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    state: StateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Print the JSON schema of the snapshot output
    Schema,
}

#[derive(Args)]
struct StateArgs {
    /// Items per page [default: PAGINATION_DEFAULT_TAKE or 10]
    #[arg(long, allow_hyphen_values = true)]
    take: Option<i64>,
    /// Zero-based index of the first item of the window
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
    /// Total number of items, if known
    #[arg(long = "total", allow_hyphen_values = true)]
    total_items_count: Option<i64>,
    /// More items exist past the window
    #[arg(long)]
    has_more: bool,
    /// Page numbers to show [default: PAGINATION_MAX_PAGES or 5]
    #[arg(long = "max-pages")]
    maximum_pages_to_display: Option<usize>,
    /// Jump to this page before printing
    #[arg(long, conflicts_with_all = ["next", "previous"])]
    page: Option<u64>,
    /// Move to the next page before printing
    #[arg(long, conflicts_with = "previous")]
    next: bool,
    /// Move to the previous page before printing
    #[arg(long)]
    previous: bool,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

fn evaluate(args: &StateArgs, config: &Config) -> Result<Pagination, PaginationError> {
    let mut options = PaginationOptions::new(args.take.unwrap_or(config.default_take))
        .offset(args.offset)
        .has_more(args.has_more)
        .maximum_pages_to_display(
            args.maximum_pages_to_display
                .unwrap_or(config.maximum_pages_to_display),
        );
    if let Some(total) = args.total_items_count {
        options = options.total_items_count(total);
    }

    let pagination = Pagination::new(options)?;
    tracing::debug!(%pagination, "evaluated pagination state");

    Ok(match (args.page, args.next, args.previous) {
        (Some(page), _, _) => pagination.page(page),
        (None, true, _) => pagination.next_page(),
        (None, false, true) => pagination.previous_page(),
        (None, false, false) => pagination,
    })
}

fn render(snapshot: &PaginationSnapshot, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(snapshot)
    } else {
        serde_json::to_string(snapshot)
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Some(Command::Schema) => Ok(serde_json::to_string_pretty(
            &PaginationSnapshot::schema(),
        )?),
        None => {
            let pagination = evaluate(&cli.state, get_config())?;
            Ok(render(&pagination.get_all(), cli.state.pretty)?)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
