use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use update_checker::config::{self, DEFAULT_GITHUB_API_BASE, Protocol, UpdateCheckConfig};
use update_checker::state::StateStore;
use update_checker::update::UpdateCheckEngine;
use update_checker::update::notice::{NotificationSink, UpdateNotice, announce};

#[derive(Parser)]
#[command(name = "update-checker")]
#[command(version, about = "Check whether a newer release of an application is published")]
struct Cli {
    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check for a newer release, honoring the cached check window
    Check(CheckArgs),
    /// Print the stored check result without contacting the network
    Status {
        #[arg(long)]
        state_file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Repository owner
    #[arg(long, default_value = "")]
    owner: String,
    /// Repository slug
    #[arg(long)]
    repo: String,
    /// Installed version
    #[arg(long)]
    current_version: String,
    /// API base (GitHub) or proxy root (with --proxy)
    #[arg(long, default_value = DEFAULT_GITHUB_API_BASE)]
    endpoint: String,
    /// Ask an update-info proxy instead of the GitHub API
    #[arg(long)]
    proxy: bool,
    /// Ignore the cached result for this run
    #[arg(long)]
    force: bool,
    /// Days a successful check stays valid
    #[arg(long)]
    frequency_days: Option<i64>,
    #[arg(long)]
    state_file: Option<PathBuf>,
}

struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&mut self, notice: &UpdateNotice) {
        println!("{}", notice.title);
        println!("{}", notice.message);
        if !notice.url.is_empty() {
            println!("{}", notice.url);
        }
    }
}

fn init_logging(to_stderr: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    }

    let log_dir = config::log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "update-checker.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

async fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let store = StateStore::new(args.state_file.unwrap_or_else(config::state_path));
    let mut result = store.load()?;

    if let Some(days) = args.frequency_days {
        result.check_frequency_days = days;
    }
    result.force_update_check |= args.force;

    let update_config = UpdateCheckConfig {
        app_name: args.repo.clone(),
        owner: args.owner,
        repo_slug: args.repo,
        endpoint: args.endpoint,
        current_version: args.current_version,
        protocol: if args.proxy {
            Protocol::Proxy
        } else {
            Protocol::GitHub
        },
        credentials: None,
    };

    let engine = UpdateCheckEngine::for_protocol(update_config.protocol)?;
    let outcome = engine.check(&update_config, &mut result).await;
    tracing::debug!("Check outcome: {:?}", outcome);

    store.save(&result)?;

    if !announce(&result, &mut ConsoleSink) {
        println!("No update available");
    }
    Ok(())
}

fn show_status(state_file: Option<PathBuf>) -> anyhow::Result<()> {
    let store = StateStore::new(state_file.unwrap_or_else(config::state_path));
    let result = store.load()?;

    if result.last_checked_timestamp.is_empty() {
        println!("Never checked");
    } else {
        println!("Last checked: {}", result.last_checked_timestamp);
    }
    if !announce(&result, &mut ConsoleSink) {
        println!("No update available");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_stderr)?;

    match cli.command {
        Command::Check(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_check(args)),
        Command::Status { state_file } => show_status(state_file),
    }
}
