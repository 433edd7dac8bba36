//! zap-quote - price and book parcels from the command line
//!
//! Usage:
//!   zap-quote price <draft.json>
//!   zap-quote book <draft.json> --email <actor> --token <bearer>
//!   zap-quote regions

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shared::{Actor, ParcelDraft};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use zap_engine::utils::report::exit_code;
use zap_engine::{
    ApiResponse, AppError, EngineConfig, EngineError, EngineState, ErrorCode, setup_environment,
};

#[derive(Parser)]
#[command(name = "zap-quote")]
#[command(about = "Quote and book Zap parcels", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a draft and print the quote
    Price {
        /// Draft JSON file
        draft: PathBuf,
    },
    /// Price, confirm and submit a draft
    Book(BookArgs),
    /// List regions and their service centers
    Regions,
}

#[derive(Args)]
struct BookArgs {
    /// Draft JSON file
    draft: PathBuf,

    /// Actor email (recorded as createdBy)
    #[arg(long, env = "ZAP_ACTOR_EMAIL")]
    email: String,

    /// Bearer token from the authentication service
    #[arg(long, env = "ZAP_ACTOR_TOKEN", hide_env_values = true)]
    token: String,

    /// Display name used in the tracking log
    #[arg(long)]
    name: Option<String>,
}

fn load_draft(path: &Path) -> anyhow::Result<ParcelDraft> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading draft {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing draft {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&ApiResponse::success(value))?);
    Ok(())
}

/// Engine failures keep their own code; anything else is a bad invocation
fn to_app_error(err: anyhow::Error) -> AppError {
    match err.downcast::<EngineError>() {
        Ok(engine) => AppError::from(engine),
        Err(other) => {
            AppError::new(ErrorCode::InvalidRequest).with_detail("reason", format!("{other:#}"))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. 设置环境 (dotenv, 配置, 日志)
    let config = setup_environment();

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let summary = format!("{err:#}");
            let app = to_app_error(err);
            tracing::error!(
                code = app.code.code(),
                category = app.code.category().name(),
                "{summary}"
            );
            match serde_json::to_string_pretty(&ApiResponse::<()>::error(&app)) {
                Ok(body) => eprintln!("{body}"),
                Err(_) => eprintln!("{}", app.message),
            }
            ExitCode::from(exit_code(&app))
        }
    }
}

async fn run(cli: Cli, config: &EngineConfig) -> anyhow::Result<()> {
    // 2. 初始化引擎状态
    let state = EngineState::initialize(config)?;

    match cli.command {
        Commands::Price { draft } => {
            let draft = load_draft(&draft)?;
            let quote = state.policy().price(&draft)?;
            print_json(&quote)?;
        }
        Commands::Book(args) => {
            let draft = load_draft(&args.draft)?;
            let mut actor = Actor::new(args.email, args.token);
            if let Some(name) = args.name {
                actor = actor.with_display_name(name);
            }

            let mut session = state.new_session(draft);
            let quote = session.price()?;
            tracing::info!(amount = %quote.amount(), "Quote ready");
            session.confirm()?;

            // Ctrl-C stops further retries
            let cancel = session.cancellation_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted, abandoning submission");
                    cancel.cancel();
                }
            });

            let receipt = session.submit(&actor).await?;
            if !receipt.tracking_logged {
                tracing::warn!("Booking created but the tracking log was not updated");
            }
            print_json(&receipt)?;
        }
        Commands::Regions => {
            print_json(&state.regions().regions())?;
        }
    }

    Ok(())
}
