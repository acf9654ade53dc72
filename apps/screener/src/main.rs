mod config;
mod controller;
mod form;
mod models;
mod normalize;
mod query;
mod render;
mod score_client;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::controller::{SubmissionController, SubmissionOutcome};
use crate::form::JobFormInput;
use crate::score_client::{HttpScoreClient, ScoreBackend};

#[derive(Parser, Debug)]
#[command(
    name = "screener",
    about = "智能简历筛选系统 — 输入岗位名称和要求，筛选最匹配的候选人",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one screening query and print the ranked candidates
    Screen(ScreenArgs),
    /// List the built-in job templates
    Templates,
    /// Print the usage and result-interpretation guides
    Guide,
}

#[derive(Args, Debug)]
struct ScreenArgs {
    /// Job title to screen for
    #[arg(long, default_value = form::DEFAULT_JOB_TITLE)]
    job_title: String,
    /// Free-text requirements; defaults to the preset template for the title
    #[arg(long)]
    requirements: Option<String>,
    /// How many candidates to return (clamped into 1..=50)
    #[arg(long, default_value_t = form::DEFAULT_TOP_N)]
    top_n: i64,
    /// Print the normalized result sequence as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));
    info!("后端地址: {}", config.backend_url);

    let backend = HttpScoreClient::new(&config.backend_url);
    let mut controller = SubmissionController::new(backend);

    match Cli::parse().command {
        Some(Command::Screen(args)) => run_once(&mut controller, args).await,
        Some(Command::Templates) => {
            for (title, body) in form::JOB_TEMPLATES {
                println!("{title}\n{body}\n");
            }
            Ok(())
        }
        Some(Command::Guide) => {
            println!("{}\n\n{}", render::USAGE_GUIDE, render::RESULT_GUIDE);
            Ok(())
        }
        None => run_interactive(&mut controller).await,
    }
}

/// One submission, then exit. Errors surface on stderr and the exit code.
async fn run_once<B: ScoreBackend>(
    controller: &mut SubmissionController<B>,
    args: ScreenArgs,
) -> Result<()> {
    let requirements = args
        .requirements
        .or_else(|| form::template_for(&args.job_title).map(str::to_string))
        .unwrap_or_default();
    let input = JobFormInput {
        job_title: args.job_title,
        requirements,
        top_n: args.top_n,
    };

    match controller.submit(&input).await {
        SubmissionOutcome::Completed => {
            let results = &controller.published().results;
            if args.json {
                println!("{}", serde_json::to_string_pretty(results)?);
            } else {
                println!("{}", render::results_block(results));
            }
            Ok(())
        }
        SubmissionOutcome::Failed(message) => {
            eprintln!("{}", render::error_block(&message));
            anyhow::bail!(message)
        }
        SubmissionOutcome::Refused => Ok(()),
    }
}

/// Prompt loop: one submission at a time, failures acknowledged with Enter
/// before the next round.
async fn run_interactive<B: ScoreBackend>(
    controller: &mut SubmissionController<B>,
) -> Result<()> {
    println!("{}", render::APP_TITLE);
    println!("{}\n", render::APP_SUBTITLE);
    println!("{}\n", render::IDLE_BLOCK);

    while let Some(input) = form::read_interactive()? {
        println!("\n{}\n", render::LOADING_BLOCK);
        let outcome = controller.submit(&input).await;
        println!("{}\n", render::render_published(controller.published()));
        if matches!(outcome, SubmissionOutcome::Failed(_)) {
            // Inline message above, plus a blocking acknowledgment before the
            // controller returns to ready for a retry.
            form::wait_for_ack()?;
            controller.acknowledge_failure();
        }
    }

    Ok(())
}
