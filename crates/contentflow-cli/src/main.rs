//! `ContentFlow` CLI: create multi-platform content from the terminal.
//!
//! Collects the content form from flags, animates the agent workflow while
//! the request to the content API is in flight, and renders the results
//! dashboard. Falls back to demo content when the API is unreachable.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use contentflow_core::export::export_result;
use contentflow_core::generate::generate_platform_content;
use contentflow_core::sequencer::status_line_for;
use contentflow_core::{
    ClientConfig, ContentForm, ContentResult, JoinPolicy, Stage, StepSequencer, StepTiming,
    Studio, SynthesisPolicy, WORKFLOW, normalize,
};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

// ── CLI structure ────────────────────────────────────────────────────

/// ContentFlow: AI multi-agent content creation.
#[derive(Parser)]
#[command(
    name = "contentflow",
    version,
    about = "ContentFlow CLI — research, write, optimize and adapt content with AI agents",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         CONTENTFLOW_API_URL        Content API base URL\n  \
         CONTENTFLOW_ENV            production | development (default: development)\n  \
         CONTENTFLOW_TIMEOUT_SECS   Request timeout in seconds (default: none)\n  \
         CONTENTFLOW_LOG_LEVEL      Log filter (default: warn)\n\n\
         {DIM}Examples:{RESET}\n  \
         contentflow create \"Edge computing\" -p twitter,linkedin -k latency,iot\n  \
         contentflow create \"Rust in production\" --type whitepaper --out ./out\n  \
         contentflow platform twitter \"Green hydrogen\""
    ),
)]
struct Cli {
    /// Content API base URL (overrides CONTENTFLOW_ENV).
    #[arg(long, env = "CONTENTFLOW_API_URL", global = true)]
    api_url: Option<String>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create content through the agent backend.
    Create {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Skip the workflow animation.
        #[arg(long)]
        no_animation: bool,
        /// Stop the animation as soon as the request settles.
        #[arg(long)]
        cap_animation: bool,
    },
    /// Build demo content locally, without calling the backend.
    Demo {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the templated post for one platform.
    Platform {
        /// Platform key (twitter, linkedin, facebook, instagram, blog, ...).
        platform: String,
        /// Topic of the post.
        topic: String,
    },
    /// List the agent workflow stages.
    Stages,
}

#[derive(Args)]
struct FormArgs {
    /// Content topic.
    topic: String,
    /// Content type: blog_post, article, social_media, newsletter, whitepaper.
    #[arg(long = "type", default_value = "blog_post")]
    content_type: String,
    /// Target audience: general, professionals, students, entrepreneurs, technical.
    #[arg(long, default_value = "professionals")]
    audience: String,
    /// Tone: professional, casual, formal, conversational, authoritative.
    #[arg(long, default_value = "professional")]
    tone: String,
    /// Target platforms (repeat or comma-separate).
    #[arg(short, long = "platform", value_delimiter = ',', default_value = "blog")]
    platforms: Vec<String>,
    /// Comma-separated SEO keywords.
    #[arg(short, long, default_value = "")]
    keywords: String,
}

impl FormArgs {
    fn into_form(self) -> ContentForm {
        ContentForm {
            topic: self.topic,
            content_type: self.content_type,
            target_audience: self.audience,
            tone: self.tone,
            platforms: self.platforms,
            keywords: self.keywords,
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON instead of the dashboard.
    #[arg(long)]
    json: bool,
    /// Write content files and a JSON report into this directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── Entry point ──────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_base_url(cli.api_url.as_deref());
    init_tracing(&config, cli.log_json);

    match run(config, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &ClientConfig, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: ClientConfig, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Create {
            form,
            output,
            no_animation,
            cap_animation,
        } => cmd_create(&config, form.into_form(), &output, no_animation, cap_animation).await,
        Commands::Demo { form, output } => cmd_demo(form.into_form(), &output),
        Commands::Platform { platform, topic } => {
            println!("{}", generate_platform_content(&topic, &platform));
            Ok(())
        }
        Commands::Stages => {
            cmd_stages();
            Ok(())
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

async fn cmd_create(
    config: &ClientConfig,
    form: ContentForm,
    output: &OutputArgs,
    no_animation: bool,
    cap_animation: bool,
) -> Result<()> {
    let join = if cap_animation {
        JoinPolicy::CapToRequest
    } else {
        JoinPolicy::AwaitLonger
    };
    let studio = Studio::http(config)
        .context("failed to set up content API client")?
        .with_join_policy(join);

    let timing = if no_animation {
        StepTiming::instant()
    } else {
        StepTiming::default()
    };
    let sequencer = StepSequencer::new(&WORKFLOW, timing);

    // Progress goes to stdout only for the dashboard view.
    let progress = (!output.json && !no_animation)
        .then(|| spawn_progress(sequencer.subscribe(), sequencer.stages()));

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    debug!(api = %config.base_url, "submitting content form");
    let outcome = studio.submit(&form, &sequencer, Some(cancel_rx)).await;

    ctrl_c.abort();
    drop(sequencer);
    if let Some(handle) = progress {
        let _ = handle.await;
    }

    let result = outcome.context("failed to create content")?;
    emit(&result, output)
}

fn cmd_demo(form: ContentForm, output: &OutputArgs) -> Result<()> {
    let request = form.validate()?;
    let result = normalize::demo(&request, &mut SynthesisPolicy::new());
    emit(&result, output)
}

fn cmd_stages() {
    header("🤖", "Multi-Agent Workflow");
    for (i, stage) in WORKFLOW.iter().enumerate() {
        println!(
            "  {CYAN}{}{RESET}. {BOLD}{:<18}{RESET} {DIM}{}{RESET}",
            i + 1,
            stage.agent,
            stage.description
        );
    }
}

fn emit(result: &ContentResult, output: &OutputArgs) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
        println!("{json}");
    } else {
        render::print_results(result);
    }

    if let Some(dir) = &output.out {
        let files = export_result(result, dir)
            .with_context(|| format!("failed to export to {}", dir.display()))?;
        if !output.json {
            println!();
            for path in files.all() {
                success(&format!("wrote {}", path.display()));
            }
        }
    }
    Ok(())
}

fn spawn_progress(mut rx: watch::Receiver<isize>, stages: &'static [Stage]) -> JoinHandle<()> {
    tokio::spawn(async move {
        println!();
        header("🤖", "Multi-Agent Workflow");
        while rx.changed().await.is_ok() {
            let current = *rx.borrow_and_update();
            let Some(line) = status_line_for(stages, current) else {
                continue;
            };
            match usize::try_from(current).ok().filter(|i| *i < stages.len()) {
                Some(i) => {
                    println!("  {CYAN}▸{RESET} {DIM}[{}/{}]{RESET} {line}", i + 1, stages.len());
                }
                None => success(&line),
            }
        }
        println!();
    })
}
