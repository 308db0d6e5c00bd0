use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use questcraft::cli::commands::{config, plan, quest, serve};
use questcraft::cli::ui::Output;
use questcraft::constants::quest::DEFAULT_QUEST_FILE;
use questcraft::{ProviderKind, Scenario};

#[derive(Parser)]
#[command(name = "questcraft")]
#[command(
    version,
    about = "RPG-style learning quest planner backed by LLM task decomposition"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, help = "Bind address (default: server.host)")]
        host: Option<String>,
        #[arg(long, short, help = "Port (default: server.port or $PORT)")]
        port: Option<u16>,
    },

    /// Plan a question once and print the tasks
    Plan {
        #[arg(help = "Learning goal or question")]
        question: String,
        #[arg(long, help = "LLM provider: doubao, deepseek")]
        provider: Option<ProviderKind>,
        #[arg(long, default_value = "initial", help = "Scenario: initial, expand, stuck")]
        scenario: Scenario,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
        #[arg(long, help = "Use a running QuestCraft API instead of local providers")]
        server: Option<String>,
    },

    /// Build and work through a quest tree
    Quest {
        #[command(subcommand)]
        action: QuestAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct QuestTarget {
    #[arg(long, default_value = DEFAULT_QUEST_FILE, help = "Quest tree file")]
    file: PathBuf,
    #[arg(long, help = "LLM provider: doubao, deepseek")]
    provider: Option<ProviderKind>,
    #[arg(long, help = "Use a running QuestCraft API instead of local providers")]
    server: Option<String>,
}

impl From<QuestTarget> for quest::QuestOptions {
    fn from(target: QuestTarget) -> Self {
        Self {
            file: target.file,
            provider: target.provider,
            server: target.server,
        }
    }
}

#[derive(Subcommand)]
enum QuestAction {
    /// Plan a new quest (a sample goal is picked when none is given)
    New {
        #[arg(help = "Learning goal")]
        goal: Option<String>,
        #[command(flatten)]
        target: QuestTarget,
    },
    /// Show the quest tree and progress
    Show {
        #[arg(long, default_value = DEFAULT_QUEST_FILE, help = "Quest tree file")]
        file: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Break a task into subtasks
    Expand {
        #[arg(help = "Node path, e.g. root-0-1")]
        path: String,
        #[command(flatten)]
        target: QuestTarget,
    },
    /// Ask for smaller rescue steps on a task
    Stuck {
        #[arg(help = "Node path, e.g. root-0-1")]
        path: String,
        #[command(flatten)]
        target: QuestTarget,
    },
    /// Toggle a task's completion
    Done {
        #[arg(help = "Node path, e.g. root-0-1")]
        path: String,
        #[arg(long, default_value = DEFAULT_QUEST_FILE, help = "Quest tree file")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mQuestCraft encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Deployment variables may live in a local .env
    dotenv::dotenv().ok();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let rt = Runtime::new()?;
            rt.block_on(serve::run(host, port))?;
        }
        Commands::Plan {
            question,
            provider,
            scenario,
            format,
            server,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(plan::run(plan::PlanOptions {
                question,
                provider,
                scenario,
                format,
                server,
            }))?;
        }
        Commands::Quest { action } => match action {
            QuestAction::New { goal, target } => {
                let rt = Runtime::new()?;
                rt.block_on(quest::new(goal, &target.into()))?;
            }
            QuestAction::Show { file, format } => {
                quest::show(&file, &format)?;
            }
            QuestAction::Expand { path, target } => {
                let rt = Runtime::new()?;
                rt.block_on(quest::expand_node(&path, &target.into()))?;
            }
            QuestAction::Stuck { path, target } => {
                let rt = Runtime::new()?;
                rt.block_on(quest::stuck(&path, &target.into()))?;
            }
            QuestAction::Done { path, file } => {
                quest::done(&path, &file)?;
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                config::show(&format)?;
            }
            ConfigAction::Path => {
                config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    config::init_global(force)?;
                } else {
                    config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
