mod console;

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use services::{LearningSystem, UserAction};
use storage::JsonStateStore;

use crate::console::ConsoleRenderer;

const DEFAULT_API_BASE: &str = "http://localhost:5001";
const DEFAULT_STATE_FILE: &str = "mastery-state.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingTopic,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingTopic => write!(f, "quiz requires --topic <id-or-name>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- dashboard [--api <url>] [--state <file>] [--watch]");
    eprintln!("  cargo run -p app -- quiz --topic <id-or-name> [--api <url>] [--state <file>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {DEFAULT_API_BASE}");
    eprintln!("  --state {DEFAULT_STATE_FILE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MASTERY_API_BASE, MASTERY_STATE_FILE");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Dashboard,
    Quiz,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "dashboard" => Some(Self::Dashboard),
            "quiz" => Some(Self::Quiz),
            _ => None,
        }
    }
}

struct Args {
    api_base: String,
    state_file: String,
    topic: Option<String>,
    watch: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_base =
            std::env::var("MASTERY_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let mut state_file =
            std::env::var("MASTERY_STATE_FILE").unwrap_or_else(|_| DEFAULT_STATE_FILE.into());
        let mut topic = None;
        let mut watch = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => api_base = require_value(args, "--api")?,
                "--state" => state_file = require_value(args, "--state")?,
                "--topic" => topic = Some(require_value(args, "--topic")?),
                "--watch" => watch = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_base,
            state_file,
            topic,
            watch,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: show the dashboard when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Dashboard,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Dashboard,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    tracing::info!(api_base = %parsed.api_base, state_file = %parsed.state_file, "starting dashboard client");

    let store = Arc::new(JsonStateStore::new(&parsed.state_file));
    let renderer = Arc::new(ConsoleRenderer);
    let system = Arc::new(LearningSystem::connect(&parsed.api_base, store, renderer).await?);

    system.init().await;

    match cmd {
        Command::Dashboard => {
            if parsed.watch {
                // Keep the process alive so the midnight streak reset runs.
                tokio::spawn(system.streak_scheduler().run());
                tokio::signal::ctrl_c().await?;
            }
            Ok(())
        }
        Command::Quiz => {
            let topic = parsed.topic.ok_or(ArgsError::MissingTopic)?;
            run_quiz(&system, &topic).await
        }
    }
}

async fn run_quiz(
    system: &LearningSystem,
    topic: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    system
        .handle_action(UserAction::StartQuiz {
            topic: topic.to_string(),
        })
        .await;
    if !system.quiz().is_presenting() {
        eprintln!("topic not found: {topic}");
        return Ok(());
    }

    let presented = {
        let catalog = system.catalog();
        catalog
            .resolve(topic)
            .map_or(0, |t| t.quiz.len().min(mastery_core::model::PRESENTED_QUESTIONS))
    };

    let stdin = std::io::stdin();
    for question in 0..presented {
        print!("Answer for Q{} (option number, blank to skip): ", question + 1);
        std::io::stdout().flush()?;
        let mut line = String::new();
        stdin.read_line(&mut line)?;
        if let Ok(option) = line.trim().parse::<usize>() {
            system
                .handle_action(UserAction::SelectAnswer { question, option })
                .await;
        }
    }

    system.handle_action(UserAction::SubmitQuiz).await;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
