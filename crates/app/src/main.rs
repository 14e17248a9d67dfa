mod play;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quest_core::model::LessonId;
use quest_core::{Clock, LessonCatalog};
use services::ProgressionEngine;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLessonId { raw: String },
    InvalidLessonsPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid --lesson value: {raw}"),
            ArgsError::InvalidLessonsPath { raw } => write!(f, "invalid --lessons value: {raw:?}"),
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

struct DesktopApp {
    catalog: Arc<LessonCatalog>,
    initial_lesson: Option<LessonId>,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    fn initial_lesson(&self) -> Option<LessonId> {
        self.initial_lesson.clone()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    lesson: Option<LessonId>,
    lessons_file: Option<PathBuf>,
    log_filter: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--lesson <id>] [--lessons <file.json>] [--log <filter>]");
    eprintln!("  cargo run -p app -- play [--lesson <id>] [--lessons <file.json>] [--log <filter>]");
    eprintln!("  cargo run -p app -- list [--lessons <file.json>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  built-in lessons, starting on the first one; --log {DEFAULT_LOG_FILTER}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUEST_LESSON, QUEST_LESSONS_FILE, QUEST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Play,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

fn parse_lesson_id(raw: String) -> Result<LessonId, ArgsError> {
    LessonId::new(raw.as_str()).map_err(|_| ArgsError::InvalidLessonId { raw })
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        Self::with_env(
            std::env::var("QUEST_LESSON").ok(),
            std::env::var("QUEST_LESSONS_FILE").ok(),
            std::env::var("QUEST_LOG").ok(),
        )
    }

    fn with_env(
        lesson: Option<String>,
        lessons_file: Option<String>,
        log_filter: Option<String>,
    ) -> Result<Self, ArgsError> {
        Ok(Self {
            lesson: lesson
                .filter(|value| !value.trim().is_empty())
                .map(parse_lesson_id)
                .transpose()?,
            lessons_file: lessons_file
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    fn parse(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--lesson" => {
                    let value = require_value(args, "--lesson")?;
                    self.lesson = Some(parse_lesson_id(value)?);
                }
                "--lessons" => {
                    let value = require_value(args, "--lessons")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidLessonsPath { raw: value });
                    }
                    self.lessons_file = Some(PathBuf::from(value));
                }
                "--log" => {
                    self.log_filter = require_value(args, "--log")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(self)
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // Logs go to stderr so `play` keeps stdout for the session.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_catalog(path: Option<&PathBuf>) -> Result<LessonCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(LessonCatalog::builtin(&Clock::default_clock()));
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read lessons file {}: {err}", path.display()))?;
    let catalog = LessonCatalog::from_json(&raw).map_err(quest_core::Error::from)?;
    tracing::info!(path = %path.display(), lessons = catalog.len(), "loaded lesson pack");
    Ok(catalog)
}

fn start_engine(
    catalog: Arc<LessonCatalog>,
    lesson: Option<&LessonId>,
) -> Result<ProgressionEngine, Box<dyn std::error::Error>> {
    match lesson {
        Some(id) => Ok(ProgressionEngine::starting_at(catalog, id.as_str())?),
        None => Ok(ProgressionEngine::new(catalog)),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::from_env()
        .and_then(|args| args.parse(&mut iter))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    init_tracing(&parsed.log_filter);
    let catalog = Arc::new(load_catalog(parsed.lessons_file.as_ref())?);

    match cmd {
        Command::List => {
            for lesson in catalog.iter() {
                println!(
                    "{:<12} {} ({} tasks)",
                    lesson.id().as_str(),
                    lesson.title(),
                    lesson.task_count()
                );
            }
            Ok(())
        }
        Command::Play => {
            let mut engine = start_engine(catalog, parsed.lesson.as_ref())?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            play::run_play(&mut engine, stdin.lock(), &mut stdout)?;
            Ok(())
        }
        Command::Ui => {
            // Fail before opening a window when the configured lesson is unknown.
            if let Some(id) = parsed.lesson.as_ref() {
                catalog.get(id.as_str())?;
            }

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                catalog,
                initial_lesson: parsed.lesson,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Terminal Quest")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
