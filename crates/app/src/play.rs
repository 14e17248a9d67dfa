//! Line-oriented session on stdin/stdout, driven by the same engine as the desktop view.

use std::io::{self, BufRead, Write};

use quest_core::model::{EntryKind, TranscriptEntry};
use services::{CommandOutcome, ProgressionEngine};

const PROMPT: &str = "user@quest:~$ ";

/// Session-level commands. Task matching is checked first, so a lesson may
/// still expect a command that starts with `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetaCommand {
    Quit,
    Lessons,
    Lesson(String),
    Next,
    Hint,
}

impl MetaCommand {
    fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(':')?;
        let mut parts = rest.split_whitespace();
        match (parts.next()?, parts.next()) {
            ("q" | "quit", None) => Some(Self::Quit),
            ("lessons", None) => Some(Self::Lessons),
            ("lesson", Some(id)) => Some(Self::Lesson(id.to_string())),
            ("next", None) => Some(Self::Next),
            ("hint", None) => Some(Self::Hint),
            _ => None,
        }
    }
}

fn format_entry(entry: &TranscriptEntry) -> Option<String> {
    let text = entry.text();
    let line = match entry.kind() {
        // Already visible on the input line.
        EntryKind::Input => return None,
        EntryKind::System => format!("# {}", text.trim_start_matches('\n')),
        EntryKind::Output => text.to_string(),
        EntryKind::Success => format!("✔ {text}"),
        EntryKind::Next => format!("→ {text}"),
        EntryKind::Celebration => text.to_string(),
        EntryKind::Error => format!("✘ {text}"),
        EntryKind::Hint => format!("? {text}"),
    };
    Some(line)
}

fn write_entries<'a, W: Write>(
    out: &mut W,
    entries: impl IntoIterator<Item = &'a TranscriptEntry>,
) -> io::Result<()> {
    for line in entries.into_iter().filter_map(format_entry) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_lesson_intro<W: Write>(out: &mut W, engine: &ProgressionEngine) -> io::Result<()> {
    let lesson = engine.active_lesson();
    writeln!(out)?;
    writeln!(out, "== {} ==", lesson.title())?;
    writeln!(out, "{}", lesson.content())?;
    writeln!(out)
}

fn write_progress<W: Write>(out: &mut W, engine: &ProgressionEngine) -> io::Result<()> {
    writeln!(out, "[progress {}%]", engine.progress_percent().round())
}

/// Run until `:quit` or end of input.
///
/// # Errors
///
/// Returns any I/O error from `input` or `out`.
pub fn run_play<R: BufRead, W: Write>(
    engine: &mut ProgressionEngine,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "Terminal Quest. Commands: :lessons, :lesson <id>, :next, :hint, :quit"
    )?;
    write_lesson_intro(out, engine)?;
    write_entries(out, engine.state().transcript())?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        let meta = if engine.current_task().matches(&line) {
            None
        } else {
            MetaCommand::parse(&line)
        };

        match meta {
            Some(MetaCommand::Quit) => break,
            Some(MetaCommand::Lessons) => {
                for lesson in engine.catalog().iter() {
                    let marker = if lesson.id() == engine.active_lesson().id() {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(out, "{marker} {:<12} {}", lesson.id().as_str(), lesson.title())?;
                }
            }
            Some(MetaCommand::Lesson(id)) => match engine.select_lesson(&id) {
                Ok(()) => {
                    write_lesson_intro(out, engine)?;
                    write_entries(out, engine.state().transcript())?;
                }
                Err(err) => writeln!(out, "✘ {err}")?,
            },
            Some(MetaCommand::Next) => match engine.select_next_lesson() {
                Ok(Some(_)) => {
                    write_lesson_intro(out, engine)?;
                    write_entries(out, engine.state().transcript())?;
                }
                Ok(None) => writeln!(out, "# That was the last mission.")?,
                Err(err) => writeln!(out, "✘ {err}")?,
            },
            Some(MetaCommand::Hint) => writeln!(out, "? {}", engine.active_lesson().hint())?,
            None => {
                let before = engine.state().transcript().len();
                let outcome = engine.submit_command(&line);
                match outcome {
                    CommandOutcome::Cleared => write_entries(out, engine.state().transcript())?,
                    _ => write_entries(out, engine.state().transcript().since(before))?,
                }
                if outcome.triggers_pulse() {
                    writeln!(out, "⚡")?;
                    write_progress(out, engine)?;
                }
                if outcome == CommandOutcome::LessonCompleted {
                    let tags = engine.active_lesson().commands().join(", ");
                    writeln!(out, "You've mastered these commands: {tags}")?;
                    if let Some(next) = engine.next_lesson() {
                        writeln!(out, "Type :next to start \"{}\".", next.title())?;
                    }
                }
            }
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
