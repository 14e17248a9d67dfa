use std::sync::Arc;

use quest_core::LessonCatalog;
use quest_core::model::{EntryKind, Lesson, LessonId, Task, TranscriptEntry};
use tracing::{debug, info, warn};

use super::outcome::CommandOutcome;
use super::state::ProgressionState;
use crate::error::ProgressionError;

const CLEAR: &str = "clear";
const HELP: &str = "help";

/// Owns the active lesson and drives the submit/select state transitions.
///
/// Every operation is synchronous; timed effects (the pulse) are left to the caller.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    catalog: Arc<LessonCatalog>,
    lesson: Lesson,
    state: ProgressionState,
}

impl ProgressionEngine {
    /// Open on the first catalog lesson with the welcome banner.
    #[must_use]
    pub fn new(catalog: Arc<LessonCatalog>) -> Self {
        let lesson = catalog.first().clone();
        let state = ProgressionState::welcome(&lesson);
        Self {
            catalog,
            lesson,
            state,
        }
    }

    /// Open on a configured lesson, as if it had been selected.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Lookup` if `lesson_id` is not in the catalog.
    pub fn starting_at(
        catalog: Arc<LessonCatalog>,
        lesson_id: &str,
    ) -> Result<Self, ProgressionError> {
        let mut engine = Self::new(catalog);
        engine.select_lesson(lesson_id)?;
        Ok(engine)
    }

    #[must_use]
    pub fn catalog(&self) -> &LessonCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Owned copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ProgressionState {
        self.state.clone()
    }

    #[must_use]
    pub fn active_lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn current_task(&self) -> &Task {
        &self.lesson.tasks()[self.state.task_index]
    }

    #[must_use]
    pub fn is_lesson_complete(&self) -> bool {
        self.state.is_complete
    }

    #[must_use]
    pub fn is_task_completed(&self, index: usize) -> bool {
        self.state.completed.contains(&index)
    }

    /// Share of the active lesson's tasks completed, in `[0, 100]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        let total = self.lesson.task_count();
        let done = self.state.completed.len().min(total);
        100.0 * done as f64 / total as f64
    }

    /// The lesson after the active one in catalog order.
    #[must_use]
    pub fn next_lesson(&self) -> Option<&Lesson> {
        self.catalog
            .next_after(self.lesson.id().as_str())
            .ok()
            .flatten()
    }

    /// Make `lesson_id` active and reset all progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Lookup` if `lesson_id` is not in the catalog;
    /// the current state is left untouched.
    pub fn select_lesson(&mut self, lesson_id: &str) -> Result<(), ProgressionError> {
        let lesson = match self.catalog.get(lesson_id) {
            Ok(lesson) => lesson.clone(),
            Err(err) => {
                warn!(lesson_id, "select_lesson: unknown lesson");
                return Err(err.into());
            }
        };

        info!(lesson_id = %lesson.id(), tasks = lesson.task_count(), "lesson selected");
        self.state = ProgressionState::starting(&lesson);
        self.lesson = lesson;
        Ok(())
    }

    /// Advance to the lesson after the active one.
    ///
    /// Returns the new lesson id, or `None` when the active lesson is the last.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::Lookup` if the catalog lookup fails.
    pub fn select_next_lesson(&mut self) -> Result<Option<LessonId>, ProgressionError> {
        let Some(next) = self.next_lesson().map(|lesson| lesson.id().clone()) else {
            return Ok(None);
        };
        self.select_lesson(next.as_str())?;
        Ok(Some(next))
    }

    /// Feed one line of learner input through the lesson.
    ///
    /// The task match is checked before the reserved words, so a task whose
    /// command is literally `clear` or `help` is completed rather than run.
    pub fn submit_command(&mut self, raw: &str) -> CommandOutcome {
        let input = strip_line_ending(raw);
        let index = self.state.task_index;
        let task = &self.lesson.tasks()[index];
        let transcript = &mut self.state.transcript;
        transcript.push(EntryKind::Input, input);

        let outcome = if task.matches(input) {
            transcript.push(EntryKind::Output, task.output());
            transcript.push(
                EntryKind::Success,
                format!("Great job! {}", task.explanation()),
            );
            self.state.completed.insert(index);

            if index < self.lesson.last_task_index() {
                let next_index = index + 1;
                self.state.task_index = next_index;
                transcript.push(
                    EntryKind::Next,
                    format!("Next, try: {}", self.lesson.tasks()[next_index].command()),
                );
                CommandOutcome::Advanced { next_index }
            } else {
                self.state.is_complete = true;
                transcript.push(
                    EntryKind::Celebration,
                    format!(
                        "🎉 Mission Complete! You've mastered {}!",
                        self.lesson.title()
                    ),
                );
                CommandOutcome::LessonCompleted
            }
        } else if input == CLEAR {
            transcript.reset_to(TranscriptEntry::system("Terminal cleared."));
            CommandOutcome::Cleared
        } else if input == HELP {
            transcript.push(
                EntryKind::System,
                format!(
                    "\nTry these commands:\n- The current task: {}\n- clear: Clears the terminal\n- help: Shows this help message",
                    task.command()
                ),
            );
            CommandOutcome::Help
        } else {
            transcript.push(
                EntryKind::Error,
                "Command not recognized or not the one we're looking for right now.",
            );
            transcript.push(EntryKind::Hint, format!("Hint: Try {}", task.command()));
            CommandOutcome::Mismatch
        };

        debug!(
            lesson_id = %self.lesson.id(),
            task_index = index,
            ?outcome,
            "command submitted"
        );
        outcome
    }
}

/// Drop a single trailing line ending (`\n` or `\r\n`); nothing else is normalized.
fn strip_line_ending(raw: &str) -> &str {
    match raw.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::model::LessonIcon;
    use quest_core::time::fixed_clock;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(Arc::new(LessonCatalog::builtin(&fixed_clock())))
    }

    fn kinds(entries: &[TranscriptEntry]) -> Vec<EntryKind> {
        entries.iter().map(TranscriptEntry::kind).collect()
    }

    fn single_lesson(commands: &[&str]) -> ProgressionEngine {
        let tasks = commands
            .iter()
            .map(|cmd| Task::new(*cmd, format!("ran {cmd}"), format!("{cmd} done.")))
            .collect();
        let lesson = Lesson::new(
            LessonId::new("custom").unwrap(),
            "Custom",
            LessonIcon::Terminal,
            "",
            "",
            tasks,
            vec![],
        )
        .unwrap();
        ProgressionEngine::new(Arc::new(LessonCatalog::from_lessons(vec![lesson]).unwrap()))
    }

    #[test]
    fn new_engine_opens_first_lesson_with_welcome() {
        let engine = engine();
        let state = engine.state();
        assert_eq!(state.lesson_id().as_str(), "intro");
        assert_eq!(state.task_index(), 0);
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(
            state.transcript().entries()[0].text(),
            "Welcome to Terminal Quest! Your adventure begins now."
        );
    }

    #[test]
    fn select_lesson_resets_every_field() {
        let catalog = Arc::new(LessonCatalog::builtin(&fixed_clock()));
        let ids: Vec<String> = catalog.lesson_ids().map(ToString::to_string).collect();
        let mut engine = ProgressionEngine::new(catalog);
        engine.submit_command("echo \"Hello World\"");

        for id in ids {
            engine.select_lesson(&id).unwrap();
            let state = engine.state();
            assert_eq!(state.lesson_id().as_str(), id);
            assert_eq!(state.task_index(), 0);
            assert!(state.completed().is_empty());
            assert!(!state.is_complete());
            assert_eq!(state.transcript().len(), 2);

            let first = engine.active_lesson().first_task().command().to_string();
            let entries = state.transcript().entries();
            assert_eq!(entries[0].kind(), EntryKind::System);
            assert_eq!(
                entries[0].text(),
                format!("Starting lesson: {}", engine.active_lesson().title())
            );
            assert_eq!(entries[1].kind(), EntryKind::Next);
            assert_eq!(entries[1].text(), format!("Try: {first}"));
        }
    }

    #[test]
    fn select_unknown_lesson_keeps_state() {
        let mut engine = engine();
        engine.submit_command("echo \"Hello World\"");
        let before = engine.snapshot();

        let err = engine.select_lesson("kernel-hacking").unwrap_err();
        assert!(matches!(err, ProgressionError::Lookup(_)));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn match_is_case_insensitive_and_advances() {
        let mut engine = engine();
        engine.select_lesson("intro").unwrap();

        let outcome = engine.submit_command("ECHO \"HELLO WORLD\"");
        assert_eq!(outcome, CommandOutcome::Advanced { next_index: 1 });
        assert!(outcome.triggers_pulse());

        let state = engine.state();
        let added = state.transcript().since(2);
        assert_eq!(
            kinds(added),
            vec![
                EntryKind::Input,
                EntryKind::Output,
                EntryKind::Success,
                EntryKind::Next
            ]
        );
        assert_eq!(added[0].text(), "ECHO \"HELLO WORLD\"");
        assert_eq!(added[1].text(), "Hello World");
        assert_eq!(
            added[2].text(),
            "Great job! The echo command displays text on the screen."
        );
        assert_eq!(added[3].text(), "Next, try: date");
        assert_eq!(state.task_index(), 1);
        assert_eq!(state.completed().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!((engine.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", engine.progress_percent()), "33.33");
    }

    #[test]
    fn wrong_command_logs_error_and_hint_only() {
        let mut engine = engine();
        engine.select_lesson("intro").unwrap();

        let outcome = engine.submit_command("whoami");
        assert_eq!(outcome, CommandOutcome::Mismatch);
        assert!(!outcome.triggers_pulse());

        let state = engine.state();
        let added = state.transcript().since(2);
        assert_eq!(
            kinds(added),
            vec![EntryKind::Input, EntryKind::Error, EntryKind::Hint]
        );
        assert_eq!(
            added[1].text(),
            "Command not recognized or not the one we're looking for right now."
        );
        assert_eq!(added[2].text(), "Hint: Try echo \"Hello World\"");
        assert_eq!(state.task_index(), 0);
        assert!(state.completed().is_empty());
        assert!(!state.is_complete());
    }

    #[test]
    fn whitespace_is_significant() {
        let mut engine = engine();
        assert_eq!(
            engine.submit_command(" echo \"Hello World\""),
            CommandOutcome::Mismatch
        );
        assert_eq!(
            engine.submit_command("echo \"Hello World\" "),
            CommandOutcome::Mismatch
        );
        assert_eq!(engine.state().task_index(), 0);
    }

    #[test]
    fn trailing_newline_is_stripped() {
        let mut engine = engine();
        let outcome = engine.submit_command("echo \"Hello World\"\r\n");
        assert_eq!(outcome, CommandOutcome::Advanced { next_index: 1 });
        assert_eq!(
            engine.state().transcript().entries()[1].text(),
            "echo \"Hello World\""
        );
    }

    #[test]
    fn completing_intro_celebrates() {
        let mut engine = engine();
        engine.select_lesson("intro").unwrap();
        engine.submit_command("echo \"Hello World\"");
        engine.submit_command("Date");
        let outcome = engine.submit_command("whoami");

        assert_eq!(outcome, CommandOutcome::LessonCompleted);
        assert!(outcome.triggers_pulse());
        assert!(engine.is_lesson_complete());
        assert_eq!(engine.state().completed_count(), 3);
        assert!((engine.progress_percent() - 100.0).abs() < f64::EPSILON);

        let last = engine.state().transcript().last().unwrap();
        assert_eq!(last.kind(), EntryKind::Celebration);
        assert!(last.text().contains("Introduction to the Terminal"));
    }

    #[test]
    fn repeat_after_completion_stays_at_one_hundred() {
        let mut engine = engine();
        engine.submit_command("echo \"Hello World\"");
        engine.submit_command("date");
        engine.submit_command("whoami");

        assert_eq!(engine.submit_command("whoami"), CommandOutcome::LessonCompleted);
        assert_eq!(engine.state().completed_count(), 3);
        assert_eq!(engine.state().task_index(), 2);
        assert!((engine.progress_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_resets_transcript_only() {
        let mut engine = engine();
        engine.submit_command("echo \"Hello World\"");
        engine.submit_command("nope");

        assert_eq!(engine.submit_command("clear"), CommandOutcome::Cleared);
        let state = engine.state();
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript().entries()[0].kind(), EntryKind::System);
        assert_eq!(state.transcript().entries()[0].text(), "Terminal cleared.");
        assert_eq!(state.task_index(), 1);
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn reserved_words_are_case_sensitive() {
        let mut engine = engine();
        assert_eq!(engine.submit_command("CLEAR"), CommandOutcome::Mismatch);
        assert_eq!(engine.submit_command("Help"), CommandOutcome::Mismatch);
    }

    #[test]
    fn help_lists_current_command() {
        let mut engine = engine();
        engine.submit_command("echo \"Hello World\"");
        let before = engine.state().transcript().len();

        assert_eq!(engine.submit_command("help"), CommandOutcome::Help);
        let added = engine.state().transcript().since(before);
        assert_eq!(kinds(added), vec![EntryKind::Input, EntryKind::System]);
        assert!(added[1].text().contains("- The current task: date"));
        assert!(added[1].text().contains("- clear: Clears the terminal"));
        assert!(added[1].text().contains("- help: Shows this help message"));
        assert_eq!(engine.state().task_index(), 1);
    }

    #[test]
    fn task_named_like_reserved_word_wins() {
        let mut engine = single_lesson(&["clear", "help"]);

        assert_eq!(
            engine.submit_command("clear"),
            CommandOutcome::Advanced { next_index: 1 }
        );
        assert!(engine.state().transcript().len() > 1);
        assert_eq!(engine.submit_command("HELP"), CommandOutcome::LessonCompleted);
    }

    #[test]
    fn progress_never_decreases() {
        let mut engine = engine();
        engine.select_lesson("navigation").unwrap();
        let inputs = ["pwd", "oops", "ls", "clear", "help", "cd documents", "LS", "x", "cd .."];

        let mut last = engine.progress_percent();
        for input in inputs {
            engine.submit_command(input);
            let now = engine.progress_percent();
            assert!(now >= last, "{input} decreased progress");
            last = now;
        }
        assert!(engine.is_lesson_complete());
        assert!((last - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn select_next_lesson_walks_catalog() {
        let mut engine = engine();
        let next = engine.select_next_lesson().unwrap();
        assert_eq!(next.as_ref().map(LessonId::as_str), Some("navigation"));

        engine.select_lesson("pipes").unwrap();
        assert!(engine.next_lesson().is_none());
        assert_eq!(engine.select_next_lesson().unwrap(), None);
        assert_eq!(engine.state().lesson_id().as_str(), "pipes");
    }

    #[test]
    fn starting_at_uses_reset_transcript() {
        let catalog = Arc::new(LessonCatalog::builtin(&fixed_clock()));
        let engine = ProgressionEngine::starting_at(catalog.clone(), "files").unwrap();
        assert_eq!(engine.active_lesson().title(), "Working with Files");
        assert_eq!(engine.state().transcript().len(), 2);
        assert_eq!(engine.current_task().command(), "touch myfile.txt");

        assert!(ProgressionEngine::starting_at(catalog, "missing").is_err());
    }

    #[test]
    fn strip_line_ending_only_touches_one_newline() {
        assert_eq!(strip_line_ending("ls\n"), "ls");
        assert_eq!(strip_line_ending("ls\r\n"), "ls");
        assert_eq!(strip_line_ending("ls\n\n"), "ls\n");
        assert_eq!(strip_line_ending(" ls "), " ls ");
    }
}
