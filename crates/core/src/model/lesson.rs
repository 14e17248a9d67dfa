use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LessonId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson must contain at least one task")]
    NoTasks,

    #[error("task {index} has an empty command")]
    EmptyCommand { index: usize },
}

//
// ─── TASK ──────────────────────────────────────────────────────────────────────
//

/// A single expected-command step of a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    command: String,
    output: String,
    explanation: String,
}

impl Task {
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        output: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
            explanation: explanation.into(),
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Case-insensitive, otherwise exact comparison against the expected command.
    ///
    /// Whitespace is significant: no trimming, no tokenization.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        input.to_lowercase() == self.command.to_lowercase()
    }
}

//
// ─── ICON ──────────────────────────────────────────────────────────────────────
//

/// Icon reference rendered next to a lesson title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonIcon {
    Rocket,
    HardDrive,
    FileText,
    Lock,
    Command,
    #[default]
    Terminal,
}

impl LessonIcon {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rocket => "rocket",
            Self::HardDrive => "hard-drive",
            Self::FileText => "file-text",
            Self::Lock => "lock",
            Self::Command => "command",
            Self::Terminal => "terminal",
        }
    }
}

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// A titled unit of instructional content with an ordered list of tasks.
///
/// Lessons are immutable once built; the task list is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    icon: LessonIcon,
    content: String,
    hint: String,
    tasks: Vec<Task>,
    commands: Vec<String>,
}

impl Lesson {
    /// Build a validated lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyTitle` if the title is blank.
    /// Returns `LessonError::NoTasks` if `tasks` is empty.
    /// Returns `LessonError::EmptyCommand` if any task has a blank command.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        icon: LessonIcon,
        content: impl Into<String>,
        hint: impl Into<String>,
        tasks: Vec<Task>,
        commands: Vec<String>,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if tasks.is_empty() {
            return Err(LessonError::NoTasks);
        }
        if let Some(index) = tasks.iter().position(|task| task.command.trim().is_empty()) {
            return Err(LessonError::EmptyCommand { index });
        }

        Ok(Self {
            id,
            title: title.trim().to_string(),
            icon,
            content: content.into(),
            hint: hint.into(),
            tasks,
            commands,
        })
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn icon(&self) -> LessonIcon {
        self.icon
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    #[must_use]
    pub fn first_task(&self) -> &Task {
        // Non-empty by construction.
        &self.tasks[0]
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn last_task_index(&self) -> usize {
        self.tasks.len() - 1
    }

    /// Command tags shown once the lesson is mastered.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated lesson as it appears in a JSON lesson pack.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonDraft {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub icon: LessonIcon,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub hint: String,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl LessonDraft {
    /// # Errors
    ///
    /// Returns `LessonError` for the same conditions as [`Lesson::new`].
    pub fn validate(self) -> Result<Lesson, LessonError> {
        Lesson::new(
            self.id,
            self.title,
            self.icon,
            self.content,
            self.hint,
            self.tasks,
            self.commands,
        )
    }
}
