use std::collections::BTreeSet;

use quest_core::model::{EntryKind, Lesson, LessonId, Transcript, TranscriptEntry};

pub(crate) const WELCOME: &str = "Welcome to Terminal Quest! Your adventure begins now.";

/// Snapshot of a learner's progress through the active lesson.
///
/// Only `ProgressionEngine` mutates this; the view renders from clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    pub(crate) lesson_id: LessonId,
    pub(crate) task_index: usize,
    pub(crate) completed: BTreeSet<usize>,
    pub(crate) is_complete: bool,
    pub(crate) transcript: Transcript,
}

impl ProgressionState {
    /// State shown when the widget first opens.
    pub(crate) fn welcome(lesson: &Lesson) -> Self {
        Self::fresh(lesson, Transcript::with_entries([TranscriptEntry::system(WELCOME)]))
    }

    /// State after explicitly selecting `lesson`.
    pub(crate) fn starting(lesson: &Lesson) -> Self {
        let transcript = Transcript::with_entries([
            TranscriptEntry::system(format!("Starting lesson: {}", lesson.title())),
            TranscriptEntry::new(
                EntryKind::Next,
                format!("Try: {}", lesson.first_task().command()),
            ),
        ]);
        Self::fresh(lesson, transcript)
    }

    fn fresh(lesson: &Lesson, transcript: Transcript) -> Self {
        Self {
            lesson_id: lesson.id().clone(),
            task_index: 0,
            completed: BTreeSet::new(),
            is_complete: false,
            transcript,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    #[must_use]
    pub fn task_index(&self) -> usize {
        self.task_index
    }

    #[must_use]
    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
