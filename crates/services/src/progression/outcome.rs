/// What a single `submit_command` call did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The expected command was entered; `next_index` is now current.
    Advanced { next_index: usize },
    /// The last task was completed.
    LessonCompleted,
    /// `clear` replaced the transcript.
    Cleared,
    /// `help` printed usage notes.
    Help,
    /// Anything else. Progress is untouched; an error and a hint were logged.
    Mismatch,
}

impl CommandOutcome {
    /// Whether the view should flash the success pulse.
    #[must_use]
    pub fn triggers_pulse(self) -> bool {
        matches!(self, Self::Advanced { .. } | Self::LessonCompleted)
    }
}
