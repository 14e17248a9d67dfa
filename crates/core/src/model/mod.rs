mod ids;
mod lesson;
mod transcript;

pub use ids::{LessonId, LessonIdError};
pub use lesson::{Lesson, LessonDraft, LessonError, LessonIcon, Task};
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
