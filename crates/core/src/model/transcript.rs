use serde::{Deserialize, Serialize};

/// Category of a transcript line; drives styling in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    System,
    /// Echo of what the learner typed.
    Input,
    Output,
    Success,
    /// "Try: ..." / "Next, try: ..." prompts.
    Next,
    Celebration,
    Error,
    Hint,
}

/// One line (possibly multi-line text) in the simulated terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    kind: EntryKind,
    text: String,
}

impl TranscriptEntry {
    #[must_use]
    pub fn new(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(EntryKind::System, text)
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered, append-only log of terminal entries.
///
/// Entries are never edited; the log only grows or is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = TranscriptEntry>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn push(&mut self, kind: EntryKind, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(kind, text));
    }

    /// Drop every entry and start over from `entry`.
    pub fn reset_to(&mut self, entry: TranscriptEntry) {
        self.entries = vec![entry];
    }

    #[must_use]
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended after the first `from` entries.
    #[must_use]
    pub fn since(&self, from: usize) -> &[TranscriptEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
