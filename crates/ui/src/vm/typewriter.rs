use std::time::Duration;

/// Delay between characters of the lesson narrative.
pub const TYPEWRITER_TICK: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Paragraph<'a> {
    Text(&'a str),
    Break,
}

#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// The first `chars` characters of `text`, never splitting a code point.
#[must_use]
pub fn typed_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// One paragraph per line; blank lines become breaks.
#[must_use]
pub fn paragraphs(text: &str) -> Vec<Paragraph<'_>> {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                Paragraph::Break
            } else {
                Paragraph::Text(line)
            }
        })
        .collect()
}
