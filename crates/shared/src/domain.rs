use serde::{Deserialize, Serialize};

/// Number of whitespace-separated tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self(text.trim().to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered, immutable paragraphs of a loaded article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Splits `raw` on blank lines (a line holding only whitespace counts as
    /// blank). Runs of blank lines collapse; paragraphs are trimmed and empty
    /// ones dropped.
    pub fn parse(raw: &str) -> Self {
        let mut paragraphs = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for line in raw.split('\n') {
            if line.trim().is_empty() {
                flush_paragraph(&mut pending, &mut paragraphs);
            } else {
                pending.push(line);
            }
        }
        flush_paragraph(&mut pending, &mut paragraphs);

        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn full_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn flush_paragraph(pending: &mut Vec<&str>, paragraphs: &mut Vec<Paragraph>) {
    if pending.is_empty() {
        return;
    }
    let paragraph = Paragraph::new(pending.join("\n"));
    pending.clear();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
