//! Output of one layout pass.

use serde::{Deserialize, Serialize};

/// Terminal line of a truncated layout: the kept text and the marker that
/// replaces the cut content, kept apart so a renderer can style them
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncatedLine {
    kept: String,
    ellipsis: String,
}

impl TruncatedLine {
    pub fn new(kept: impl Into<String>, ellipsis: impl Into<String>) -> Self {
        Self {
            kept: kept.into(),
            ellipsis: ellipsis.into(),
        }
    }

    pub fn kept(&self) -> &str {
        &self.kept
    }

    pub fn ellipsis(&self) -> &str {
        &self.ellipsis
    }
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    Plain { text: String },
    /// Empty line produced by two adjacent forced breaks.
    ForcedBlank,
    Truncated(TruncatedLine),
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Line::Plain { text: text.into() }
    }

    pub fn truncated(kept: impl Into<String>, ellipsis: impl Into<String>) -> Self {
        Line::Truncated(TruncatedLine::new(kept, ellipsis))
    }

    /// Rendered text with the ellipsis appended for a truncated line.
    pub fn text(&self) -> String {
        match self {
            Line::Plain { text } => text.clone(),
            Line::ForcedBlank => String::new(),
            Line::Truncated(line) => format!("{}{}", line.kept, line.ellipsis),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Line::ForcedBlank)
    }
}

/// Ordered lines plus whether any content was cut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub lines: Vec<Line>,
    pub truncated: bool,
}

impl LayoutResult {
    pub fn complete(lines: Vec<Line>) -> Self {
        Self {
            lines,
            truncated: false,
        }
    }

    pub fn cut(lines: Vec<Line>) -> Self {
        Self {
            lines,
            truncated: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The terminal truncated line, if content was cut.
    pub fn truncated_line(&self) -> Option<&TruncatedLine> {
        match self.lines.last() {
            Some(Line::Truncated(line)) => Some(line),
            _ => None,
        }
    }

    /// Lines that count against the line budget.
    pub fn content_line_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.is_blank()).count()
    }

    /// Rendered lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
