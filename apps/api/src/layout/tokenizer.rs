//! Splits raw content into paragraphs of break units.
//!
//! A paragraph is the run of text between two forced breaks. `\n`, `\r\n` and
//! a lone `\r` are all forced breaks. Consecutive breaks are not collapsed:
//! each produces its own empty paragraph so blank lines survive layout.

use serde::{Deserialize, Serialize};

/// Granularity at which a paragraph may wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakMode {
    /// Wrap between space-separated words.
    #[default]
    Words,
    /// Wrap between any two characters.
    All,
}

impl BreakMode {
    pub fn from_break_all(break_all: bool) -> Self {
        if break_all {
            BreakMode::All
        } else {
            BreakMode::Words
        }
    }

    /// String placed between units when they are joined back into text.
    pub fn separator(self) -> &'static str {
        match self {
            BreakMode::Words => " ",
            BreakMode::All => "",
        }
    }
}

/// Units of one paragraph, borrowed from the content.
///
/// In word mode the content is split on single spaces, so a run of spaces
/// shows up as empty units and `join` reproduces the original text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    units: Vec<&'a str>,
    mode: BreakMode,
}

impl<'a> Paragraph<'a> {
    fn parse(text: &'a str, mode: BreakMode) -> Self {
        let units = if text.is_empty() {
            Vec::new()
        } else {
            match mode {
                BreakMode::Words => text.split(' ').collect(),
                BreakMode::All => text
                    .char_indices()
                    .map(|(i, c)| &text[i..i + c.len_utf8()])
                    .collect(),
            }
        };
        Self { units, mode }
    }

    pub fn units(&self) -> &[&'a str] {
        &self.units
    }

    pub fn mode(&self) -> BreakMode {
        self.mode
    }

    /// True for the empty paragraph between two adjacent forced breaks.
    pub fn is_blank(&self) -> bool {
        self.units.is_empty()
    }

    pub fn text(&self) -> String {
        join_units(&self.units, self.mode)
    }
}

/// Rebuilds text from a run of units.
pub fn join_units(units: &[&str], mode: BreakMode) -> String {
    units.join(mode.separator())
}

/// Splits `content` on forced breaks and each paragraph into units.
///
/// Empty content yields no paragraphs.
pub fn tokenize(content: &str, mode: BreakMode) -> Vec<Paragraph<'_>> {
    if content.is_empty() {
        return Vec::new();
    }
    content
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
        .map(|text| Paragraph::parse(text, mode))
        .collect()
}
