//! Truncation engine: lays content out over a line budget.
//!
//! # Per-line rules
//! 1. A blank paragraph (two adjacent forced breaks) emits a blank line and
//!    does not consume the budget.
//! 2. If the rest of the final paragraph fits on one line it is emitted as is
//!    and the pass ends untruncated. Blank paragraphs after it still emit
//!    their blank lines; a single trailing forced break emits nothing.
//! 3. On the last budgeted line, the remaining paragraph is cut at the
//!    character level so that the kept prefix plus ellipsis fits.
//! 4. Otherwise the longest fitting run of units is emitted and the rest of
//!    the paragraph carries over to the next line.
//!
//! A unit too wide for an empty line cannot be wrapped; that line becomes the
//! terminal line (rule 3) and ends the pass.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::errors::LayoutError;
use crate::layout::line_fitter::{fit_chars, fit_units};
use crate::layout::measure::{TargetWidth, TextMeasurer};
use crate::layout::result::{LayoutResult, Line};
use crate::layout::tokenizer::{join_units, tokenize, BreakMode, Paragraph};

pub const DEFAULT_ELLIPSIS: &str = "…";

/// Line budget. `Limited` values of 0 or below disable truncation just like
/// `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MaxLinesRepr", into = "MaxLinesRepr")]
pub enum MaxLines {
    Limited(i64),
    Unlimited,
}

impl MaxLines {
    /// The effective budget, or `None` when truncation is bypassed.
    pub fn limit(self) -> Option<usize> {
        match self {
            MaxLines::Limited(n) if n > 0 => usize::try_from(n).ok(),
            _ => None,
        }
    }
}

impl Default for MaxLines {
    fn default() -> Self {
        MaxLines::Limited(1)
    }
}

/// Wire form: a plain integer or the string `"unlimited"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum MaxLinesRepr {
    Count(i64),
    Keyword(String),
}

impl TryFrom<MaxLinesRepr> for MaxLines {
    type Error = String;

    fn try_from(repr: MaxLinesRepr) -> Result<Self, Self::Error> {
        match repr {
            MaxLinesRepr::Count(n) => Ok(MaxLines::Limited(n)),
            MaxLinesRepr::Keyword(k) if k.eq_ignore_ascii_case("unlimited") => {
                Ok(MaxLines::Unlimited)
            }
            MaxLinesRepr::Keyword(k) => Err(format!(
                "lines must be an integer or \"unlimited\", got {k:?}"
            )),
        }
    }
}

impl From<MaxLines> for MaxLinesRepr {
    fn from(max_lines: MaxLines) -> Self {
        match max_lines {
            MaxLines::Limited(n) => MaxLinesRepr::Count(n),
            MaxLines::Unlimited => MaxLinesRepr::Keyword("unlimited".to_string()),
        }
    }
}

/// Layout options owned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateOptions {
    pub max_lines: MaxLines,
    /// Strip trailing whitespace before the ellipsis, walking back over
    /// previous lines when the terminal line would be left empty.
    pub trim_whitespace: bool,
    /// Break between any two characters instead of between words.
    pub break_all: bool,
    /// Marker text emitted after the kept prefix. Its width comes from
    /// `TextMeasurer::ellipsis_width`.
    pub ellipsis: String,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            max_lines: MaxLines::default(),
            trim_whitespace: false,
            break_all: false,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

/// Lays `content` out within `width`, clipping to `options.max_lines`.
///
/// Pure: identical inputs always produce an identical result. Measurement
/// failures abort the pass.
pub fn truncate(
    content: &str,
    width: TargetWidth,
    options: &TruncateOptions,
    measurer: &dyn TextMeasurer,
) -> Result<LayoutResult, LayoutError> {
    if content.is_empty() {
        return Ok(LayoutResult::default());
    }
    let Some(max_lines) = options.max_lines.limit() else {
        return Ok(LayoutResult::complete(vec![Line::plain(content)]));
    };

    if let Some(measured) = measurer.ellipsis() {
        if measured != options.ellipsis {
            return Err(LayoutError::EllipsisMismatch {
                measured: measured.to_string(),
                configured: options.ellipsis.clone(),
            });
        }
    }

    let mode = BreakMode::from_break_all(options.break_all);
    let mut paragraphs = tokenize(content, mode);
    // A final forced break closes the last line; it opens no new one.
    if paragraphs.len() > 1 && paragraphs.last().is_some_and(Paragraph::is_blank) {
        paragraphs.pop();
    }

    let pass = LayoutPass {
        width,
        mode,
        options,
        measurer,
        lines: Vec::new(),
    };
    pass.run(&paragraphs, max_lines)
}

/// Mutable state of a single pass. Dropped when the pass returns.
struct LayoutPass<'o, 'm> {
    width: TargetWidth,
    mode: BreakMode,
    options: &'o TruncateOptions,
    measurer: &'m dyn TextMeasurer,
    lines: Vec<Line>,
}

impl LayoutPass<'_, '_> {
    fn run(
        mut self,
        paragraphs: &[Paragraph<'_>],
        max_lines: usize,
    ) -> Result<LayoutResult, LayoutError> {
        let mut index = 0;
        let mut units: &[&str] = match paragraphs.first() {
            Some(paragraph) => paragraph.units(),
            None => return Ok(LayoutResult::default()),
        };
        let mut line = 1;
        // Paragraphs after this one are blank and cost no budget.
        let last_content = paragraphs.iter().rposition(|p| !p.is_blank());

        while line <= max_lines {
            let is_last = last_content.map_or(true, |last| index >= last);

            if units.is_empty() {
                self.lines.push(Line::ForcedBlank);
                if is_last {
                    return Ok(self.finish_complete(paragraphs, index));
                }
                index += 1;
                units = paragraphs[index].units();
                continue;
            }

            if is_last {
                let remainder = join_units(units, self.mode);
                if self.measurer.measure(&remainder)? <= self.width.get() {
                    self.lines.push(Line::plain(remainder));
                    return Ok(self.finish_complete(paragraphs, index));
                }
            }

            if line == max_lines {
                return self.finish_truncated(units);
            }

            let fitted = fit_units(units, self.mode, self.width, self.measurer)?;
            if fitted == 0 {
                trace!(unit = units[0], "unit wider than line, truncating here");
                return self.finish_truncated(units);
            }

            let fitted_text = join_units(&units[..fitted], self.mode);
            self.lines.push(Line::plain(fitted_text));
            units = &units[fitted..];

            if units.is_empty() {
                if is_last {
                    return Ok(self.finish_complete(paragraphs, index));
                }
                index += 1;
                units = paragraphs[index].units();
            }
            line += 1;
        }

        Ok(LayoutResult::complete(self.lines))
    }

    /// Closes the pass untruncated once `paragraphs[index]` is consumed.
    /// Anything after it is blank and becomes blank lines.
    fn finish_complete(mut self, paragraphs: &[Paragraph<'_>], index: usize) -> LayoutResult {
        let trailing = paragraphs.len().saturating_sub(index + 1);
        self.lines.extend(std::iter::repeat(Line::ForcedBlank).take(trailing));
        LayoutResult::complete(self.lines)
    }

    /// Emits the terminal line from the remaining units of the current
    /// paragraph and closes the pass as truncated.
    fn finish_truncated(mut self, units: &[&str]) -> Result<LayoutResult, LayoutError> {
        let ellipsis_width = self.measurer.ellipsis_width()?;
        let remainder = join_units(units, self.mode);
        let mut kept = self.fit_terminal(&remainder, ellipsis_width)?;

        if self.options.trim_whitespace {
            // Walk back over lines that are whitespace only once trimmed.
            while kept.is_empty() {
                match self.lines.pop() {
                    Some(Line::Plain { text }) => {
                        trace!(line = %text, "terminal line empty after trim, moving ellipsis up");
                        kept = self.fit_terminal(text.trim_end(), ellipsis_width)?;
                    }
                    Some(_) => continue,
                    None => break,
                }
            }
        }

        let ellipsis = self.options.ellipsis.clone();
        self.lines.push(Line::truncated(kept, ellipsis));
        Ok(LayoutResult::cut(self.lines))
    }

    fn fit_terminal(&self, text: &str, ellipsis_width: f32) -> Result<String, LayoutError> {
        let fitted = fit_chars(text, self.width, ellipsis_width, self.measurer)?;
        Ok(if self.options.trim_whitespace {
            fitted.trim_end().to_string()
        } else {
            fitted.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::FnMeasurer;

    /// One width unit per character; "…" is one unit wide.
    fn mono() -> FnMeasurer<impl Fn(&str) -> Result<f32, LayoutError>> {
        FnMeasurer::new(DEFAULT_ELLIPSIS, |s: &str| Ok(s.chars().count() as f32))
    }

    fn width(w: f32) -> TargetWidth {
        TargetWidth::new(w).unwrap()
    }

    fn options(max_lines: i64) -> TruncateOptions {
        TruncateOptions {
            max_lines: MaxLines::Limited(max_lines),
            ..TruncateOptions::default()
        }
    }

    fn run(content: &str, w: f32, opts: &TruncateOptions) -> LayoutResult {
        truncate(content, width(w), opts, &mono()).unwrap()
    }

    const SAMPLE: &str = "This text should stop after here and not contain the next lines";

    // ── Scenarios ───────────────────────────────────────────────────────────

    #[test]
    fn test_truncates_after_two_lines() {
        // "This text should" is exactly 16 units wide.
        let result = run(SAMPLE, 16.0, &options(2));
        assert_eq!(
            result.lines,
            vec![
                Line::plain("This text should"),
                Line::truncated("stop after here", "…"),
            ]
        );
        assert!(result.truncated);
        assert_eq!(result.text(), "This text should\nstop after here…");
    }

    #[test]
    fn test_short_text_fits_without_trailing_lines() {
        let result = run("Some short text over here", 15.0, &options(4));
        assert_eq!(
            result.lines,
            vec![Line::plain("Some short text"), Line::plain("over here")]
        );
        assert!(!result.truncated);
    }

    #[test]
    fn test_unlimited_returns_content_verbatim() {
        let content = "line one\r\nline two   with  spaces";
        let opts = TruncateOptions {
            max_lines: MaxLines::Unlimited,
            ..TruncateOptions::default()
        };
        let result = run(content, 3.0, &opts);
        assert_eq!(result.text(), content);
        assert!(!result.truncated);
    }

    #[test]
    fn test_non_positive_budget_bypasses() {
        for n in [0, -3] {
            let result = run(SAMPLE, 10.0, &options(n));
            assert_eq!(result.lines, vec![Line::plain(SAMPLE)]);
            assert!(!result.truncated);
        }
    }

    #[test]
    fn test_forced_breaks_keep_blank_line() {
        let result = run("This text\ncontains\n\nnewlines", 20.0, &options(4));
        assert_eq!(
            result.lines,
            vec![
                Line::plain("This text"),
                Line::plain("contains"),
                Line::ForcedBlank,
                Line::plain("newlines"),
            ]
        );
        assert!(!result.truncated);
    }

    #[test]
    fn test_blank_line_does_not_consume_budget() {
        let result = run("This text\ncontains\n\nnewlines", 20.0, &options(3));
        assert_eq!(result.lines.len(), 4);
        assert_eq!(result.content_line_count(), 3);
        assert!(!result.truncated);
    }

    #[test]
    fn test_trim_cascades_to_previous_line() {
        let content = format!("a{}{}", " ".repeat(20), "b".repeat(20));
        let opts = TruncateOptions {
            trim_whitespace: true,
            ..options(2)
        };
        let result = run(&content, 10.0, &opts);
        assert_eq!(result.lines, vec![Line::truncated("a", "…")]);
        assert!(result.truncated);
    }

    #[test]
    fn test_without_trim_whitespace_is_kept() {
        let content = format!("a{}{}", " ".repeat(20), "b".repeat(20));
        let result = run(&content, 10.0, &options(2));
        assert_eq!(
            result.lines,
            vec![
                Line::plain(format!("a{}", " ".repeat(9))),
                Line::truncated(" ".repeat(9), "…"),
            ]
        );
    }

    #[test]
    fn test_trim_cascades_over_several_lines() {
        let content = format!("ab{}cd", " ".repeat(27));
        let opts = TruncateOptions {
            trim_whitespace: true,
            break_all: true,
            ..options(3)
        };
        let result = run(&content, 10.0, &opts);
        assert_eq!(result.lines, vec![Line::truncated("ab", "…")]);
    }

    #[test]
    fn test_trim_cascade_can_exhaust_all_lines() {
        let content = format!("{}x", " ".repeat(20));
        let opts = TruncateOptions {
            trim_whitespace: true,
            break_all: true,
            ..options(1)
        };
        let result = run(&content, 10.0, &opts);
        assert_eq!(result.lines, vec![Line::truncated("", "…")]);
        assert!(result.truncated);
    }

    #[test]
    fn test_trim_skips_blank_lines_when_cascading() {
        let content = format!("abc\n\n{}zzzz", " ".repeat(12));
        let opts = TruncateOptions {
            trim_whitespace: true,
            ..options(2)
        };
        let result = run(&content, 10.0, &opts);
        assert_eq!(result.lines, vec![Line::truncated("abc", "…")]);
    }

    // ── Oversized units ─────────────────────────────────────────────────────

    #[test]
    fn test_oversized_first_word_is_cut_by_characters() {
        let result = run("supercalifragilistic expialidocious", 10.0, &options(3));
        assert_eq!(result.lines, vec![Line::truncated("supercali", "…")]);
        assert!(result.truncated);
    }

    #[test]
    fn test_oversized_word_after_fitted_line_ends_the_pass() {
        let result = run("ok supercalifragilistic", 10.0, &options(3));
        assert_eq!(
            result.lines,
            vec![Line::plain("ok"), Line::truncated("supercali", "…")]
        );
    }

    // ── Edge cases ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_content_is_empty_result() {
        let result = run("", 10.0, &options(2));
        assert!(result.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_more_paragraphs_on_last_line_truncate() {
        let result = run("a\nb", 10.0, &options(1));
        assert_eq!(result.lines, vec![Line::truncated("a", "…")]);
        assert!(result.truncated);
    }

    #[test]
    fn test_trailing_break_emits_nothing_extra() {
        let result = run("abc\n", 10.0, &options(3));
        assert_eq!(result.lines, vec![Line::plain("abc")]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_trailing_break_on_last_budgeted_line_fits() {
        let result = run("abc\n", 10.0, &options(1));
        assert_eq!(result.lines, vec![Line::plain("abc")]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_trailing_break_after_wrapped_paragraph_fits() {
        let result = run("a b\nc\n", 10.0, &options(2));
        assert_eq!(result.lines, vec![Line::plain("a b"), Line::plain("c")]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_trailing_blank_lines_do_not_consume_budget() {
        let result = run("abc\n\n", 10.0, &options(1));
        assert_eq!(result.lines, vec![Line::plain("abc"), Line::ForcedBlank]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_only_breaks_are_blank_lines() {
        let result = run("\n\n", 10.0, &options(1));
        assert_eq!(result.lines, vec![Line::ForcedBlank, Line::ForcedBlank]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_break_all_wraps_mid_word() {
        let opts = TruncateOptions {
            break_all: true,
            ..options(2)
        };
        let result = run("abcdefghijklmnop", 6.0, &opts);
        assert_eq!(
            result.lines,
            vec![Line::plain("abcdef"), Line::truncated("ghijk", "…")]
        );
    }

    #[test]
    fn test_custom_ellipsis_text_is_emitted() {
        let opts = TruncateOptions {
            ellipsis: " [more]".to_string(),
            ..options(1)
        };
        let measurer = FnMeasurer::new(" [more]", |s: &str| Ok(s.chars().count() as f32));
        let result = truncate(SAMPLE, width(16.0), &opts, &measurer).unwrap();
        let line = result.truncated_line().unwrap();
        assert_eq!(line.kept(), "This text");
        assert_eq!(line.ellipsis(), " [more]");
    }

    #[test]
    fn test_ellipsis_failure_propagates() {
        let measurer = FnMeasurer::new("…", |s: &str| {
            if s == "…" {
                Err(LayoutError::Measurement {
                    text: s.to_string(),
                    reason: "font not loaded".to_string(),
                })
            } else {
                Ok(s.chars().count() as f32)
            }
        });
        let err = truncate(SAMPLE, width(16.0), &options(1), &measurer).unwrap_err();
        assert!(matches!(err, LayoutError::EllipsisMeasurement(_)));
    }

    #[test]
    fn test_mismatched_ellipsis_is_rejected() {
        let opts = TruncateOptions {
            ellipsis: " [more]".to_string(),
            ..options(1)
        };
        let err = truncate(SAMPLE, width(16.0), &opts, &mono()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::EllipsisMismatch {
                measured: "…".to_string(),
                configured: " [more]".to_string(),
            }
        );
    }

    // ── Properties ──────────────────────────────────────────────────────────

    const PROSE: &str = "The quick brown fox\njumps over the lazy dog\n\n\
                         while an extraordinarily long word sits here";

    #[test]
    fn test_identical_inputs_identical_results() {
        let opts = options(3);
        assert_eq!(run(PROSE, 12.0, &opts), run(PROSE, 12.0, &opts));
    }

    #[test]
    fn test_truncation_never_reappears_as_width_grows() {
        let opts = options(3);
        let mut seen_fit = false;
        for w in 1..=80 {
            let result = run(PROSE, w as f32, &opts);
            if seen_fit {
                assert!(!result.truncated, "width {w} truncated after a narrower fit");
            }
            seen_fit |= !result.truncated;
        }
        assert!(seen_fit, "prose should fit at width 80");
    }

    #[test]
    fn test_budget_and_fit_bounds_hold() {
        let measurer = mono();
        for max_lines in 1..=5 {
            let opts = TruncateOptions {
                trim_whitespace: max_lines % 2 == 0,
                ..options(max_lines)
            };
            for w in 1..=40 {
                let w = w as f32;
                let result = run(PROSE, w, &opts);
                assert!(result.content_line_count() <= max_lines as usize);

                for (i, line) in result.lines.iter().enumerate() {
                    match line {
                        Line::Plain { text } => {
                            assert!(measurer.measure(text).unwrap() <= w, "{text:?} wider than {w}");
                        }
                        Line::Truncated(t) => {
                            assert_eq!(i, result.lines.len() - 1, "truncated line must be last");
                            let total = measurer.measure(t.kept()).unwrap() + 1.0;
                            assert!(total <= w, "{:?}… wider than {w}", t.kept());
                        }
                        Line::ForcedBlank => {}
                    }
                }
                assert_eq!(result.truncated, result.truncated_line().is_some());
            }
        }
    }

    #[test]
    fn test_max_lines_wire_format() {
        let limited: MaxLines = serde_json::from_str("2").unwrap();
        assert_eq!(limited, MaxLines::Limited(2));
        let unlimited: MaxLines = serde_json::from_str("\"unlimited\"").unwrap();
        assert_eq!(unlimited, MaxLines::Unlimited);
        assert!(serde_json::from_str::<MaxLines>("\"lots\"").is_err());
        assert_eq!(serde_json::to_string(&MaxLines::Unlimited).unwrap(), "\"unlimited\"");
    }

    #[test]
    fn test_max_lines_limit() {
        assert_eq!(MaxLines::Limited(3).limit(), Some(3));
        assert_eq!(MaxLines::Limited(0).limit(), None);
        assert_eq!(MaxLines::Unlimited.limit(), None);
    }
}
