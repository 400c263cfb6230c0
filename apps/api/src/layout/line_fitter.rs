//! Binary searches for the longest prefix that fits a line.
//!
//! Both searches rely on measured width being non-decreasing as the prefix
//! grows, and issue O(log n) calls to the measurer. Measuring may be an
//! expensive external call, so a linear scan is never acceptable here.

use crate::errors::LayoutError;
use crate::layout::measure::{TargetWidth, TextMeasurer};
use crate::layout::tokenizer::{join_units, BreakMode};

/// Largest `k` such that `units[..k]` joined fits within `width`.
///
/// Returns 0 when even the first unit overflows; the caller decides what to
/// do with an oversized unit.
pub fn fit_units(
    units: &[&str],
    mode: BreakMode,
    width: TargetWidth,
    measurer: &dyn TextMeasurer,
) -> Result<usize, LayoutError> {
    longest_fitting(units.len(), |len| {
        let candidate = join_units(&units[..len], mode);
        Ok(measurer.measure(&candidate)? <= width.get())
    })
}

/// Longest character prefix of `text` that fits within `width` once an
/// ellipsis of `ellipsis_width` is appended. May be empty.
pub fn fit_chars<'a>(
    text: &'a str,
    width: TargetWidth,
    ellipsis_width: f32,
    measurer: &dyn TextMeasurer,
) -> Result<&'a str, LayoutError> {
    // ends[k - 1] is the byte offset just past the k-th character.
    let ends: Vec<usize> = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    let fitted = longest_fitting(ends.len(), |len| {
        let candidate = &text[..ends[len - 1]];
        Ok(measurer.measure(candidate)? + ellipsis_width <= width.get())
    })?;

    Ok(match fitted {
        0 => "",
        len => &text[..ends[len - 1]],
    })
}

/// Largest `len` in `1..=n` for which `fits(len)` holds, or 0.
///
/// `fits` must be monotonic: once it fails for some length it fails for
/// every longer one.
fn longest_fitting<F>(n: usize, mut fits: F) -> Result<usize, LayoutError>
where
    F: FnMut(usize) -> Result<bool, LayoutError>,
{
    let mut best = 0;
    let mut lower = 0usize;
    let mut upper = n;

    // Half-open [lower, upper) over zero-based indices; testing index
    // `middle` means testing a prefix of `middle + 1` units.
    while lower < upper {
        let middle = lower + (upper - lower) / 2;
        if fits(middle + 1)? {
            best = middle + 1;
            lower = middle + 1;
        } else {
            upper = middle;
        }
    }

    Ok(best)
}
