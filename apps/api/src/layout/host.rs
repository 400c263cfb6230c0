//! Recompute-on-change binding for hosts that re-run layout on every resize
//! or content update.
//!
//! `Truncator` owns the measurer and options, remembers the inputs of the
//! last computed pass, and skips work when nothing changed. Until the host
//! reports a usable width it keeps whatever result it already had.

use tracing::debug;

use crate::errors::LayoutError;
use crate::layout::engine::{truncate, TruncateOptions};
use crate::layout::measure::{TargetWidth, TextMeasurer};
use crate::layout::notify::{dispatch, TruncateCallback};
use crate::layout::result::LayoutResult;

pub struct Truncator<M> {
    measurer: M,
    options: TruncateOptions,
    on_truncate: Option<TruncateCallback>,
    /// Content and width of the pass that produced `current`.
    last_inputs: Option<(String, TargetWidth)>,
    current: LayoutResult,
}

impl<M: TextMeasurer> Truncator<M> {
    pub fn new(measurer: M, options: TruncateOptions) -> Self {
        Self {
            measurer,
            options,
            on_truncate: None,
            last_inputs: None,
            current: LayoutResult::default(),
        }
    }

    /// Installs the callback notified once per computed pass.
    pub fn on_truncate(mut self, callback: TruncateCallback) -> Self {
        self.on_truncate = Some(callback);
        self
    }

    pub fn options(&self) -> &TruncateOptions {
        &self.options
    }

    /// Swaps the measurer, e.g. after a font change; the next `update`
    /// recomputes.
    pub fn set_measurer(&mut self, measurer: M) {
        self.measurer = measurer;
        self.last_inputs = None;
    }

    /// Replaces the options; the next `update` recomputes.
    ///
    /// A new `ellipsis` needs a measurer bound to the same marker (see
    /// [`Truncator::set_measurer`]); otherwise `update` fails with
    /// [`LayoutError::EllipsisMismatch`].
    pub fn set_options(&mut self, options: TruncateOptions) {
        if options != self.options {
            self.options = options;
            self.last_inputs = None;
        }
    }

    /// Most recent result (empty before the first computed pass).
    pub fn result(&self) -> &LayoutResult {
        &self.current
    }

    /// Lays `content` out at `width`, reusing the previous result when the
    /// width is not ready yet or nothing changed since the last pass.
    pub fn update(&mut self, content: &str, width: f32) -> Result<&LayoutResult, LayoutError> {
        let Some(target) = TargetWidth::new(width) else {
            debug!(width, "target width not ready, keeping previous layout");
            return Ok(&self.current);
        };

        if let Some((last_content, last_width)) = &self.last_inputs {
            if last_content == content && *last_width == target {
                return Ok(&self.current);
            }
        }

        let result = truncate(content, target, &self.options, &self.measurer)?;
        debug!(
            width = target.get(),
            lines = result.lines.len(),
            truncated = result.truncated,
            "layout pass complete"
        );

        self.current = result;
        self.last_inputs = Some((content.to_string(), target));

        if let Some(callback) = &self.on_truncate {
            dispatch(callback, self.current.truncated);
        }
        Ok(&self.current)
    }
}
