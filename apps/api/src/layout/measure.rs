//! Injected width-measurement capabilities.
//!
//! The engine never measures glyphs itself. Hosts hand it a [`TextMeasurer`]
//! bound to their font context (a canvas, a shaping library, or the static
//! tables in `font_metrics`) and a [`TargetWidth`] for the line box.

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;

/// Width of a string under a fixed font context.
///
/// Implementations must be deterministic and monotonic under prefix
/// extension: `measure(a) <= measure(a + b)`. The binary searches in
/// `line_fitter` rely on that.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> Result<f32, LayoutError>;

    /// Width of the configured ellipsis marker.
    fn ellipsis_width(&self) -> Result<f32, LayoutError>;

    /// The marker `ellipsis_width` measures, when the measurer knows it.
    /// The engine refuses to lay out with options naming a different one.
    fn ellipsis(&self) -> Option<&str> {
        None
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str) -> Result<f32, LayoutError> {
        (**self).measure(text)
    }

    fn ellipsis_width(&self) -> Result<f32, LayoutError> {
        (**self).ellipsis_width()
    }

    fn ellipsis(&self) -> Option<&str> {
        (**self).ellipsis()
    }
}

/// Adapts a measuring closure plus a fixed ellipsis string into a [`TextMeasurer`].
///
/// The ellipsis width is measured with the same closure.
pub struct FnMeasurer<F> {
    measure: F,
    ellipsis: String,
}

impl<F> FnMeasurer<F>
where
    F: Fn(&str) -> Result<f32, LayoutError>,
{
    pub fn new(ellipsis: impl Into<String>, measure: F) -> Self {
        Self {
            measure,
            ellipsis: ellipsis.into(),
        }
    }
}

impl<F> TextMeasurer for FnMeasurer<F>
where
    F: Fn(&str) -> Result<f32, LayoutError>,
{
    fn measure(&self, text: &str) -> Result<f32, LayoutError> {
        (self.measure)(text)
    }

    fn ellipsis_width(&self) -> Result<f32, LayoutError> {
        (self.measure)(&self.ellipsis)
            .map_err(|e| LayoutError::EllipsisMeasurement(e.to_string()))
    }

    fn ellipsis(&self) -> Option<&str> {
        Some(&self.ellipsis)
    }
}

/// Available width of one rendered line. Always finite and strictly positive.
///
/// A host that has not been laid out yet reports 0 (or garbage); those values
/// never become a `TargetWidth`, which is how "not ready" is represented.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct TargetWidth(f32);

impl TargetWidth {
    /// Returns `None` for 0, negative, NaN or infinite widths.
    pub fn new(width: f32) -> Option<Self> {
        (width.is_finite() && width > 0.0).then_some(Self(width))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for TargetWidth {
    type Error = String;

    fn try_from(width: f32) -> Result<Self, Self::Error> {
        Self::new(width).ok_or_else(|| format!("width must be a positive number, got {width}"))
    }
}

impl From<TargetWidth> for f32 {
    fn from(width: TargetWidth) -> Self {
        width.0
    }
}
