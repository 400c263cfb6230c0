use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{
    truncate, FontFamily, FontMeasurer, LayoutResult, Line, MaxLines, TargetWidth,
    TruncateOptions,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub content: String,
    /// Line width in pixels. Missing, zero or negative means the client has
    /// not been laid out yet.
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub lines: MaxLines,
    #[serde(default)]
    pub trim_whitespace: bool,
    #[serde(default)]
    pub break_all: bool,
    pub ellipsis: Option<String>,
    pub font: Option<FontFamily>,
    pub font_size_px: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub request_id: Uuid,
    /// False when `width` was not usable; `lines` is then empty.
    pub ready: bool,
    pub truncated: bool,
    pub lines: Vec<Line>,
}

impl LayoutResponse {
    fn from_result(request_id: Uuid, result: LayoutResult) -> Self {
        Self {
            request_id,
            ready: true,
            truncated: result.truncated,
            lines: result.lines,
        }
    }

    fn not_ready(request_id: Uuid) -> Self {
        let result = LayoutResult::default();
        Self {
            ready: false,
            ..Self::from_result(request_id, result)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FontListResponse {
    pub fonts: Vec<FontFamily>,
    pub default_font: FontFamily,
    pub default_font_size_px: f32,
    pub default_ellipsis: String,
}

/// GET /api/v1/fonts
pub async fn handle_list_fonts(State(state): State<AppState>) -> Json<FontListResponse> {
    Json(FontListResponse {
        fonts: FontFamily::ALL.to_vec(),
        default_font: state.config.default_font,
        default_font_size_px: state.config.default_font_size_px,
        default_ellipsis: state.config.default_ellipsis.clone(),
    })
}

/// POST /api/v1/layout
pub async fn handle_layout(
    State(state): State<AppState>,
    Json(req): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let config = &state.config;

    if req.content.len() > config.max_content_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "content is {} bytes, limit is {}",
            req.content.len(),
            config.max_content_bytes
        )));
    }

    let font_size_px = req.font_size_px.unwrap_or(config.default_font_size_px);
    if !(font_size_px.is_finite() && font_size_px > 0.0) {
        return Err(AppError::Validation(format!(
            "font_size_px must be positive, got {font_size_px}"
        )));
    }

    let Some(width) = req.width.and_then(TargetWidth::new) else {
        debug!(%request_id, width = ?req.width, "layout requested before width is known");
        return Ok(Json(LayoutResponse::not_ready(request_id)));
    };

    let options = TruncateOptions {
        max_lines: req.lines,
        trim_whitespace: req.trim_whitespace,
        break_all: req.break_all,
        ellipsis: req
            .ellipsis
            .unwrap_or_else(|| config.default_ellipsis.clone()),
    };
    let measurer = FontMeasurer::new(
        req.font.unwrap_or(config.default_font),
        font_size_px,
        options.ellipsis.clone(),
    );
    let (font, font_size_px) = (measurer.family(), measurer.font_size_px());
    let content = req.content;

    // CPU-bound pass, keep it off the async executor.
    let result = tokio::task::spawn_blocking(move || {
        truncate(&content, width, &options, &measurer)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

    debug!(
        %request_id,
        font = font.as_str(),
        font_size_px,
        lines = result.lines.len(),
        truncated = result.truncated,
        "layout computed"
    );
    Ok(Json(LayoutResponse::from_result(request_id, result)))
}
