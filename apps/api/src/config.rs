use anyhow::{bail, Context, Result};

use crate::layout::{FontFamily, DEFAULT_ELLIPSIS};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Font used when a layout request does not name one.
    pub default_font: FontFamily,
    pub default_font_size_px: f32,
    pub default_ellipsis: String,
    /// Largest `content` accepted by `POST /api/v1/layout`, in bytes.
    pub max_content_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_font_size_px = env_or("LAYOUT_DEFAULT_FONT_SIZE_PX", "16")
            .parse::<f32>()
            .context("LAYOUT_DEFAULT_FONT_SIZE_PX must be a number")?;
        if !(default_font_size_px.is_finite() && default_font_size_px > 0.0) {
            bail!("LAYOUT_DEFAULT_FONT_SIZE_PX must be positive, got {default_font_size_px}");
        }

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            default_font: env_or("LAYOUT_DEFAULT_FONT", "inter")
                .parse::<FontFamily>()
                .map_err(anyhow::Error::msg)
                .context("LAYOUT_DEFAULT_FONT must name a supported font family")?,
            default_font_size_px,
            default_ellipsis: env_or("LAYOUT_DEFAULT_ELLIPSIS", DEFAULT_ELLIPSIS),
            max_content_bytes: env_or("LAYOUT_MAX_CONTENT_BYTES", "65536")
                .parse::<usize>()
                .context("LAYOUT_MAX_CONTENT_BYTES must be a byte count")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_font: FontFamily::Inter,
            default_font_size_px: 16.0,
            default_ellipsis: DEFAULT_ELLIPSIS.to_string(),
            max_content_bytes: 65_536,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
