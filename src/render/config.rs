use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_CURRENCY_SYMBOL, InvoiceError};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::rgb(0.501_960_8, 0.501_960_8, 0.501_960_8);
    pub const WHITESMOKE: Color = Color::rgb(0.960_784_3, 0.960_784_3, 0.960_784_3);
    pub const BEIGE: Color = Color::rgb(0.960_784_3, 0.960_784_3, 0.862_745_1);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 × 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
    /// ISO A4.
    pub const A4: PageSize = PageSize {
        width: 595.276,
        height: 841.89,
    };
}

/// Asset locations and presentation choices for the rendered document.
///
/// Every field has a default, so a JSON configuration file only needs to list
/// what it overrides:
///
/// ```json
/// { "fontPath": "assets/NotoSans-Regular.ttf", "totalsBackground": null }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// TrueType font used for all text. Must contain the currency symbol.
    pub font_path: PathBuf,
    /// Logo placed at the top right of the first page.
    pub logo_path: PathBuf,
    /// Directory receiving `invoice_<timestamp>.pdf`.
    pub output_dir: PathBuf,
    pub currency_symbol: String,
    pub page_size: PageSize,
    /// Page margin on all four sides, in points.
    pub margin: f32,
    /// Fill color of the totals block; `None` leaves it unfilled.
    pub totals_background: Option<Color>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("fonts.ttf"),
            logo_path: PathBuf::from("logo.png"),
            output_dir: PathBuf::from("."),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            page_size: PageSize::LETTER,
            margin: 72.0,
            totals_background: Some(Color::GREEN),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        let config: RenderConfig = serde_json::from_str(json)
            .map_err(|e| InvoiceError::Config(format!("failed to parse render configuration: {e}")))?;
        config.check()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, InvoiceError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            InvoiceError::Config(format!(
                "failed to read render configuration {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Reject page geometry that leaves no room for content.
    pub(crate) fn check(&self) -> Result<(), InvoiceError> {
        let PageSize { width, height } = self.page_size;
        if !(width > 0.0 && height > 0.0) {
            return Err(InvoiceError::Config(format!(
                "page size must be positive, got {width} x {height}"
            )));
        }
        if self.margin < 0.0 || 2.0 * self.margin >= width.min(height) {
            return Err(InvoiceError::Config(format!(
                "margin {} leaves no room on a {width} x {height} page",
                self.margin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.font_path, PathBuf::from("fonts.ttf"));
        assert_eq!(config.logo_path, PathBuf::from("logo.png"));
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.page_size, PageSize::LETTER);
        assert_eq!(config.totals_background, Some(Color::GREEN));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{ "currencySymbol": "Rs." }"#).unwrap();
        assert_eq!(config.currency_symbol, "Rs.");
        assert_eq!(config.font_path, PathBuf::from("fonts.ttf"));
        assert_eq!(config.margin, 72.0);
    }

    #[test]
    fn null_background_disables_fill() {
        let config = RenderConfig::from_json(r#"{ "totalsBackground": null }"#).unwrap();
        assert_eq!(config.totals_background, None);
    }

    #[test]
    fn custom_background() {
        let config =
            RenderConfig::from_json(r#"{ "totalsBackground": { "r": 0.9, "g": 0.9, "b": 0.9 } }"#)
                .unwrap();
        assert_eq!(config.totals_background, Some(Color::rgb(0.9, 0.9, 0.9)));
    }

    #[test]
    fn oversized_margin_is_rejected() {
        let err = RenderConfig::from_json(r#"{ "margin": 400 }"#).unwrap_err();
        assert!(matches!(err, InvoiceError::Config(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(RenderConfig::from_json("[1, 2").is_err());
    }
}
