//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::{
    CarouselOptions, Centering, EditorError, EditorResult, Length, ResizeLimits, StyleOverrides,
    TextAlign, TextStyle,
};

/// Everything the editor needs to know up front.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Number of cards in the carousel.
    pub card_count: usize,
    /// Seed text per card, used on start and on reset.
    pub seed_texts: Vec<String>,
    /// Style and placement of seed overlays (top is set per card).
    pub seed_style: StyleOverrides,
    /// Top of the first card's seed overlay, in percent.
    pub seed_top_start: f32,
    /// Increase of the seed top per card index, in percent.
    pub seed_top_step: f32,
    /// Top of the seed overlay recreated by a reset, in percent.
    pub reset_top: f32,
    /// Style of overlays created with the add button.
    pub default_style: TextStyle,
    /// Resize floor.
    pub resize_limits: ResizeLimits,
    /// Text used when the add button is pressed with an empty input.
    pub placeholder_text: String,
    /// Characters of content shown in the side list before truncating.
    pub preview_chars: usize,
    /// Carousel widget options.
    pub carousel: CarouselOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            card_count: 3,
            seed_texts: vec![
                "We invite you and your family's gracious presence and blessing".to_string(),
                "Join us for the wedding celebration of Sarah & Michael".to_string(),
                "Save the Date: 20th Oct 2025 | Grand Ballroom, The Ritz Hotel".to_string(),
            ],
            seed_style: StyleOverrides {
                font_family: Some("'Playfair Display', serif".to_string()),
                font_size: Some(24.0),
                color: Some("#000000".to_string()),
                align: Some(TextAlign::Center),
                left: Some(Length::Percent(50.0)),
                centering: Some(Centering::Horizontal),
                ..StyleOverrides::default()
            },
            seed_top_start: 40.0,
            seed_top_step: 15.0,
            reset_top: 40.0,
            default_style: TextStyle::default(),
            resize_limits: ResizeLimits::default(),
            placeholder_text: "Your text here".to_string(),
            preview_chars: 20,
            carousel: CarouselOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`EditorConfig::validate`].
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> EditorResult<()> {
        if self.card_count == 0 {
            return Err(EditorError::InvalidConfig("card_count must be at least 1".into()));
        }
        if self.seed_texts.len() != self.card_count {
            return Err(EditorError::InvalidConfig(format!(
                "expected {} seed texts, got {}",
                self.card_count,
                self.seed_texts.len()
            )));
        }
        if self.resize_limits.min_width <= 0.0 || self.resize_limits.min_height <= 0.0 {
            return Err(EditorError::InvalidConfig(
                "resize limits must be positive".into(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(EditorError::InvalidConfig("preview_chars must be at least 1".into()));
        }
        Ok(())
    }

    /// Seed overlay overrides for first start, stepping down per card.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Card counts are tiny
    pub fn initial_seed(&self, index: usize) -> StyleOverrides {
        let top = self.seed_top_start + index as f32 * self.seed_top_step;
        self.seed_style.clone().with_top(Length::Percent(top))
    }

    /// Seed overlay overrides after a reset.
    #[must_use]
    pub fn reset_seed(&self) -> StyleOverrides {
        self.seed_style.clone().with_top(Length::Percent(self.reset_top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        EditorConfig::default().validate().expect("default config should validate");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"placeholder_text":"Type here"}"#).expect("parse");
        assert_eq!(config.placeholder_text, "Type here");
        assert_eq!(config.card_count, 3);
        assert!((config.resize_limits.min_width - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn seed_count_must_match_cards() {
        let err = EditorConfig::from_json(r#"{"card_count":2}"#).expect_err("should reject");
        assert!(matches!(err, EditorError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = EditorConfig::from_json("{ nope").expect_err("should reject");
        assert!(matches!(err, EditorError::Serialization(_)));
    }

    #[test]
    fn initial_seed_steps_but_reset_does_not() {
        let config = EditorConfig::default();
        assert_eq!(config.initial_seed(0).top, Some(Length::Percent(40.0)));
        assert_eq!(config.initial_seed(2).top, Some(Length::Percent(70.0)));
        assert_eq!(config.reset_seed().top, Some(Length::Percent(40.0)));
    }
}
