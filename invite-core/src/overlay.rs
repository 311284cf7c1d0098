//! Text overlays - the editable text boxes placed on cards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CardId;

/// Unique identifier for an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayId(Uuid);

impl OverlayId {
    /// Create a new unique overlay ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an overlay ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for OverlayId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font slant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left aligned.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Right aligned.
    Right,
    /// Justified.
    Justify,
}

impl TextAlign {
    /// All alignments in panel order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Center, Self::Right, Self::Justify];

    /// CSS `text-align` keyword (also the panel button's `data-align`).
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    /// Parse a CSS `text-align` keyword.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_css() == value.trim())
    }
}

/// The four mutually exclusive weight/slant combinations offered by the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyleCombo {
    /// Normal weight, upright.
    #[default]
    Normal,
    /// Normal weight, italic.
    Italic,
    /// Bold, upright.
    Bold,
    /// Bold and italic.
    BoldItalic,
}

impl FontStyleCombo {
    /// All combinations in panel order.
    pub const ALL: [Self; 4] = [Self::Normal, Self::Italic, Self::Bold, Self::BoldItalic];

    /// Infer the combination from a weight and a slant.
    #[must_use]
    pub const fn from_parts(weight: FontWeight, slant: FontSlant) -> Self {
        match (weight, slant) {
            (FontWeight::Bold, FontSlant::Italic) => Self::BoldItalic,
            (FontWeight::Bold, FontSlant::Normal) => Self::Bold,
            (FontWeight::Normal, FontSlant::Italic) => Self::Italic,
            (FontWeight::Normal, FontSlant::Normal) => Self::Normal,
        }
    }

    /// Split into weight and slant.
    #[must_use]
    pub const fn parts(self) -> (FontWeight, FontSlant) {
        match self {
            Self::Normal => (FontWeight::Normal, FontSlant::Normal),
            Self::Italic => (FontWeight::Normal, FontSlant::Italic),
            Self::Bold => (FontWeight::Bold, FontSlant::Normal),
            Self::BoldItalic => (FontWeight::Bold, FontSlant::Italic),
        }
    }

    /// The panel button's `data-style` value.
    #[must_use]
    pub const fn data_attr(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Bold => "bold",
            Self::BoldItalic => "bold italic",
        }
    }

    /// Parse a panel button's `data-style` value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.data_attr() == value.trim())
    }
}

/// A position coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    /// Percentage of the card dimension.
    Percent(f32),
    /// Absolute pixels from the card origin.
    Px(f32),
}

impl Length {
    /// Resolve to pixels against the card dimension.
    #[must_use]
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(v) => v,
        }
    }
}

/// A width or height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    /// Sized by content.
    #[default]
    Auto,
    /// Explicit size in pixels.
    Px(f32),
}

/// Centering transform applied on top of the position.
///
/// Only used for default placement; the first drag clears it for good.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Centering {
    /// No transform.
    None,
    /// `translateX(-50%)`.
    Horizontal,
    /// `translate(-50%, -50%)`.
    #[default]
    Both,
}

impl Centering {
    /// Fraction of the overlay's own size shifted left and up.
    #[must_use]
    pub const fn shift(self) -> (f32, f32) {
        match self {
            Self::None => (0.0, 0.0),
            Self::Horizontal => (0.5, 0.0),
            Self::Both => (0.5, 0.5),
        }
    }
}

/// Visual style of an overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// CSS font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// CSS color (hex from the picker, or any CSS color string).
    pub color: String,
    /// Font weight.
    pub weight: FontWeight,
    /// Font slant.
    pub slant: FontSlant,
    /// Text alignment.
    pub align: TextAlign,
    /// Unitless line height multiplier.
    pub line_height: f32,
    /// Letter spacing in pixels.
    pub letter_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "'Open Sans', sans-serif".to_string(),
            font_size: 16.0,
            color: "#000000".to_string(),
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            align: TextAlign::Center,
            line_height: 1.5,
            letter_spacing: 0.0,
        }
    }
}

impl TextStyle {
    /// The weight/slant combination currently in effect.
    #[must_use]
    pub const fn combo(&self) -> FontStyleCombo {
        FontStyleCombo::from_parts(self.weight, self.slant)
    }

    /// Set weight and slant from a combination.
    pub fn set_combo(&mut self, combo: FontStyleCombo) {
        (self.weight, self.slant) = combo.parts();
    }
}

/// Position and size of an overlay within its card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Left edge.
    pub left: Length,
    /// Top edge.
    pub top: Length,
    /// Width.
    pub width: Extent,
    /// Height.
    pub height: Extent,
    /// Default-placement transform.
    pub centering: Centering,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            left: Length::Percent(50.0),
            top: Length::Percent(50.0),
            width: Extent::Auto,
            height: Extent::Auto,
            centering: Centering::Both,
        }
    }
}

/// Per-field overrides applied on top of the defaults when an overlay is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    /// Font slant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slant: Option<FontSlant>,
    /// Alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// Line height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// Letter spacing in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f32>,
    /// Left position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
    /// Top position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    /// Centering transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centering: Option<Centering>,
}

impl StyleOverrides {
    /// Override the top position.
    #[must_use]
    pub fn with_top(mut self, top: Length) -> Self {
        self.top = Some(top);
        self
    }

    /// Fill every unset field from `base`.
    #[must_use]
    pub fn resolve(&self, base: &TextStyle) -> (TextStyle, Geometry) {
        let defaults = Geometry::default();
        let style = TextStyle {
            font_family: self
                .font_family
                .clone()
                .unwrap_or_else(|| base.font_family.clone()),
            font_size: self.font_size.unwrap_or(base.font_size),
            color: self.color.clone().unwrap_or_else(|| base.color.clone()),
            weight: self.weight.unwrap_or(base.weight),
            slant: self.slant.unwrap_or(base.slant),
            align: self.align.unwrap_or(base.align),
            line_height: self.line_height.unwrap_or(base.line_height),
            letter_spacing: self.letter_spacing.unwrap_or(base.letter_spacing),
        };
        let geometry = Geometry {
            left: self.left.unwrap_or(defaults.left),
            top: self.top.unwrap_or(defaults.top),
            centering: self.centering.unwrap_or(defaults.centering),
            ..defaults
        };
        (style, geometry)
    }
}

/// A text overlay placed on exactly one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    /// Unique identifier.
    pub id: OverlayId,
    /// Plain text content.
    pub content: String,
    /// Owning card; never changes after creation.
    card: CardId,
    /// Visual style.
    pub style: TextStyle,
    /// Position and size.
    pub geometry: Geometry,
    /// Whether the overlay is in edit-in-place mode.
    pub editing: bool,
    /// Whether the overlay carries the active marker.
    pub active: bool,
}

impl TextOverlay {
    /// Create an overlay on `card`.
    #[must_use]
    pub fn new(content: impl Into<String>, card: CardId, style: TextStyle, geometry: Geometry) -> Self {
        Self {
            id: OverlayId::new(),
            content: content.into(),
            card,
            style,
            geometry,
            editing: false,
            active: false,
        }
    }

    /// The card this overlay belongs to.
    #[must_use]
    pub const fn card(&self) -> CardId {
        self.card
    }

    /// Short preview of the content for list views.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}...")
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cards;

    fn card0() -> CardId {
        Cards::new(1).id(0).expect("card 0")
    }

    #[test]
    fn combo_roundtrips_through_parts() {
        for combo in FontStyleCombo::ALL {
            let (weight, slant) = combo.parts();
            assert_eq!(FontStyleCombo::from_parts(weight, slant), combo);
            assert_eq!(FontStyleCombo::parse(combo.data_attr()), Some(combo));
        }
    }

    #[test]
    fn align_parse_rejects_unknown() {
        assert_eq!(TextAlign::parse("justify"), Some(TextAlign::Justify));
        assert_eq!(TextAlign::parse("middle"), None);
    }

    #[test]
    fn overrides_fill_unset_fields() {
        let overrides = StyleOverrides {
            font_size: Some(24.0),
            top: Some(Length::Percent(40.0)),
            centering: Some(Centering::Horizontal),
            ..StyleOverrides::default()
        };
        let (style, geometry) = overrides.resolve(&TextStyle::default());

        assert!((style.font_size - 24.0).abs() < f32::EPSILON);
        assert_eq!(style.font_family, "'Open Sans', sans-serif");
        assert_eq!(style.align, TextAlign::Center);
        assert!((style.line_height - 1.5).abs() < f32::EPSILON);
        assert_eq!(geometry.left, Length::Percent(50.0));
        assert_eq!(geometry.top, Length::Percent(40.0));
        assert_eq!(geometry.width, Extent::Auto);
        assert_eq!(geometry.centering, Centering::Horizontal);
    }

    #[test]
    fn preview_truncates_long_content() {
        let short = TextOverlay::new("Hello", card0(), TextStyle::default(), Geometry::default());
        assert_eq!(short.preview(20), "Hello");

        let long = TextOverlay::new(
            "Join us for the wedding celebration",
            card0(),
            TextStyle::default(),
            Geometry::default(),
        );
        assert_eq!(long.preview(20), "Join us for the wedd...");
    }

    #[test]
    fn preview_exactly_at_limit_has_no_ellipsis() {
        let overlay = TextOverlay::new("a".repeat(20), card0(), TextStyle::default(), Geometry::default());
        assert_eq!(overlay.preview(20), "a".repeat(20));
    }

    #[test]
    fn length_resolves_against_extent() {
        assert!((Length::Percent(40.0).resolve(500.0) - 200.0).abs() < f32::EPSILON);
        assert!((Length::Px(12.0).resolve(500.0) - 12.0).abs() < f32::EPSILON);
    }
}
