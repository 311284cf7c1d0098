//! Style control panel model.
//!
//! Holds what every panel control displays and turns control edits into style
//! changes on the active overlay. Controls edited with no active overlay only
//! update their own readout.

use serde::{Deserialize, Serialize};

use crate::color::{picker_color, BLACK};
use crate::{FontStyleCombo, TextAlign, TextOverlay};

/// Read-back fallback for the font size slider.
pub const FALLBACK_FONT_SIZE: f32 = 24.0;
/// Read-back fallback for the line height slider.
pub const FALLBACK_LINE_HEIGHT: f32 = 1.5;
/// Read-back fallback for the letter spacing slider.
pub const FALLBACK_LETTER_SPACING: f32 = 0.0;

/// An edit made through one of the panel controls.
///
/// Slider values arrive as the raw strings the inputs report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum PanelCommand {
    /// Font family selector changed.
    FontFamily(String),
    /// Font size slider moved.
    FontSize(String),
    /// One of the four weight/slant buttons pressed.
    Style(FontStyleCombo),
    /// Color picker changed.
    Color(String),
    /// One of the four alignment buttons pressed.
    Align(TextAlign),
    /// Line height slider moved.
    LineHeight(String),
    /// Letter spacing slider moved.
    LetterSpacing(String),
}

/// Displayed state of every panel control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    /// Text input value.
    pub text: String,
    /// Selected font family.
    pub font_family: String,
    /// Font size slider value.
    pub font_size: f32,
    /// Font size readout.
    pub font_size_label: String,
    /// Marked weight/slant button.
    pub style: FontStyleCombo,
    /// Color picker value (`#RRGGBB`).
    pub color: String,
    /// Marked alignment button.
    pub align: TextAlign,
    /// Line height slider value.
    pub line_height: f32,
    /// Line height readout.
    pub line_height_label: String,
    /// Letter spacing slider value.
    pub letter_spacing: f32,
    /// Letter spacing readout.
    pub letter_spacing_label: String,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: "'Open Sans', sans-serif".to_string(),
            font_size: FALLBACK_FONT_SIZE,
            font_size_label: px_label(FALLBACK_FONT_SIZE),
            style: FontStyleCombo::Normal,
            color: BLACK.to_string(),
            align: TextAlign::Center,
            line_height: FALLBACK_LINE_HEIGHT,
            line_height_label: number_label(FALLBACK_LINE_HEIGHT),
            letter_spacing: FALLBACK_LETTER_SPACING,
            letter_spacing_label: px_label(FALLBACK_LETTER_SPACING),
        }
    }
}

impl PanelState {
    /// Re-derive every control from the overlay's live style.
    pub fn refresh(&mut self, overlay: &TextOverlay) {
        let style = &overlay.style;
        self.text.clone_from(&overlay.content);
        self.font_family.clone_from(&style.font_family);

        self.font_size = whole_or(style.font_size, FALLBACK_FONT_SIZE);
        self.font_size_label = px_label(self.font_size);

        self.style = style.combo();
        self.color = picker_color(&style.color);
        self.align = style.align;

        self.line_height = nonzero_or(style.line_height, FALLBACK_LINE_HEIGHT);
        self.line_height_label = number_label(self.line_height);

        self.letter_spacing = whole_or(style.letter_spacing, FALLBACK_LETTER_SPACING);
        self.letter_spacing_label = px_label(self.letter_spacing);
    }

    /// Apply a control edit.
    ///
    /// Readouts follow the control even without a target. Weight/slant and
    /// alignment markers only move when there is a target. Returns whether the
    /// target's style changed.
    pub fn apply(&mut self, command: &PanelCommand, target: Option<&mut TextOverlay>) -> bool {
        match command {
            PanelCommand::FontFamily(family) => {
                self.font_family.clone_from(family);
                target.is_some_and(|o| {
                    o.style.font_family.clone_from(family);
                    true
                })
            }
            PanelCommand::FontSize(raw) => {
                self.font_size_label = format!("{}px", raw.trim());
                let Some(size) = parse_number(raw) else {
                    return false;
                };
                self.font_size = size;
                target.is_some_and(|o| {
                    o.style.font_size = size;
                    true
                })
            }
            PanelCommand::Style(combo) => target.is_some_and(|o| {
                self.style = *combo;
                o.style.set_combo(*combo);
                true
            }),
            PanelCommand::Color(color) => {
                self.color = picker_color(color);
                target.is_some_and(|o| {
                    o.style.color.clone_from(color);
                    true
                })
            }
            PanelCommand::Align(align) => target.is_some_and(|o| {
                self.align = *align;
                o.style.align = *align;
                true
            }),
            PanelCommand::LineHeight(raw) => {
                self.line_height_label = raw.trim().to_string();
                let Some(value) = parse_number(raw) else {
                    return false;
                };
                self.line_height = value;
                target.is_some_and(|o| {
                    o.style.line_height = value;
                    true
                })
            }
            PanelCommand::LetterSpacing(raw) => {
                self.letter_spacing_label = format!("{}px", raw.trim());
                let Some(value) = parse_number(raw) else {
                    return false;
                };
                self.letter_spacing = value;
                target.is_some_and(|o| {
                    o.style.letter_spacing = value;
                    true
                })
            }
        }
    }
}

/// Parse a slider value, accepting an optional trailing `px`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f32> {
    let s = raw.trim();
    let s = s.strip_suffix("px").unwrap_or(s).trim_end();
    s.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Integer part, or `fallback` when that is zero or not a number.
fn whole_or(value: f32, fallback: f32) -> f32 {
    let whole = value.trunc();
    if whole.is_finite() && whole != 0.0 {
        whole
    } else {
        fallback
    }
}

fn nonzero_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        fallback
    }
}

fn px_label(value: f32) -> String {
    format!("{}px", number_label(value))
}

fn number_label(value: f32) -> String {
    format!("{value}")
}
