//! Replay scripts: a JSON list of editor interactions.
//!
//! Overlays are addressed by their position among the visible card's overlays
//! in creation order, the same order the side list shows.

use std::path::Path;

use invite_core::PanelCommand;
use serde::{Deserialize, Serialize};

use crate::ReplayError;

/// What a pointer step lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Body of the visible overlay at this index.
    Body(usize),
    /// Resize handle of the visible overlay at this index.
    Handle(usize),
    /// The control panel.
    Panel,
    /// Anywhere else on the page.
    Elsewhere,
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Type into the text input and press the add button.
    AddText {
        /// Input value; blank uses the placeholder.
        #[serde(default)]
        text: String,
    },
    /// Pick an overlay from the side list.
    Select {
        /// Visible overlay index.
        overlay: usize,
    },
    /// Delete an overlay from the side list.
    Delete {
        /// Visible overlay index.
        overlay: usize,
    },
    /// A completed click.
    Click {
        /// Click target.
        on: Target,
    },
    /// Replace an overlay's text as if edited in place.
    EditContent {
        /// Visible overlay index.
        overlay: usize,
        /// New text.
        text: String,
    },
    /// Press the pointer at a card-relative position.
    PointerDown {
        /// Press target.
        on: Target,
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// Move the pointer to a card-relative position.
    PointerMove {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
    },
    /// Release the pointer.
    PointerUp,
    /// Drag an overlay by an offset, grabbing it at its center.
    Drag {
        /// Visible overlay index.
        overlay: usize,
        /// Horizontal offset.
        dx: f32,
        /// Vertical offset.
        dy: f32,
    },
    /// Resize an overlay by an offset, grabbing its bottom-right handle.
    Resize {
        /// Visible overlay index.
        overlay: usize,
        /// Width change.
        dx: f32,
        /// Height change.
        dy: f32,
    },
    /// Edit a panel control.
    Panel {
        /// The control edit.
        command: PanelCommand,
    },
    /// Carousel next button.
    NextSlide,
    /// Carousel previous button.
    PrevSlide,
    /// Carousel pagination bullet.
    GoToSlide {
        /// Zero-based real slide index.
        index: usize,
    },
    /// A background upload finishing.
    Upload {
        /// Image data URL.
        data_url: String,
    },
    /// Reset button.
    Reset,
}

/// A replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Steps in order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a script.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invite_core::FontStyleCombo;

    #[test]
    fn parses_tagged_steps() {
        let script = Script::from_json(
            r#"{
                "steps": [
                    {"action": "add_text", "text": "RSVP"},
                    {"action": "add_text"},
                    {"action": "click", "on": {"body": 0}},
                    {"action": "click", "on": "elsewhere"},
                    {"action": "panel", "command": {"control": "style", "value": "bold_italic"}},
                    {"action": "next_slide"},
                    {"action": "pointer_up"}
                ]
            }"#,
        )
        .expect("parse");

        assert_eq!(script.steps.len(), 7);
        assert_eq!(
            script.steps[0],
            Step::AddText {
                text: "RSVP".into()
            }
        );
        assert_eq!(script.steps[1], Step::AddText { text: String::new() });
        assert_eq!(script.steps[2], Step::Click { on: Target::Body(0) });
        assert_eq!(script.steps[3], Step::Click { on: Target::Elsewhere });
        assert_eq!(
            script.steps[4],
            Step::Panel {
                command: PanelCommand::Style(FontStyleCombo::BoldItalic)
            }
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Script::from_json(r#"{"steps": [{"action": "explode"}]}"#);
        assert!(matches!(err, Err(ReplayError::Script(_))));
    }
}
