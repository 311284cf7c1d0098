//! # Invite Studio Replay
//!
//! Headless host for the invitation editor. Replays a JSON script of user
//! interactions against `invite-core`, using fixed card geometry in place of a
//! browser layout, then prints the resulting editor state.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p invite-replay -- invite-replay/scripts/demo.json
//! cargo run -p invite-replay -- script.json --config editor.json --json
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Resolved options: script, editor config file, card size, output
//! - `Script` / `Step` - The JSON script format
//! - `Replay` - Drives an `Editor` through the steps and tallies interactions

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod replay;
mod script;

pub use replay::{KindCount, Outcome, Replay, Report};
pub use script::{Script, Step, Target};

use std::path::{Path, PathBuf};

use clap::Parser;
use invite_core::{EditorConfig, EditorError, OverlayId, StaticLayout};
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The script is not valid JSON or has an unknown step.
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),

    /// A step named an overlay index the visible card does not have.
    #[error("No overlay at index {index} on slide {slide}")]
    NoSuchOverlay {
        /// Requested index.
        index: usize,
        /// One-based visible slide.
        slide: usize,
    },

    /// The layout could not place an overlay.
    #[error("Overlay {0} has no layout")]
    NotRendered(OverlayId),

    /// The editor refused to start a gesture.
    #[error("Gesture refused on overlay {0}")]
    GestureRefused(OverlayId),

    /// The editor rejected an operation.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Output format for the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Command-line arguments for invite-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "invite-replay")]
#[command(about = "Replay Invite Studio editing scripts without a browser")]
#[command(version)]
pub struct CliArgs {
    /// Script file to replay
    pub script: PathBuf,

    /// Editor configuration file (JSON); defaults are used when omitted
    #[arg(long, env = "INVITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Card width in pixels
    #[arg(long, default_value = "420")]
    pub card_width: f32,

    /// Card height in pixels
    #[arg(long, default_value = "594")]
    pub card_height: f32,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,

    /// Stop at the first step that cannot be applied
    #[arg(long, env = "INVITE_REPLAY_STRICT")]
    pub strict: bool,
}

/// Replay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Script to replay.
    pub script: PathBuf,
    /// Editor configuration file.
    pub config: Option<PathBuf>,
    /// Card width in pixels.
    pub card_width: f32,
    /// Card height in pixels.
    pub card_height: f32,
    /// Output format.
    pub output: OutputFormat,
    /// Fail on the first step that cannot be applied.
    pub strict: bool,
}

impl ReplayConfig {
    /// Create a configuration for a script with default settings.
    #[must_use]
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
            config: None,
            card_width: 420.0,
            card_height: 594.0,
            output: OutputFormat::Text,
            strict: false,
        }
    }

    /// Card geometry for the replay.
    #[must_use]
    pub fn layout(&self) -> StaticLayout {
        StaticLayout::new(self.card_width, self.card_height)
    }

    /// Load the editor configuration, or the defaults when no file is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not validate.
    pub fn editor_config(&self) -> Result<EditorConfig, ReplayError> {
        let Some(path) = &self.config else {
            return Ok(EditorConfig::default());
        };
        let json = read(path)?;
        Ok(EditorConfig::from_json(&json)?)
    }
}

impl From<CliArgs> for ReplayConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            script: args.script,
            config: args.config,
            card_width: args.card_width,
            card_height: args.card_height,
            output: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            strict: args.strict,
        }
    }
}

fn read(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })
}
