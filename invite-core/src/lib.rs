//! # Invite Studio Core
//!
//! Editing logic for placing and styling text overlays on invitation cards.
//! Has no browser dependency; compiles to WASM for the web host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Editor                    │
//! ├─────────────────────────────────────────────┤
//! │  Registry        │  Selection Controller    │
//! │  - Overlays      │  - Idle / Selected       │
//! │  - Per-card list │  - Active marker         │
//! ├─────────────────────────────────────────────┤
//! │  Gesture Engine  │  Style Panel             │
//! │  - Drag (clamp)  │  - Controls ⇄ style      │
//! │  - Resize (floor)│  - Read-back fallbacks   │
//! ├─────────────────────────────────────────────┤
//! │  Cards + Carousel model │ Measure seam      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod card;
pub mod carousel;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod interaction;
pub mod layout;
pub mod overlay;
pub mod panel;
pub mod registry;
pub mod selection;

pub use card::{Card, CardId, Cards};
pub use carousel::{Carousel, CarouselOptions};
pub use color::rgb_to_hex;
pub use config::EditorConfig;
pub use editor::{Editor, EditorSnapshot, ListEntry};
pub use error::{EditorError, EditorResult};
pub use gesture::{Gesture, GestureEngine, PointerTarget, ResizeLimits};
pub use interaction::{Interaction, InteractionHandlers, InteractionKind};
pub use layout::{Measure, Point, Rect, Size, StaticLayout};
pub use overlay::{
    Centering, Extent, FontSlant, FontStyleCombo, FontWeight, Geometry, Length, OverlayId,
    StyleOverrides, TextAlign, TextOverlay, TextStyle,
};
pub use panel::{PanelCommand, PanelState};
pub use registry::OverlayRegistry;
pub use selection::{Selection, SelectionController};

/// Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
