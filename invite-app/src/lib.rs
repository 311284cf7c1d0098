//! # Invite Studio WASM Application
//!
//! Browser host for the invitation card editor. Binds the page's existing
//! controls, cards and Swiper carousel to an `invite-core` editor.
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web invite-app
//! ```
//!
//! Then, once the page markup and Swiper script are loaded:
//! ```javascript
//! import init, { InviteApp } from './pkg/invite_app.js';
//!
//! await init();
//! const app = new InviteApp();          // or new InviteApp(configJson)
//! console.log(app.snapshotJson());
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod css;
mod dom;
mod error;
mod host;
mod swiper;

use std::rc::Rc;

use invite_core::EditorConfig;
use wasm_bindgen::prelude::*;

pub use error::{HostError, HostResult};

use host::Host;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("Invite Studio WASM initialized");
}

/// The editor bound to the current page.
#[wasm_bindgen]
pub struct InviteApp {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl InviteApp {
    /// Bind the page and seed every card.
    ///
    /// `config_json` is an optional `EditorConfig` document; missing fields take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a required page
    /// element is missing.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<InviteApp, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json).map_err(HostError::from)?,
            None => EditorConfig::default(),
        };
        let host = Host::start(config)?;
        Ok(Self { host })
    }

    /// Current editor state as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor is mid-update or serialization fails.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        Ok(self.host.snapshot_json()?)
    }

    /// One-based number of the card being edited.
    #[wasm_bindgen(js_name = currentSlide)]
    #[must_use]
    pub fn current_slide(&self) -> usize {
        self.host.current_slide()
    }

    /// Number of overlays across all cards.
    #[wasm_bindgen(js_name = overlayCount)]
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.host.overlay_count()
    }
}
