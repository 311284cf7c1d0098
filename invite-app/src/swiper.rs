//! Binding to the page's Swiper carousel.
//!
//! Only two things are consumed: the loop-aware `realIndex` and the
//! `slideChange` event.

use invite_core::CarouselOptions;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Swiper container selector.
pub const CONTAINER: &str = ".swiper";

#[wasm_bindgen]
extern "C" {
    /// A Swiper instance (global `Swiper` constructor loaded by the page).
    #[derive(Debug, Clone)]
    pub type Swiper;

    #[wasm_bindgen(constructor, catch)]
    fn construct(container: &str, options: &JsValue) -> Result<Swiper, JsValue>;

    /// Real (loop-aware) index of the active slide.
    #[wasm_bindgen(method, getter, js_name = realIndex)]
    pub fn real_index(this: &Swiper) -> u32;

    /// Subscribe to a Swiper event.
    #[wasm_bindgen(method)]
    pub fn on(this: &Swiper, event: &str, handler: &js_sys::Function);
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    el: &'static str,
    clickable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Navigation {
    next_el: &'static str,
    prev_el: &'static str,
}

/// Options object in the shape Swiper expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiperOptions {
    #[serde(rename = "loop")]
    loop_slides: bool,
    slides_per_view: u32,
    centered_slides: bool,
    allow_touch_move: bool,
    pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<Navigation>,
}

impl From<&CarouselOptions> for SwiperOptions {
    fn from(options: &CarouselOptions) -> Self {
        Self {
            loop_slides: options.loop_slides,
            slides_per_view: options.slides_per_view,
            centered_slides: options.centered_slides,
            allow_touch_move: options.allow_touch_move,
            pagination: Pagination {
                el: ".swiper-pagination",
                clickable: options.pagination_clickable,
            },
            navigation: options.navigation.then_some(Navigation {
                next_el: ".swiper-button-next",
                prev_el: ".swiper-button-prev",
            }),
        }
    }
}

impl Swiper {
    /// Create the carousel on [`CONTAINER`].
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be converted or Swiper throws.
    pub fn create(options: &CarouselOptions) -> Result<Self, JsValue> {
        let json = serde_json::to_string(&SwiperOptions::from(options))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let options = js_sys::JSON::parse(&json)?;
        Self::construct(CONTAINER, &options)
    }
}
