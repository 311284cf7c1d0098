//! Page element lookup and DOM geometry.

use std::collections::HashMap;

use invite_core::{CardId, Measure, OverlayId, Point, PointerTarget, Rect, TextOverlay};
use wasm_bindgen::JsCast;
use web_sys::{Document, DomRect, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, MouseEvent};

use crate::error::{HostError, HostResult};

/// Attribute carrying an overlay id on overlay nodes and list rows.
pub const OVERLAY_ID_ATTR: &str = "data-overlay-id";

/// Look up an element by id and cast it.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> HostResult<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HostError::MissingElement(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| HostError::WrongElement(format!("#{id}"), short_type_name::<T>()))
}

/// All elements matching a selector, in document order.
pub fn select_all(document: &Document, selector: &str) -> HostResult<Vec<Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// The page controls the editor drives.
pub struct Controls {
    pub text_input: HtmlInputElement,
    pub add_text: Element,
    pub list: Element,
    pub font_family: HtmlSelectElement,
    pub font_size: HtmlInputElement,
    pub font_size_value: Element,
    pub style_options: Vec<Element>,
    pub color: HtmlInputElement,
    pub align_options: Vec<Element>,
    pub line_height: HtmlInputElement,
    pub line_height_value: Element,
    pub letter_spacing: HtmlInputElement,
    pub letter_spacing_value: Element,
    pub upload_button: Element,
    pub upload_input: HtmlInputElement,
    pub reset: Element,
    pub slide_indicator: Element,
    pub cards: Vec<HtmlElement>,
}

impl Controls {
    /// Bind every control, failing on the first one missing.
    pub fn bind(document: &Document, card_count: usize) -> HostResult<Self> {
        let cards = (0..card_count)
            .map(|i| by_id::<HtmlElement>(document, &format!("card-{}", i + 1)))
            .collect::<HostResult<Vec<_>>>()?;

        Ok(Self {
            text_input: by_id(document, "text-input")?,
            add_text: by_id(document, "add-text-btn")?,
            list: by_id(document, "text-elements-list")?,
            font_family: by_id(document, "font-family")?,
            font_size: by_id(document, "font-size")?,
            font_size_value: by_id(document, "font-size-value")?,
            style_options: select_all(document, ".font-option[data-style]")?,
            color: by_id(document, "text-color")?,
            align_options: select_all(document, ".alignment-option[data-align]")?,
            line_height: by_id(document, "line-height")?,
            line_height_value: by_id(document, "line-height-value")?,
            letter_spacing: by_id(document, "letter-spacing")?,
            letter_spacing_value: by_id(document, "letter-spacing-value")?,
            upload_button: by_id(document, "upload-bg-btn")?,
            upload_input: by_id(document, "bg-image-upload")?,
            reset: by_id(document, "reset-btn")?,
            slide_indicator: by_id(document, "slide-indicator")?,
            cards,
        })
    }

    /// Card element for a card id.
    pub fn card(&self, card: CardId) -> Option<&HtmlElement> {
        self.cards.get(card.index())
    }
}

#[allow(clippy::cast_possible_truncation)] // Client coordinates fit in f32
fn to_rect(rect: &DomRect) -> Rect {
    Rect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Pointer position of a mouse event in client coordinates.
#[allow(clippy::cast_precision_loss)]
pub fn pointer(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f32, event.client_y() as f32)
}

/// Overlay id stored on an element.
pub fn overlay_id(element: &Element) -> HostResult<Option<OverlayId>> {
    element
        .get_attribute(OVERLAY_ID_ATTR)
        .map(|raw| OverlayId::parse(&raw))
        .transpose()
        .map_err(HostError::from)
}

/// Classify the target of a pointer event inside a card.
///
/// Only the overlay node itself counts as its body; the resize handle is a
/// separate target. Anything else yields `None`.
pub fn overlay_target(target: &Element) -> HostResult<Option<PointerTarget>> {
    let classes = target.class_list();
    if classes.contains("resize-handle") {
        let Some(parent) = target.parent_element() else {
            return Ok(None);
        };
        return Ok(overlay_id(&parent)?.map(PointerTarget::ResizeHandle));
    }
    if classes.contains("text-element") {
        return Ok(overlay_id(target)?.map(PointerTarget::Body));
    }
    Ok(None)
}

/// Classify a document-level click that no overlay handled.
///
/// Returns `None` for clicks on overlays or handles.
pub fn outside_target(target: &Element) -> HostResult<Option<PointerTarget>> {
    if target.closest(".text-element")?.is_some() || target.closest(".resize-handle")?.is_some() {
        return Ok(None);
    }
    if target.closest(".aside-main-container")?.is_some() {
        return Ok(Some(PointerTarget::Panel));
    }
    Ok(Some(PointerTarget::Elsewhere))
}

/// [`Measure`] backed by bounding client rectangles.
pub struct DomMeasure<'a> {
    controls: &'a Controls,
    nodes: &'a HashMap<OverlayId, HtmlElement>,
}

impl<'a> DomMeasure<'a> {
    pub fn new(controls: &'a Controls, nodes: &'a HashMap<OverlayId, HtmlElement>) -> Self {
        Self { controls, nodes }
    }
}

impl Measure for DomMeasure<'_> {
    fn card_rect(&self, card: CardId) -> Option<Rect> {
        self.controls
            .card(card)
            .map(|element| to_rect(&element.get_bounding_client_rect()))
    }

    fn overlay_rect(&self, overlay: &TextOverlay) -> Option<Rect> {
        self.nodes
            .get(&overlay.id)
            .map(|element| to_rect(&element.get_bounding_client_rect()))
    }
}
