//! Binds an [`Editor`] to the page: event wiring in, DOM updates out.
//!
//! Every DOM event is translated into one editor call. The editor reports what
//! changed through its interaction handlers; those reports decide which parts of
//! the page are redrawn.

use std::cell::{Cell, RefCell};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use invite_core::{
    CardId, Editor, EditorConfig, FontStyleCombo, Interaction, InteractionKind, ListEntry,
    OverlayId, PanelCommand, PanelState, PointerTarget, TextAlign, TextOverlay,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, FileReader, HtmlElement, MouseEvent};

use crate::css;
use crate::dom::{self, Controls, DomMeasure, OVERLAY_ID_ATTR};
use crate::error::{HostError, HostResult};
use crate::swiper::Swiper;

/// Parts of the page that need redrawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct Dirty {
    pub overlays: bool,
    pub list: bool,
    pub panel: bool,
    pub backgrounds: bool,
    pub indicator: bool,
}

impl Dirty {
    pub const ALL: Self = Self {
        overlays: true,
        list: true,
        panel: true,
        backgrounds: true,
        indicator: true,
    };

    pub const OVERLAYS: Self = Self {
        overlays: true,
        list: false,
        panel: false,
        backgrounds: false,
        indicator: false,
    };

    pub const PANEL: Self = Self {
        overlays: false,
        list: false,
        panel: true,
        backgrounds: false,
        indicator: false,
    };

    /// Widen the scope for one reported interaction.
    pub fn record(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Select | InteractionKind::Deselect => {
                self.overlays = true;
                self.list = true;
                self.panel = true;
            }
            InteractionKind::DragMove | InteractionKind::ResizeMove => self.overlays = true,
            InteractionKind::DragStart
            | InteractionKind::DragEnd
            | InteractionKind::ResizeStart
            | InteractionKind::ResizeEnd => {}
            InteractionKind::Create | InteractionKind::Delete => {
                self.overlays = true;
                self.list = true;
            }
            InteractionKind::EditContent => {
                self.list = true;
                self.panel = true;
            }
            InteractionKind::Restyle => {
                self.overlays = true;
                self.panel = true;
            }
            InteractionKind::SlideChange => {
                self.overlays = true;
                self.list = true;
                self.indicator = true;
            }
            InteractionKind::Background => self.backgrounds = true,
            InteractionKind::Reset => {
                self.overlays = true;
                self.list = true;
                self.backgrounds = true;
            }
        }
    }

    pub fn is_clean(self) -> bool {
        self == Self::default()
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            overlays: self.overlays || other.overlays,
            list: self.list || other.list,
            panel: self.panel || other.panel,
            backgrounds: self.backgrounds || other.backgrounds,
            indicator: self.indicator || other.indicator,
        }
    }
}

/// Owned copy of what a redraw needs, taken so no editor borrow is held while
/// the DOM is touched (DOM calls can re-enter event handlers).
struct View {
    overlays: Vec<TextOverlay>,
    list: Vec<ListEntry>,
    panel: PanelState,
    backgrounds: Vec<(CardId, Option<String>)>,
    indicator: String,
}

impl View {
    fn capture(editor: &Editor) -> Self {
        Self {
            overlays: editor.registry().iter().cloned().collect(),
            list: editor.side_list(),
            panel: editor.panel().clone(),
            backgrounds: editor
                .cards()
                .iter()
                .map(|c| (c.id, c.background.clone()))
                .collect(),
            indicator: editor.slide_indicator(),
        }
    }
}

struct GestureListeners {
    on_move: Closure<dyn FnMut(Event)>,
    on_up: Closure<dyn FnMut(Event)>,
}

pub(crate) struct Host {
    document: Document,
    editor: RefCell<Editor>,
    pending: Rc<RefCell<Vec<Interaction>>>,
    controls: Controls,
    nodes: RefCell<HashMap<OverlayId, HtmlElement>>,
    swiper: RefCell<Option<Swiper>>,
    swiper_listener: RefCell<Option<Closure<dyn FnMut()>>>,
    gesture: RefCell<Option<GestureListeners>>,
    // Released gesture listeners; dropped when the next gesture starts, never
    // from inside their own invocation.
    retired: RefCell<Option<GestureListeners>>,
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
    redrawing: Cell<bool>,
    queued: Cell<Dirty>,
}

impl Host {
    /// Bind the page and render the seeded editor.
    pub fn start(config: EditorConfig) -> HostResult<Rc<Self>> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(HostError::NoDocument)?;
        let controls = Controls::bind(&document, config.card_count)?;
        let carousel = config.carousel.clone();

        let mut editor = Editor::new(config)?;
        let pending = Rc::new(RefCell::new(Vec::new()));
        for kind in InteractionKind::ALL {
            let sink = Rc::clone(&pending);
            editor.on(kind, move |interaction| sink.borrow_mut().push(*interaction));
        }

        let host = Rc::new(Self {
            document,
            editor: RefCell::new(editor),
            pending,
            controls,
            nodes: RefCell::new(HashMap::new()),
            swiper: RefCell::new(None),
            swiper_listener: RefCell::new(None),
            gesture: RefCell::new(None),
            retired: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            redrawing: Cell::new(false),
            queued: Cell::new(Dirty::default()),
        });

        host.attach_carousel(&carousel);
        host.bind_controls()?;
        host.bind_cards()?;
        host.bind_list()?;
        host.bind_document()?;
        host.flush(Dirty::ALL);
        tracing::info!("Invite editor bound to page");
        Ok(host)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn snapshot_json(&self) -> HostResult<String> {
        let editor = self
            .editor
            .try_borrow()
            .map_err(|_| HostError::Dom("editor is busy".into()))?;
        serde_json::to_string(&editor.snapshot())
            .map_err(|e| HostError::Editor(invite_core::EditorError::from(e)))
    }

    pub fn current_slide(&self) -> usize {
        self.editor
            .try_borrow()
            .map(|e| e.current_card().slide_number())
            .unwrap_or(0)
    }

    pub fn overlay_count(&self) -> usize {
        self.editor.try_borrow().map(|e| e.registry().len()).unwrap_or(0)
    }

    // ========================================================================
    // Wiring
    // ========================================================================

    fn edit<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> Option<R> {
        if let Ok(mut editor) = self.editor.try_borrow_mut() {
            Some(f(&mut editor))
        } else {
            tracing::warn!("Editor busy; event dropped");
            None
        }
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        event: &str,
        handler: impl Fn(&Rc<Self>, Event) + 'static,
    ) -> HostResult<()> {
        let weak = Rc::downgrade(self);
        let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            if let Some(host) = weak.upgrade() {
                handler(&host, e);
            }
        });
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(closure);
        Ok(())
    }

    fn attach_carousel(self: &Rc<Self>, options: &invite_core::CarouselOptions) {
        let swiper = match Swiper::create(options) {
            Ok(swiper) => swiper,
            Err(e) => {
                tracing::warn!("Carousel unavailable, staying on slide 1: {e:?}");
                return;
            }
        };
        let weak = Rc::downgrade(self);
        let on_change = Closure::<dyn FnMut()>::new(move || {
            if let Some(host) = weak.upgrade() {
                host.slide_changed();
            }
        });
        swiper.on("slideChange", on_change.as_ref().unchecked_ref());
        *self.swiper_listener.borrow_mut() = Some(on_change);
        *self.swiper.borrow_mut() = Some(swiper);
    }

    fn slide_changed(self: &Rc<Self>) {
        let Some(real) = self.swiper.borrow().as_ref().map(Swiper::real_index) else {
            return;
        };
        let Ok(real) = usize::try_from(real) else {
            return;
        };
        self.detach_gesture();
        if let Some(Err(e)) = self.edit(|editor| editor.slide_changed(real)) {
            tracing::warn!("Ignoring slide change: {e}");
        }
        self.flush(Dirty::default());
    }

    fn bind_controls(self: &Rc<Self>) -> HostResult<()> {
        let c = &self.controls;

        self.listen(&c.add_text, "click", |host, _| {
            let input = host.controls.text_input.value();
            host.edit(|editor| editor.add_text(&input));
            host.flush(Dirty::PANEL);
        })?;

        self.listen(&c.font_family, "change", |host, _| {
            let value = host.controls.font_family.value();
            host.panel_command(&PanelCommand::FontFamily(value));
        })?;
        self.listen(&c.font_size, "input", |host, _| {
            let value = host.controls.font_size.value();
            host.panel_command(&PanelCommand::FontSize(value));
        })?;
        self.listen(&c.color, "input", |host, _| {
            let value = host.controls.color.value();
            host.panel_command(&PanelCommand::Color(value));
        })?;
        self.listen(&c.line_height, "input", |host, _| {
            let value = host.controls.line_height.value();
            host.panel_command(&PanelCommand::LineHeight(value));
        })?;
        self.listen(&c.letter_spacing, "input", |host, _| {
            let value = host.controls.letter_spacing.value();
            host.panel_command(&PanelCommand::LetterSpacing(value));
        })?;

        for option in &c.style_options {
            let Some(combo) = option.get_attribute("data-style").as_deref().and_then(FontStyleCombo::parse) else {
                tracing::warn!("Style option without a known data-style");
                continue;
            };
            self.listen(option, "click", move |host, _| {
                host.panel_command(&PanelCommand::Style(combo));
            })?;
        }
        for option in &c.align_options {
            let Some(align) = option.get_attribute("data-align").as_deref().and_then(TextAlign::parse) else {
                tracing::warn!("Alignment option without a known data-align");
                continue;
            };
            self.listen(option, "click", move |host, _| {
                host.panel_command(&PanelCommand::Align(align));
            })?;
        }

        self.listen(&c.upload_button, "click", |host, _| {
            host.controls.upload_input.click();
        })?;
        self.listen(&c.upload_input, "change", |host, _| {
            if let Err(e) = host.read_background() {
                tracing::warn!("Background upload failed: {e}");
            }
        })?;

        self.listen(&c.reset, "click", |host, _| {
            host.detach_gesture();
            host.edit(Editor::reset_current_card);
            host.flush(Dirty::default());
        })?;
        Ok(())
    }

    fn panel_command(self: &Rc<Self>, command: &PanelCommand) {
        self.edit(|editor| editor.apply_panel(command));
        self.flush(Dirty::PANEL);
    }

    fn read_background(self: &Rc<Self>) -> HostResult<()> {
        let input = &self.controls.upload_input;
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return Ok(());
        };
        let reader = FileReader::new()?;

        let weak = Rc::downgrade(self);
        let result_reader = reader.clone();
        let on_load = Closure::once_into_js(move |_: Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            match result_reader.result().ok().and_then(|r| r.as_string()) {
                Some(data_url) => {
                    host.edit(|editor| editor.set_background(data_url));
                    host.flush(Dirty::default());
                }
                None => tracing::warn!("File reader produced no data URL"),
            }
        });
        let on_error = Closure::once_into_js(move |_: Event| {
            tracing::warn!("Could not read the selected image");
        });
        reader.set_onload(Some(on_load.unchecked_ref()));
        reader.set_onerror(Some(on_error.unchecked_ref()));
        reader.read_as_data_url(&file)?;

        // Allow the same file to be picked again.
        input.set_value("");
        Ok(())
    }

    fn bind_cards(self: &Rc<Self>) -> HostResult<()> {
        for card in &self.controls.cards {
            self.listen(card, "mousedown", |host, e| host.card_mouse_down(&e))?;
            self.listen(card, "click", |host, e| host.card_click(&e))?;
            self.listen(card, "input", |host, e| host.card_input(&e))?;
            self.listen(card, "focusout", |host, e| host.card_focus_out(&e))?;
        }
        Ok(())
    }

    fn bind_list(self: &Rc<Self>) -> HostResult<()> {
        let list = self.controls.list.clone();
        self.listen(&list, "click", |host, e| {
            // Rows are rebuilt on every change; keep the document handler from
            // seeing a detached target.
            e.stop_propagation();
            let Some(target) = event_element(&e) else {
                return;
            };
            let row = match target.closest(".text-element-item") {
                Ok(Some(row)) => row,
                _ => return,
            };
            let id = match dom::overlay_id(&row) {
                Ok(Some(id)) => id,
                Ok(None) => return,
                Err(e) => {
                    tracing::warn!("List row: {e}");
                    return;
                }
            };
            let delete = matches!(target.closest(".delete-text"), Ok(Some(_)));
            if delete {
                host.detach_gesture_for(id);
                host.edit(|editor| editor.delete(id));
            } else {
                host.edit(|editor| editor.select(id));
            }
            host.flush(Dirty::default());
        })
    }

    fn bind_document(self: &Rc<Self>) -> HostResult<()> {
        let document = self.document.clone();
        self.listen(&document, "click", |host, e| {
            let Some(target) = event_element(&e) else {
                return;
            };
            match dom::outside_target(&target) {
                Ok(Some(target)) => {
                    host.edit(|editor| editor.click(target));
                    host.flush(Dirty::default());
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Click target: {e}"),
            }
        })
    }

    // ========================================================================
    // Overlay events
    // ========================================================================

    fn card_mouse_down(self: &Rc<Self>, event: &Event) {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let target = match event_element(event).map(|t| dom::overlay_target(&t)) {
            Some(Ok(Some(target))) => target,
            Some(Err(e)) => {
                tracing::warn!("Pointer target: {e}");
                return;
            }
            _ => return,
        };
        if matches!(target, PointerTarget::ResizeHandle(_)) {
            event.stop_propagation();
        }
        event.prevent_default();

        let started = {
            let nodes = self.nodes.borrow();
            let measure = DomMeasure::new(&self.controls, &nodes);
            self.edit(|editor| editor.pointer_down(target, dom::pointer(mouse), &measure))
        };
        if started == Some(true) {
            if let Err(e) = self.attach_gesture() {
                tracing::warn!("Could not track the gesture: {e}");
                self.edit(Editor::pointer_up);
            }
        }
        self.flush(Dirty::default());
    }

    fn card_click(self: &Rc<Self>, event: &Event) {
        let Some(Ok(Some(target @ PointerTarget::Body(id)))) =
            event_element(event).map(|t| dom::overlay_target(&t))
        else {
            return;
        };
        self.edit(|editor| editor.click(target));
        self.flush(Dirty::OVERLAYS);

        let editing = self
            .editor
            .try_borrow()
            .ok()
            .and_then(|e| e.registry().get(id).map(|o| o.editing))
            .unwrap_or(false);
        if editing {
            let node = self.nodes.borrow().get(&id).cloned();
            if let Some(node) = node {
                if let Err(e) = node.focus() {
                    tracing::debug!("Focus failed: {e:?}");
                }
            }
        }
    }

    fn card_input(self: &Rc<Self>, event: &Event) {
        let Some((id, node)) = self.event_overlay(event) else {
            return;
        };
        let text = node.text_content().unwrap_or_default();
        self.edit(|editor| editor.edit_content(id, text));
        self.flush(Dirty::default());
    }

    fn card_focus_out(self: &Rc<Self>, event: &Event) {
        let Some((id, _)) = self.event_overlay(event) else {
            return;
        };
        self.edit(|editor| editor.end_editing(id));
        self.flush(Dirty::OVERLAYS);
    }

    fn event_overlay(&self, event: &Event) -> Option<(OverlayId, Element)> {
        let node = event_element(event)?.closest(".text-element").ok()??;
        let id = dom::overlay_id(&node).ok()??;
        Some((id, node))
    }

    // ========================================================================
    // Gesture listeners
    // ========================================================================

    /// Listen for moves and the release on the whole document while a gesture runs.
    fn attach_gesture(self: &Rc<Self>) -> HostResult<()> {
        self.retired.borrow_mut().take();
        self.detach_gesture();

        let weak: Weak<Self> = Rc::downgrade(self);
        let on_move = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let (Some(host), Some(mouse)) = (weak.upgrade(), e.dyn_ref::<MouseEvent>()) else {
                return;
            };
            let moved = {
                let nodes = host.nodes.borrow();
                let measure = DomMeasure::new(&host.controls, &nodes);
                host.edit(|editor| editor.pointer_move(dom::pointer(mouse), &measure))
            };
            if moved == Some(true) {
                host.flush(Dirty::default());
            }
        });

        let weak: Weak<Self> = Rc::downgrade(self);
        let on_up = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            host.edit(Editor::pointer_up);
            host.detach_gesture();
            host.flush(Dirty::default());
        });

        self.document
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        self.document
            .add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
        *self.gesture.borrow_mut() = Some(GestureListeners { on_move, on_up });
        Ok(())
    }

    fn detach_gesture(&self) {
        let Some(listeners) = self.gesture.borrow_mut().take() else {
            return;
        };
        let doc = &self.document;
        let _ = doc.remove_event_listener_with_callback("mousemove", listeners.on_move.as_ref().unchecked_ref());
        let _ = doc.remove_event_listener_with_callback("mouseup", listeners.on_up.as_ref().unchecked_ref());
        *self.retired.borrow_mut() = Some(listeners);
    }

    fn detach_gesture_for(&self, id: OverlayId) {
        let running = self
            .editor
            .try_borrow()
            .map(|e| e.gesture().overlay() == Some(id))
            .unwrap_or(false);
        if running {
            self.detach_gesture();
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Redraw whatever the pending interactions (plus `dirty`) touched.
    ///
    /// DOM updates can fire handlers synchronously (a removed or non-editable
    /// node loses focus); a flush requested meanwhile is queued and handled by
    /// the outer loop.
    fn flush(self: &Rc<Self>, dirty: Dirty) {
        self.queued.set(self.queued.get().merge(dirty));
        if self.redrawing.replace(true) {
            return;
        }
        loop {
            let mut dirty = self.queued.take();
            for interaction in self.pending.borrow_mut().drain(..) {
                dirty.record(interaction.kind);
            }
            if dirty.is_clean() {
                break;
            }
            let view = match self.editor.try_borrow() {
                Ok(editor) => View::capture(&editor),
                Err(_) => {
                    tracing::warn!("Editor busy; redraw skipped");
                    break;
                }
            };
            if let Err(e) = self.redraw(dirty, &view) {
                tracing::warn!("Redraw failed: {e}");
            }
        }
        self.redrawing.set(false);
    }

    fn redraw(&self, dirty: Dirty, view: &View) -> HostResult<()> {
        if dirty.overlays {
            self.sync_overlays(&view.overlays)?;
        }
        if dirty.list {
            self.sync_list(&view.list)?;
        }
        if dirty.panel {
            self.sync_panel(&view.panel)?;
        }
        if dirty.backgrounds {
            self.sync_backgrounds(&view.backgrounds)?;
        }
        if dirty.indicator {
            self.controls.slide_indicator.set_text_content(Some(&view.indicator));
        }
        Ok(())
    }

    fn sync_overlays(&self, overlays: &[TextOverlay]) -> HostResult<()> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.retain(|id, node| {
            let keep = overlays.iter().any(|o| o.id == *id);
            if !keep {
                node.remove();
            }
            keep
        });

        for overlay in overlays {
            let node = match nodes.entry(overlay.id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.create_node(overlay)?),
            };
            self.apply_overlay(node, overlay)?;
        }
        Ok(())
    }

    fn create_node(&self, overlay: &TextOverlay) -> HostResult<HtmlElement> {
        let node = self
            .document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| HostError::WrongElement("div".into(), "HtmlElement"))?;
        node.set_class_name("text-element");
        node.set_attribute(OVERLAY_ID_ATTR, &overlay.id.to_string())?;
        node.set_text_content(Some(&overlay.content));

        let card = self
            .controls
            .card(overlay.card())
            .ok_or_else(|| HostError::MissingElement(overlay.card().to_string()))?;
        card.append_child(&node)?;
        tracing::debug!("Created node for overlay {} on {}", overlay.id, overlay.card());
        Ok(node)
    }

    fn apply_overlay(&self, node: &HtmlElement, overlay: &TextOverlay) -> HostResult<()> {
        let style = node.style();
        for (name, value) in css::declarations(overlay) {
            style.set_property(name, &value)?;
        }
        let classes = node.class_list();
        classes.toggle_with_force("active", overlay.active)?;
        classes.toggle_with_force("editing", overlay.editing)?;
        node.set_content_editable(if overlay.editing { "true" } else { "false" });

        // In-place editing can delete the handle along with the text.
        if node.query_selector(".resize-handle")?.is_none() {
            let handle = self.document.create_element("div")?;
            handle.set_class_name("resize-handle");
            node.append_child(&handle)?;
        }
        Ok(())
    }

    fn sync_list(&self, entries: &[ListEntry]) -> HostResult<()> {
        let list = &self.controls.list;
        list.set_inner_html("");
        for entry in entries {
            let row = self.document.create_element("div")?;
            row.set_class_name(css::list_item_class(entry.active));
            row.set_attribute(OVERLAY_ID_ATTR, &entry.id.to_string())?;

            let preview = self.document.create_element("span")?;
            preview.set_text_content(Some(&entry.preview));
            let delete = self.document.create_element("span")?;
            delete.set_class_name("delete-text");
            delete.set_text_content(Some("Delete"));

            row.append_child(&preview)?;
            row.append_child(&delete)?;
            list.append_child(&row)?;
        }
        Ok(())
    }

    fn sync_panel(&self, panel: &PanelState) -> HostResult<()> {
        let c = &self.controls;
        c.text_input.set_value(&panel.text);
        c.font_family.set_value(&panel.font_family);
        c.font_size.set_value(&panel.font_size.to_string());
        c.font_size_value.set_text_content(Some(&panel.font_size_label));
        c.color.set_value(&panel.color);
        c.line_height.set_value(&panel.line_height.to_string());
        c.line_height_value.set_text_content(Some(&panel.line_height_label));
        c.letter_spacing.set_value(&panel.letter_spacing.to_string());
        c.letter_spacing_value.set_text_content(Some(&panel.letter_spacing_label));

        for option in &c.style_options {
            let marked = option.get_attribute("data-style").as_deref() == Some(panel.style.data_attr());
            option.class_list().toggle_with_force("active", marked)?;
        }
        for option in &c.align_options {
            let marked = option.get_attribute("data-align").as_deref() == Some(panel.align.as_css());
            option.class_list().toggle_with_force("active", marked)?;
        }
        Ok(())
    }

    fn sync_backgrounds(&self, backgrounds: &[(CardId, Option<String>)]) -> HostResult<()> {
        for (card, background) in backgrounds {
            if let Some(element) = self.controls.card(*card) {
                element
                    .style()
                    .set_property("background-image", &css::background_image(background.as_deref()))?;
            }
        }
        Ok(())
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}
