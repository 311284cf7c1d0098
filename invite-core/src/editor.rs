//! The editor controller - the only mutation surface for editor state.

use serde::Serialize;

use crate::gesture::dragged_position;
use crate::{
    Card, CardId, Cards, Centering, EditorConfig, EditorResult, Extent, Gesture, GestureEngine,
    Interaction, InteractionHandlers, InteractionKind, Length, Measure, OverlayId,
    OverlayRegistry, PanelCommand, PanelState, Point, PointerTarget, Selection,
    SelectionController, StyleOverrides, TextOverlay,
};

/// One row of the side list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    /// Overlay the row stands for.
    pub id: OverlayId,
    /// Truncated content.
    pub preview: String,
    /// Whether the overlay is the active one.
    pub active: bool,
}

/// Read-only view of the whole editor state.
#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot<'a> {
    /// Visible card.
    pub current_card: CardId,
    /// Current selection.
    pub selection: Selection,
    /// Gesture in progress.
    pub gesture: Gesture,
    /// Every card.
    pub cards: Vec<&'a Card>,
    /// Every overlay in creation order.
    pub overlays: Vec<&'a TextOverlay>,
    /// Panel controls.
    pub panel: &'a PanelState,
}

/// Interactive editing state for a set of cards.
///
/// Owns the registry, the selection, the gesture engine and the panel model. All
/// methods are synchronous and meant to be called from input event handlers.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    cards: Cards,
    registry: OverlayRegistry,
    selection: SelectionController,
    gestures: GestureEngine,
    panel: PanelState,
    current: CardId,
    handlers: InteractionHandlers,
}

impl Default for Editor {
    fn default() -> Self {
        Self::build(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor and seed every card with its default overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        let mut editor = Self {
            cards: Cards::new(config.card_count),
            registry: OverlayRegistry::new(config.default_style.clone()),
            selection: SelectionController::new(),
            gestures: GestureEngine::new(config.resize_limits),
            panel: PanelState::default(),
            current: CardId::new(0),
            handlers: InteractionHandlers::new(),
            config,
        };
        editor.seed_all();
        editor
    }

    fn seed_all(&mut self) {
        let ids: Vec<CardId> = self.cards.iter().map(|c| c.id).collect();
        for card in ids {
            let text = self.config.seed_texts[card.index()].clone();
            let overrides = self.config.initial_seed(card.index());
            self.registry.create(text, card, &overrides);
        }
        tracing::info!("Seeded {} cards", self.cards.len());
    }

    // --- Accessors ---

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// All cards.
    #[must_use]
    pub fn cards(&self) -> &Cards {
        &self.cards
    }

    /// The overlay registry.
    #[must_use]
    pub fn registry(&self) -> &OverlayRegistry {
        &self.registry
    }

    /// Panel controls.
    #[must_use]
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// The visible card.
    #[must_use]
    pub fn current_card(&self) -> CardId {
        self.current
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection.state()
    }

    /// The active overlay, if any.
    #[must_use]
    pub fn active_overlay(&self) -> Option<&TextOverlay> {
        self.selection.active().and_then(|id| self.registry.get(id))
    }

    /// Gesture in progress.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gestures.gesture()
    }

    /// Overlays on the visible card in creation order.
    pub fn visible_overlays(&self) -> impl Iterator<Item = &TextOverlay> {
        self.registry.list(self.current)
    }

    /// Side list rows for the visible card.
    #[must_use]
    pub fn side_list(&self) -> Vec<ListEntry> {
        let active = self.selection.active();
        self.visible_overlays()
            .map(|o| ListEntry {
                id: o.id,
                preview: o.preview(self.config.preview_chars),
                active: Some(o.id) == active,
            })
            .collect()
    }

    /// Text for the slide indicator.
    #[must_use]
    pub fn slide_indicator(&self) -> String {
        format!("Editing: Slide {}", self.current.slide_number())
    }

    /// Read-only view of everything, for logging and inspection.
    #[must_use]
    pub fn snapshot(&self) -> EditorSnapshot<'_> {
        EditorSnapshot {
            current_card: self.current,
            selection: self.selection.state(),
            gesture: self.gestures.gesture(),
            cards: self.cards.iter().collect(),
            overlays: self.registry.iter().collect(),
            panel: &self.panel,
        }
    }

    // --- Handlers ---

    /// Register a handler for one interaction kind.
    pub fn on(&mut self, kind: InteractionKind, handler: impl FnMut(&Interaction) + 'static) {
        self.handlers.on(kind, handler);
    }

    fn emit(&mut self, kind: InteractionKind, overlay: Option<OverlayId>) {
        let interaction = Interaction {
            kind,
            overlay,
            card: self.current,
        };
        self.handlers.dispatch(&interaction);
    }

    // --- Registry ---

    /// Create an overlay on any card.
    pub fn create_overlay(
        &mut self,
        text: impl Into<String>,
        card: CardId,
        overrides: &StyleOverrides,
    ) -> OverlayId {
        let id = self.registry.create(text, card, overrides);
        self.emit(InteractionKind::Create, Some(id));
        id
    }

    /// Add-text button: create an overlay on the visible card and select it.
    ///
    /// Blank input falls back to the placeholder text. The panel's text input is
    /// cleared afterwards.
    pub fn add_text(&mut self, input: &str) -> OverlayId {
        let trimmed = input.trim();
        let text = if trimmed.is_empty() {
            self.config.placeholder_text.clone()
        } else {
            trimmed.to_string()
        };
        let id = self.create_overlay(text, self.current, &StyleOverrides::default());
        self.select(id);
        self.panel.text.clear();
        id
    }

    /// Delete an overlay. Deleting the active overlay clears the selection.
    ///
    /// Returns whether anything was deleted.
    pub fn delete(&mut self, id: OverlayId) -> bool {
        if let Err(e) = self.registry.remove(id) {
            tracing::warn!("Ignoring delete: {e}");
            return false;
        }
        if self.gestures.gesture().overlay() == Some(id) {
            self.gestures.end();
        }
        if self.selection.forget(id) {
            self.selection.deselect(&mut self.registry);
            self.emit(InteractionKind::Deselect, Some(id));
        }
        self.emit(InteractionKind::Delete, Some(id));
        true
    }

    // --- Selection ---

    /// Make `id` the active overlay and refresh the panel from it.
    ///
    /// Returns whether the overlay exists.
    pub fn select(&mut self, id: OverlayId) -> bool {
        if let Err(e) = self.selection.select(&mut self.registry, id) {
            tracing::warn!("Ignoring select: {e}");
            return false;
        }
        if let Some(overlay) = self.registry.get(id) {
            self.panel.refresh(overlay);
        }
        self.emit(InteractionKind::Select, Some(id));
        true
    }

    /// Clear the selection. The panel keeps its values.
    pub fn deselect(&mut self) {
        let previous = self.selection.active();
        self.selection.deselect(&mut self.registry);
        if previous.is_some() {
            self.emit(InteractionKind::Deselect, previous);
        }
    }

    /// Select an overlay and put it into edit-in-place mode.
    pub fn begin_editing(&mut self, id: OverlayId) -> bool {
        if !self.select(id) {
            return false;
        }
        if let Some(overlay) = self.registry.get_mut(id) {
            overlay.editing = true;
        }
        true
    }

    /// Leave edit-in-place mode (blur). The selection is kept.
    pub fn end_editing(&mut self, id: OverlayId) {
        if let Some(overlay) = self.registry.get_mut(id) {
            overlay.editing = false;
        }
    }

    /// Replace an overlay's text after an in-place edit.
    pub fn edit_content(&mut self, id: OverlayId, text: impl Into<String>) -> bool {
        let Some(overlay) = self.registry.get_mut(id) else {
            tracing::warn!("Ignoring edit of unknown overlay {id}");
            return false;
        };
        overlay.content = text.into();
        if self.selection.active() == Some(id) {
            self.panel.refresh(overlay);
        }
        self.emit(InteractionKind::EditContent, Some(id));
        true
    }

    /// A completed click: bodies enter edit mode, clicks outside deselect.
    pub fn click(&mut self, target: PointerTarget) {
        match target {
            PointerTarget::Body(id) => {
                self.begin_editing(id);
            }
            PointerTarget::Elsewhere => self.deselect(),
            PointerTarget::ResizeHandle(_) | PointerTarget::Panel => {}
        }
    }

    // --- Gestures ---

    /// Pointer pressed. Starts a drag on a body or a resize on a handle.
    ///
    /// Returns whether a gesture started; the host should only listen for moves
    /// and releases while one is running.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point, measure: &dyn Measure) -> bool {
        let (id, resize) = match target {
            PointerTarget::Body(id) => (id, false),
            PointerTarget::ResizeHandle(id) => (id, true),
            PointerTarget::Panel | PointerTarget::Elsewhere => return false,
        };
        if self.gestures.is_active() || !self.select(id) {
            return false;
        }
        let Some(rect) = self.registry.get(id).and_then(|o| measure.overlay_rect(o)) else {
            tracing::warn!("Overlay {id} has no rendered bounds; gesture not started");
            return false;
        };

        let kind = if resize {
            self.gestures.begin_resize(id, pointer, rect);
            InteractionKind::ResizeStart
        } else {
            self.gestures.begin_drag(id, pointer, rect);
            InteractionKind::DragStart
        };
        tracing::debug!("{kind:?} on overlay {id}");
        self.emit(kind, Some(id));
        true
    }

    /// Pointer moved during a gesture. Returns whether geometry changed.
    pub fn pointer_move(&mut self, pointer: Point, measure: &dyn Measure) -> bool {
        let gesture = self.gestures.gesture();
        let Some(id) = gesture.overlay() else {
            return false;
        };
        if self.selection.active() != Some(id) {
            return false;
        }
        let Some(overlay) = self.registry.get(id) else {
            return false;
        };

        match gesture {
            Gesture::Idle => false,
            Gesture::Dragging { offset, .. } => {
                let (Some(card), Some(rect)) =
                    (measure.card_rect(overlay.card()), measure.overlay_rect(overlay))
                else {
                    return false;
                };
                let position = dragged_position(offset, pointer, card, rect.size());
                if let Some(overlay) = self.registry.get_mut(id) {
                    overlay.geometry.left = Length::Px(position.x);
                    overlay.geometry.top = Length::Px(position.y);
                    overlay.geometry.centering = Centering::None;
                }
                self.emit(InteractionKind::DragMove, Some(id));
                true
            }
            Gesture::Resizing {
                start_size,
                start_pointer,
                ..
            } => {
                let size = self.gestures.resized(start_size, start_pointer, pointer);
                if let Some(overlay) = self.registry.get_mut(id) {
                    overlay.geometry.width = Extent::Px(size.width);
                    overlay.geometry.height = Extent::Px(size.height);
                }
                self.emit(InteractionKind::ResizeMove, Some(id));
                true
            }
        }
    }

    /// Pointer released. Ends any gesture; returns whether one was running.
    pub fn pointer_up(&mut self) -> bool {
        let kind = match self.gestures.end() {
            Gesture::Idle => return false,
            Gesture::Dragging { overlay, .. } => (InteractionKind::DragEnd, overlay),
            Gesture::Resizing { overlay, .. } => (InteractionKind::ResizeEnd, overlay),
        };
        tracing::debug!("{:?} on overlay {}", kind.0, kind.1);
        self.emit(kind.0, Some(kind.1));
        true
    }

    // --- Panel ---

    /// Apply a panel control edit to the active overlay.
    ///
    /// Returns whether the active overlay's style changed.
    pub fn apply_panel(&mut self, command: &PanelCommand) -> bool {
        let active = self.selection.active();
        let target = active.and_then(|id| self.registry.get_mut(id));
        let changed = self.panel.apply(command, target);
        if changed {
            self.emit(InteractionKind::Restyle, active);
        }
        changed
    }

    // --- Cards ---

    /// The carousel moved to another slide.
    ///
    /// # Errors
    ///
    /// Returns an error if `real_index` has no card; nothing changes in that case.
    pub fn slide_changed(&mut self, real_index: usize) -> EditorResult<()> {
        let card = self.cards.id(real_index)?;
        self.gestures.end();
        self.deselect();
        self.current = card;
        tracing::info!("{}", self.slide_indicator());
        self.emit(InteractionKind::SlideChange, None);
        Ok(())
    }

    /// Apply an uploaded background to the card visible now.
    ///
    /// Uploads finish asynchronously; if the user switched slides meanwhile the
    /// image lands on the newly visible card.
    pub fn set_background(&mut self, data_url: impl Into<String>) -> CardId {
        let card = self.current;
        self.cards.set_background(card, Some(data_url.into()));
        tracing::info!("Image uploaded to card {}", card.slide_number());
        self.emit(InteractionKind::Background, None);
        card
    }

    /// Reset the visible card: drop its overlays and background, then recreate its
    /// seed overlay. Other cards are untouched.
    pub fn reset_current_card(&mut self) -> OverlayId {
        let card = self.current;
        let removed = self.registry.remove_card(card);
        for overlay in &removed {
            self.selection.forget(overlay.id);
            if self.gestures.gesture().overlay() == Some(overlay.id) {
                self.gestures.end();
            }
        }
        self.cards.set_background(card, None);
        self.deselect();

        let text = self.config.seed_texts[card.index()].clone();
        let overrides = self.config.reset_seed();
        let id = self.registry.create(text, card, &overrides);
        tracing::info!(
            "Reset card {} ({} overlays removed)",
            card.slide_number(),
            removed.len()
        );
        self.emit(InteractionKind::Reset, Some(id));
        id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{FontStyleCombo, StaticLayout, TextAlign};

    fn layout() -> StaticLayout {
        StaticLayout::new(400.0, 600.0)
    }

    #[test]
    fn new_editor_seeds_each_card_once() {
        let editor = Editor::default();
        for card in editor.cards().iter() {
            let overlays: Vec<_> = editor.registry().list(card.id).collect();
            assert_eq!(overlays.len(), 1);
            assert_eq!(overlays[0].content, editor.config().seed_texts[card.id.index()]);
            assert_eq!(overlays[0].style.font_family, "'Playfair Display', serif");
            assert_eq!(overlays[0].geometry.centering, Centering::Horizontal);
        }
        assert_eq!(editor.selection(), Selection::Idle);
    }

    #[test]
    fn seed_tops_step_by_card() {
        let editor = Editor::default();
        let tops: Vec<_> = editor.registry().iter().map(|o| o.geometry.top).collect();
        assert_eq!(
            tops,
            vec![Length::Percent(40.0), Length::Percent(55.0), Length::Percent(70.0)]
        );
    }

    #[test]
    fn add_text_uses_placeholder_and_selects() {
        let mut editor = Editor::default();
        let id = editor.add_text("   ");
        let overlay = editor.active_overlay().expect("active");
        assert_eq!(overlay.id, id);
        assert_eq!(overlay.content, "Your text here");
        assert_eq!(overlay.style.font_family, "'Open Sans', sans-serif");
        assert!((overlay.style.font_size - 16.0).abs() < f32::EPSILON);
        assert!(editor.panel().text.is_empty());
    }

    #[test]
    fn add_text_trims_input() {
        let mut editor = Editor::default();
        editor.add_text("  RSVP by June  ");
        assert_eq!(editor.active_overlay().map(|o| o.content.as_str()), Some("RSVP by June"));
    }

    #[test]
    fn click_body_enters_edit_mode_and_click_outside_deselects() {
        let mut editor = Editor::default();
        let id = editor.visible_overlays().next().expect("seed").id;

        editor.click(PointerTarget::Body(id));
        assert!(editor.active_overlay().is_some_and(|o| o.editing && o.active));

        editor.end_editing(id);
        assert!(editor.active_overlay().is_some_and(|o| !o.editing));

        editor.click(PointerTarget::Panel);
        assert!(editor.active_overlay().is_some());

        editor.click(PointerTarget::Elsewhere);
        assert!(editor.active_overlay().is_none());
    }

    #[test]
    fn edit_content_refreshes_panel_for_active_only() {
        let mut editor = Editor::default();
        let id = editor.visible_overlays().next().expect("seed").id;
        editor.select(id);

        editor.edit_content(id, "Updated");
        assert_eq!(editor.panel().text, "Updated");
    }

    #[test]
    fn drag_clears_centering_and_clamps() {
        let mut editor = Editor::default();
        let layout = layout();
        let id = editor.visible_overlays().next().expect("seed").id;
        let rect = editor
            .registry()
            .get(id)
            .and_then(|o| layout.overlay_rect(o))
            .expect("rect");

        assert!(editor.pointer_down(PointerTarget::Body(id), rect.origin(), &layout));
        assert!(editor.pointer_move(Point::new(-500.0, 10_000.0), &layout));
        let geometry = editor.registry().get(id).expect("overlay").geometry;
        assert_eq!(geometry.centering, Centering::None);
        assert_eq!(geometry.left, Length::Px(0.0));
        assert_eq!(geometry.top, Length::Px(600.0 - rect.height));

        assert!(editor.pointer_up());
        assert!(!editor.pointer_move(Point::new(10.0, 10.0), &layout));
    }

    #[test]
    fn resize_handle_does_not_drag() {
        let mut editor = Editor::default();
        let layout = layout();
        let id = editor.visible_overlays().next().expect("seed").id;
        let before = editor.registry().get(id).expect("overlay").geometry;

        assert!(editor.pointer_down(PointerTarget::ResizeHandle(id), Point::new(300.0, 300.0), &layout));
        assert!(editor.pointer_move(Point::new(-1000.0, -1000.0), &layout));
        let after = editor.registry().get(id).expect("overlay").geometry;

        assert_eq!(after.left, before.left);
        assert_eq!(after.top, before.top);
        assert_eq!(after.centering, before.centering);
        assert_eq!(after.width, Extent::Px(60.0));
        assert_eq!(after.height, Extent::Px(30.0));
        assert!(matches!(editor.gesture(), Gesture::Resizing { .. }));
    }

    #[test]
    fn pointer_down_elsewhere_starts_nothing() {
        let mut editor = Editor::default();
        assert!(!editor.pointer_down(PointerTarget::Elsewhere, Point::default(), &layout()));
        assert!(!editor.pointer_up());
    }

    #[test]
    fn panel_edits_are_inert_without_selection() {
        let mut editor = Editor::default();
        let before: Vec<_> = editor.registry().iter().map(|o| o.style.clone()).collect();

        assert!(!editor.apply_panel(&PanelCommand::Style(FontStyleCombo::Bold)));
        assert!(!editor.apply_panel(&PanelCommand::Align(TextAlign::Left)));
        assert!(!editor.apply_panel(&PanelCommand::FontSize("40".into())));

        let after: Vec<_> = editor.registry().iter().map(|o| o.style.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(editor.panel().font_size_label, "40px");
    }

    #[test]
    fn panel_edits_reach_active_overlay() {
        let mut editor = Editor::default();
        let id = editor.add_text("Dinner at eight");
        assert!(editor.apply_panel(&PanelCommand::Style(FontStyleCombo::BoldItalic)));
        assert_eq!(
            editor.registry().get(id).map(|o| o.style.combo()),
            Some(FontStyleCombo::BoldItalic)
        );
    }

    #[test]
    fn delete_unknown_is_noop() {
        let mut editor = Editor::default();
        let count = editor.registry().len();
        assert!(!editor.delete(OverlayId::new()));
        assert_eq!(editor.registry().len(), count);
    }

    #[test]
    fn slide_change_out_of_range_is_rejected() {
        let mut editor = Editor::default();
        assert!(editor.slide_changed(9).is_err());
        assert_eq!(editor.current_card().index(), 0);
    }

    #[test]
    fn background_follows_visible_card_at_completion() {
        let mut editor = Editor::default();
        // Upload started on slide 1, finished after switching to slide 2.
        editor.slide_changed(1).expect("slide");
        let card = editor.set_background("data:image/png;base64,AAAA");
        assert_eq!(card.index(), 1);
        assert!(editor.cards().get(card).and_then(|c| c.background.as_ref()).is_some());
    }

    #[test]
    fn handlers_see_gesture_sequence() {
        let mut editor = Editor::default();
        let layout = layout();
        let kinds = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            InteractionKind::Select,
            InteractionKind::DragStart,
            InteractionKind::DragMove,
            InteractionKind::DragEnd,
        ] {
            let sink = Rc::clone(&kinds);
            editor.on(kind, move |i| sink.borrow_mut().push(i.kind));
        }

        let id = editor.visible_overlays().next().expect("seed").id;
        editor.pointer_down(PointerTarget::Body(id), Point::new(200.0, 250.0), &layout);
        editor.pointer_move(Point::new(210.0, 260.0), &layout);
        editor.pointer_up();

        assert_eq!(
            *kinds.borrow(),
            vec![
                InteractionKind::Select,
                InteractionKind::DragStart,
                InteractionKind::DragMove,
                InteractionKind::DragEnd,
            ]
        );
    }

    #[test]
    fn snapshot_serializes() {
        let editor = Editor::default();
        let json = serde_json::to_string(&editor.snapshot()).expect("serialize");
        assert!(json.contains("Playfair Display"));
    }
}
