//! Script execution against a headless editor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;

use invite_core::{
    Carousel, Editor, EditorConfig, EditorSnapshot, InteractionKind, Measure, OverlayId, Point,
    PointerTarget, Rect, Selection, StaticLayout,
};
use serde::Serialize;

use crate::{ReplayError, Script, Step, Target};

/// How many steps ran and how many were skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Steps applied.
    pub applied: usize,
    /// Steps that could not be applied.
    pub skipped: usize,
}

/// Number of times one interaction kind was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindCount {
    /// Interaction kind.
    pub kind: InteractionKind,
    /// Times reported.
    pub count: usize,
}

/// Everything printed after a replay.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Step tally.
    pub outcome: Outcome,
    /// Reported interactions, in kind order, zero counts omitted.
    pub interactions: Vec<KindCount>,
    /// Final editor state.
    pub state: EditorSnapshot<'a>,
}

/// An editor, its carousel position and fixed card geometry.
pub struct Replay {
    editor: Editor,
    carousel: Carousel,
    layout: StaticLayout,
    counts: Rc<RefCell<HashMap<InteractionKind, usize>>>,
}

impl Replay {
    /// Seed an editor and start tallying its interactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: EditorConfig, layout: StaticLayout) -> Result<Self, ReplayError> {
        let carousel = Carousel::new(config.card_count, &config.carousel);
        let mut editor = Editor::new(config)?;

        let counts = Rc::new(RefCell::new(HashMap::new()));
        for kind in InteractionKind::ALL {
            let sink = Rc::clone(&counts);
            editor.on(kind, move |interaction| {
                *sink.borrow_mut().entry(interaction.kind).or_insert(0) += 1;
            });
        }

        Ok(Self {
            editor,
            carousel,
            layout,
            counts,
        })
    }

    /// The editor being driven.
    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Times `kind` has been reported so far.
    #[must_use]
    pub fn count(&self, kind: InteractionKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    /// Run every step of a script.
    ///
    /// Steps that cannot be applied are logged and skipped, or end the run when
    /// `strict` is set.
    ///
    /// # Errors
    ///
    /// In strict mode, returns the first step error.
    pub fn run(&mut self, script: &Script, strict: bool) -> Result<Outcome, ReplayError> {
        let mut outcome = Outcome::default();
        for (n, step) in script.steps.iter().enumerate() {
            match self.step(step) {
                Ok(()) => outcome.applied += 1,
                Err(e) if !strict => {
                    tracing::warn!("Step {} skipped: {e}", n + 1);
                    outcome.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(
            "Replayed {} steps ({} skipped)",
            outcome.applied,
            outcome.skipped
        );
        Ok(outcome)
    }

    /// Apply one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the step names something that does not exist.
    pub fn step(&mut self, step: &Step) -> Result<(), ReplayError> {
        tracing::debug!("{step:?}");
        match step {
            Step::AddText { text } => {
                self.editor.add_text(text);
            }
            Step::Select { overlay } => {
                let id = self.visible(*overlay)?;
                self.editor.select(id);
            }
            Step::Delete { overlay } => {
                let id = self.visible(*overlay)?;
                self.editor.delete(id);
            }
            Step::Click { on } => {
                let target = self.target(*on)?;
                self.editor.click(target);
            }
            Step::EditContent { overlay, text } => {
                let id = self.visible(*overlay)?;
                self.editor.begin_editing(id);
                self.editor.edit_content(id, text.clone());
                self.editor.end_editing(id);
            }
            Step::PointerDown { on, x, y } => {
                let target = self.target(*on)?;
                let pointer = self.client(*x, *y);
                self.editor.pointer_down(target, pointer, &self.layout);
            }
            Step::PointerMove { x, y } => {
                let pointer = self.client(*x, *y);
                self.editor.pointer_move(pointer, &self.layout);
            }
            Step::PointerUp => {
                self.editor.pointer_up();
            }
            Step::Drag { overlay, dx, dy } => {
                let id = self.visible(*overlay)?;
                let rect = self.rect(id)?;
                let grab = Point::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
                self.gesture(PointerTarget::Body(id), id, grab, *dx, *dy)?;
            }
            Step::Resize { overlay, dx, dy } => {
                let id = self.visible(*overlay)?;
                let rect = self.rect(id)?;
                let grab = Point::new(rect.left + rect.width, rect.top + rect.height);
                self.gesture(PointerTarget::ResizeHandle(id), id, grab, *dx, *dy)?;
            }
            Step::Panel { command } => {
                self.editor.apply_panel(command);
            }
            Step::NextSlide => {
                if let Some(real) = self.carousel.next() {
                    self.editor.slide_changed(real)?;
                }
            }
            Step::PrevSlide => {
                if let Some(real) = self.carousel.prev() {
                    self.editor.slide_changed(real)?;
                }
            }
            Step::GoToSlide { index } => {
                self.editor.cards().id(*index)?;
                if let Some(real) = self.carousel.go_to(*index) {
                    self.editor.slide_changed(real)?;
                }
            }
            Step::Upload { data_url } => {
                self.editor.set_background(data_url.clone());
            }
            Step::Reset => {
                self.editor.reset_current_card();
            }
        }
        Ok(())
    }

    /// Press at `grab`, move by the offset and release.
    fn gesture(&mut self, target: PointerTarget, id: OverlayId, grab: Point, dx: f32, dy: f32) -> Result<(), ReplayError> {
        if !self.editor.pointer_down(target, grab, &self.layout) {
            return Err(ReplayError::GestureRefused(id));
        }
        self.editor
            .pointer_move(Point::new(grab.x + dx, grab.y + dy), &self.layout);
        self.editor.pointer_up();
        Ok(())
    }

    /// Overlay at `index` among the visible card's overlays.
    fn visible(&self, index: usize) -> Result<OverlayId, ReplayError> {
        self.editor
            .visible_overlays()
            .nth(index)
            .map(|o| o.id)
            .ok_or(ReplayError::NoSuchOverlay {
                index,
                slide: self.editor.current_card().slide_number(),
            })
    }

    fn target(&self, target: Target) -> Result<PointerTarget, ReplayError> {
        Ok(match target {
            Target::Body(index) => PointerTarget::Body(self.visible(index)?),
            Target::Handle(index) => PointerTarget::ResizeHandle(self.visible(index)?),
            Target::Panel => PointerTarget::Panel,
            Target::Elsewhere => PointerTarget::Elsewhere,
        })
    }

    fn rect(&self, id: OverlayId) -> Result<Rect, ReplayError> {
        self.editor
            .registry()
            .get(id)
            .and_then(|o| self.layout.overlay_rect(o))
            .ok_or(ReplayError::NotRendered(id))
    }

    /// Card-relative script coordinates to client coordinates.
    fn client(&self, x: f32, y: f32) -> Point {
        Point::new(self.layout.card.left + x, self.layout.card.top + y)
    }

    /// Final report for an outcome.
    #[must_use]
    pub fn report(&self, outcome: Outcome) -> Report<'_> {
        let counts = self.counts.borrow();
        let interactions = InteractionKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let count = counts.get(&kind).copied().unwrap_or(0);
                (count > 0).then_some(KindCount { kind, count })
            })
            .collect();
        Report {
            outcome,
            interactions,
            state: self.editor.snapshot(),
        }
    }

    /// Human-readable summary of the editor state.
    #[must_use]
    pub fn summary(&self, outcome: Outcome) -> String {
        let editor = &self.editor;
        let preview_chars = editor.config().preview_chars;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Replayed {} steps ({} skipped)",
            outcome.applied, outcome.skipped
        );
        let _ = writeln!(out, "{}", editor.slide_indicator());
        for card in editor.cards().iter() {
            let overlays: Vec<_> = editor.registry().list(card.id).collect();
            let background = if card.background.is_some() {
                ", background set"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "Slide {}: {} overlay(s){background}",
                card.id.slide_number(),
                overlays.len()
            );
            for overlay in overlays {
                let marker = if overlay.active { '>' } else { '-' };
                let _ = writeln!(out, "  {marker} {}", overlay.preview(preview_chars));
            }
        }
        match editor.selection() {
            Selection::Idle => out.push_str("Selection: none\n"),
            Selection::Selected(id) => {
                let _ = writeln!(out, "Selection: {id}");
            }
        }

        let report = self.report(outcome);
        if !report.interactions.is_empty() {
            let tally: Vec<String> = report
                .interactions
                .iter()
                .map(|c| format!("{:?}={}", c.kind, c.count))
                .collect();
            let _ = writeln!(out, "Interactions: {}", tally.join(" "));
        }
        out
    }
}
