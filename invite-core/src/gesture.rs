//! Pointer gestures: dragging and resizing the active overlay.
//!
//! A gesture lives from pointer-down to pointer-up. Drag and resize are mutually
//! exclusive; while one is running a second pointer-down is ignored.

use serde::{Deserialize, Serialize};

use crate::{OverlayId, Point, Rect, Size};

/// What a pointer-down or click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "overlay", rename_all = "snake_case")]
pub enum PointerTarget {
    /// An overlay's body (not its resize handle).
    Body(OverlayId),
    /// An overlay's resize handle.
    ResizeHandle(OverlayId),
    /// Anywhere inside the control panel.
    Panel,
    /// Anything else on the page.
    Elsewhere,
}

/// The gesture in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    /// No gesture.
    #[default]
    Idle,
    /// Repositioning an overlay.
    Dragging {
        /// Overlay being dragged.
        overlay: OverlayId,
        /// Pointer position relative to the overlay's top-left at gesture start.
        offset: Point,
    },
    /// Resizing an overlay.
    Resizing {
        /// Overlay being resized.
        overlay: OverlayId,
        /// Rendered size at gesture start.
        start_size: Size,
        /// Pointer position at gesture start.
        start_pointer: Point,
    },
}

impl Gesture {
    /// The overlay this gesture acts on.
    #[must_use]
    pub const fn overlay(&self) -> Option<OverlayId> {
        match self {
            Self::Idle => None,
            Self::Dragging { overlay, .. } | Self::Resizing { overlay, .. } => Some(*overlay),
        }
    }
}

/// Smallest size a resize may produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeLimits {
    /// Minimum width in pixels.
    pub min_width: f32,
    /// Minimum height in pixels.
    pub min_height: f32,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_width: 60.0,
            min_height: 30.0,
        }
    }
}

/// Tracks the active gesture and computes geometry for each move.
#[derive(Debug, Clone, Default)]
pub struct GestureEngine {
    gesture: Gesture,
    limits: ResizeLimits,
}

impl GestureEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new(limits: ResizeLimits) -> Self {
        Self {
            gesture: Gesture::Idle,
            limits,
        }
    }

    /// The gesture in progress.
    #[must_use]
    pub const fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Whether a gesture is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Start dragging `overlay`, whose rendered bounds are `overlay_rect`.
    ///
    /// Returns `false` (and changes nothing) if a gesture is already running.
    pub fn begin_drag(&mut self, overlay: OverlayId, pointer: Point, overlay_rect: Rect) -> bool {
        if self.is_active() {
            return false;
        }
        self.gesture = Gesture::Dragging {
            overlay,
            offset: Point::new(pointer.x - overlay_rect.left, pointer.y - overlay_rect.top),
        };
        true
    }

    /// Start resizing `overlay`, whose rendered bounds are `overlay_rect`.
    ///
    /// Returns `false` (and changes nothing) if a gesture is already running.
    pub fn begin_resize(&mut self, overlay: OverlayId, pointer: Point, overlay_rect: Rect) -> bool {
        if self.is_active() {
            return false;
        }
        self.gesture = Gesture::Resizing {
            overlay,
            start_size: overlay_rect.size(),
            start_pointer: pointer,
        };
        true
    }

    /// End the gesture, returning what it was.
    pub fn end(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    /// Size for a resize move, floored at the limits.
    #[must_use]
    pub fn resized(&self, start_size: Size, start_pointer: Point, pointer: Point) -> Size {
        Size::new(
            (start_size.width + (pointer.x - start_pointer.x)).max(self.limits.min_width),
            (start_size.height + (pointer.y - start_pointer.y)).max(self.limits.min_height),
        )
    }
}

/// Card-relative top-left for a drag move, clamped so the overlay stays on the card.
///
/// When the overlay is larger than the card the lower bound wins and the overlay
/// is pinned to the card's top-left.
#[must_use]
pub fn dragged_position(offset: Point, pointer: Point, card: Rect, overlay: Size) -> Point {
    let x = pointer.x - card.left - offset.x;
    let y = pointer.y - card.top - offset.y;
    let max_x = card.width - overlay.width;
    let max_y = card.height - overlay.height;
    Point::new(x.min(max_x).max(0.0), y.min(max_y).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_offset_is_pointer_minus_corner() {
        let mut engine = GestureEngine::default();
        let id = OverlayId::new();
        assert!(engine.begin_drag(id, Point::new(130.0, 220.0), Rect::new(100.0, 200.0, 80.0, 30.0)));

        match engine.gesture() {
            Gesture::Dragging { overlay, offset } => {
                assert_eq!(overlay, id);
                assert!((offset.x - 30.0).abs() < f32::EPSILON);
                assert!((offset.y - 20.0).abs() < f32::EPSILON);
            }
            other => panic!("Expected Dragging, got {other:?}"),
        }
    }

    #[test]
    fn second_gesture_is_refused() {
        let mut engine = GestureEngine::default();
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        assert!(engine.begin_resize(OverlayId::new(), Point::default(), rect));
        assert!(!engine.begin_drag(OverlayId::new(), Point::default(), rect));
        assert!(matches!(engine.gesture(), Gesture::Resizing { .. }));

        assert!(matches!(engine.end(), Gesture::Resizing { .. }));
        assert!(!engine.is_active());
    }

    #[test]
    fn dragged_position_clamps_to_card() {
        let card = Rect::new(50.0, 50.0, 400.0, 300.0);
        let size = Size::new(100.0, 40.0);
        let offset = Point::new(10.0, 10.0);

        let inside = dragged_position(offset, Point::new(160.0, 160.0), card, size);
        assert_eq!(inside, Point::new(100.0, 100.0));

        let far = dragged_position(offset, Point::new(5000.0, 5000.0), card, size);
        assert_eq!(far, Point::new(300.0, 260.0));

        let before = dragged_position(offset, Point::new(-5000.0, -5000.0), card, size);
        assert_eq!(before, Point::new(0.0, 0.0));
    }

    #[test]
    fn oversized_overlay_pins_to_origin() {
        let card = Rect::new(0.0, 0.0, 100.0, 100.0);
        let pos = dragged_position(Point::default(), Point::new(60.0, 60.0), card, Size::new(150.0, 150.0));
        assert_eq!(pos, Point::new(0.0, 0.0));
    }

    #[test]
    fn resize_respects_floor() {
        let engine = GestureEngine::default();
        let start = Size::new(120.0, 50.0);
        let from = Point::new(200.0, 200.0);

        let grown = engine.resized(start, from, Point::new(230.0, 210.0));
        assert_eq!(grown, Size::new(150.0, 60.0));

        let crushed = engine.resized(start, from, Point::new(-10_000.0, -10_000.0));
        assert_eq!(crushed, Size::new(60.0, 30.0));
    }
}
