//! Geometry measurement seam between the editor and whatever renders it.
//!
//! The browser host answers with DOM bounding rectangles; headless callers use
//! [`StaticLayout`], which resolves overlay geometry against a fixed card size.

use serde::{Deserialize, Serialize};

use crate::{CardId, Extent, TextOverlay};

/// A pointer position in client (page) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if a point lies within the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }
}

/// Reports rendered geometry for cards and overlays.
pub trait Measure {
    /// Bounding rectangle of a card, if it is rendered.
    fn card_rect(&self, card: CardId) -> Option<Rect>;

    /// Bounding rectangle of an overlay, if it is rendered.
    fn overlay_rect(&self, overlay: &TextOverlay) -> Option<Rect>;
}

/// Approximate advance of one glyph as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.55;

/// Fixed-size card geometry for headless use.
///
/// Every card occupies the same rectangle (only one is visible at a time). `auto`
/// sized overlays get a single-line width estimate capped at the card width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticLayout {
    /// Rectangle every card is rendered into.
    pub card: Rect,
}

impl StaticLayout {
    /// Cards of the given size with their origin at (0, 0).
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            card: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Size an overlay renders at.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Overlay text is short
    pub fn overlay_size(&self, overlay: &TextOverlay) -> Size {
        let style = &overlay.style;
        let width = match overlay.geometry.width {
            Extent::Px(w) => w,
            Extent::Auto => {
                let chars = overlay.content.chars().count() as f32;
                (chars * (style.font_size * GLYPH_ADVANCE + style.letter_spacing)).min(self.card.width)
            }
        };
        let height = match overlay.geometry.height {
            Extent::Px(h) => h,
            Extent::Auto => style.font_size * style.line_height,
        };
        Size::new(width, height)
    }
}

impl Measure for StaticLayout {
    fn card_rect(&self, _card: CardId) -> Option<Rect> {
        Some(self.card)
    }

    fn overlay_rect(&self, overlay: &TextOverlay) -> Option<Rect> {
        let size = self.overlay_size(overlay);
        let (shift_x, shift_y) = overlay.geometry.centering.shift();
        let left = overlay.geometry.left.resolve(self.card.width) - size.width * shift_x;
        let top = overlay.geometry.top.resolve(self.card.height) - size.height * shift_y;
        Some(Rect::new(
            self.card.left + left,
            self.card.top + top,
            size.width,
            size.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cards, Centering, Geometry, Length, TextStyle};

    fn overlay(geometry: Geometry) -> TextOverlay {
        let card = Cards::new(1).id(0).expect("card 0");
        TextOverlay::new("0123456789", card, TextStyle::default(), geometry)
    }

    #[test]
    fn centered_overlay_straddles_anchor() {
        let layout = StaticLayout::new(400.0, 600.0);
        let o = overlay(Geometry {
            width: Extent::Px(100.0),
            height: Extent::Px(40.0),
            ..Geometry::default()
        });
        let rect = layout.overlay_rect(&o).expect("rect");
        assert!((rect.left - 150.0).abs() < f32::EPSILON);
        assert!((rect.top - 280.0).abs() < f32::EPSILON);
    }

    #[test]
    fn absolute_overlay_is_offset_by_card_origin() {
        let mut layout = StaticLayout::new(400.0, 600.0);
        layout.card.left = 10.0;
        layout.card.top = 20.0;
        let o = overlay(Geometry {
            left: Length::Px(5.0),
            top: Length::Px(7.0),
            centering: Centering::None,
            ..Geometry::default()
        });
        let rect = layout.overlay_rect(&o).expect("rect");
        assert!((rect.left - 15.0).abs() < f32::EPSILON);
        assert!((rect.top - 27.0).abs() < f32::EPSILON);
    }

    #[test]
    fn auto_width_is_capped_at_card_width() {
        let layout = StaticLayout::new(50.0, 600.0);
        let size = layout.overlay_size(&overlay(Geometry::default()));
        assert!((size.width - 50.0).abs() < f32::EPSILON);
        assert!((size.height - 24.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rect_contains_is_edge_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.5, 3.0)));
    }
}
