//! Loop-aware carousel position model.
//!
//! A looping carousel renders a clone of the last slide before the first and a
//! clone of the first slide after the last, so its internal active index runs over
//! `0..=n + 1` while the real index stays in `0..n`. The browser host gets both
//! from Swiper; this model reproduces them for headless use.

use serde::{Deserialize, Serialize};

/// Carousel widget options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct CarouselOptions {
    /// Wrap around from the last slide to the first.
    pub loop_slides: bool,
    /// Slides visible at once.
    pub slides_per_view: u32,
    /// Center the active slide.
    pub centered_slides: bool,
    /// Allow swiping between slides with the pointer.
    pub allow_touch_move: bool,
    /// Pagination bullets navigate on click.
    pub pagination_clickable: bool,
    /// Show prev/next buttons.
    pub navigation: bool,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            loop_slides: true,
            slides_per_view: 1,
            centered_slides: true,
            // Dragging would fight with overlay drags.
            allow_touch_move: false,
            pagination_clickable: true,
            navigation: true,
        }
    }
}

/// Position of a carousel over `slide_count` real slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    slide_count: usize,
    active_index: usize,
    looping: bool,
}

impl Carousel {
    /// Create a carousel showing the first real slide.
    #[must_use]
    pub fn new(slide_count: usize, options: &CarouselOptions) -> Self {
        let looping = options.loop_slides && slide_count > 1;
        Self {
            slide_count,
            active_index: usize::from(looping),
            looping,
        }
    }

    /// Internal index, counting clone slides.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active_index
    }

    /// Real slide index with clones folded back.
    #[must_use]
    pub fn real_index(&self) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        if self.looping {
            (self.active_index + self.slide_count - 1) % self.slide_count
        } else {
            self.active_index
        }
    }

    /// Advance one slide. Returns the new real index if the slide changed.
    pub fn next(&mut self) -> Option<usize> {
        if self.looping {
            // Sitting on the trailing clone: jump to its real twin first.
            if self.active_index == self.slide_count + 1 {
                self.active_index = 1;
            }
            self.active_index += 1;
        } else if self.active_index + 1 < self.slide_count {
            self.active_index += 1;
        } else {
            return None;
        }
        Some(self.real_index())
    }

    /// Go back one slide. Returns the new real index if the slide changed.
    pub fn prev(&mut self) -> Option<usize> {
        if self.looping {
            // Sitting on the leading clone: jump to its real twin first.
            if self.active_index == 0 {
                self.active_index = self.slide_count;
            }
            self.active_index -= 1;
        } else if self.active_index > 0 {
            self.active_index -= 1;
        } else {
            return None;
        }
        Some(self.real_index())
    }

    /// Jump to a real slide (pagination click). Returns the new real index if the
    /// slide changed.
    pub fn go_to(&mut self, real: usize) -> Option<usize> {
        if real >= self.slide_count || real == self.real_index() {
            return None;
        }
        self.active_index = real + usize::from(self.looping);
        Some(real)
    }
}
