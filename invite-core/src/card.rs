//! Cards (carousel slides) that text overlays are placed on.

use serde::{Deserialize, Serialize};

use crate::{EditorError, EditorResult};

/// Index of a card in the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(usize);

impl CardId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based card index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// One-based slide number as shown to the user.
    #[must_use]
    pub const fn slide_number(self) -> usize {
        self.0 + 1
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card-{}", self.slide_number())
    }
}

/// A single card background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card identity.
    pub id: CardId,
    /// Background image as a data URL, if one was uploaded.
    pub background: Option<String>,
}

/// The fixed set of cards shown by the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cards {
    cards: Vec<Card>,
}

impl Cards {
    /// Create `count` cards with no backgrounds.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            cards: (0..count)
                .map(|index| Card {
                    id: CardId(index),
                    background: None,
                })
                .collect(),
        }
    }

    /// Resolve a card index.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::CardOutOfRange`] if the index has no card.
    pub fn id(&self, index: usize) -> EditorResult<CardId> {
        if index < self.cards.len() {
            Ok(CardId(index))
        } else {
            Err(EditorError::CardOutOfRange {
                index,
                count: self.cards.len(),
            })
        }
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    /// Set or clear a card's background image.
    pub fn set_background(&mut self, id: CardId, background: Option<String>) {
        if let Some(card) = self.cards.get_mut(id.0) {
            card.background = background;
        }
    }

    /// Iterate cards in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether there are no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
