//! Registry of every overlay on every card.

use crate::{CardId, EditorError, EditorResult, OverlayId, StyleOverrides, TextOverlay, TextStyle};

/// Ordered collection of overlays; the sole owner of overlay records.
///
/// Iteration is always in creation order.
#[derive(Debug, Clone, Default)]
pub struct OverlayRegistry {
    overlays: Vec<TextOverlay>,
    defaults: TextStyle,
}

impl OverlayRegistry {
    /// Create an empty registry whose new overlays start from `defaults`.
    #[must_use]
    pub fn new(defaults: TextStyle) -> Self {
        Self {
            overlays: Vec::new(),
            defaults,
        }
    }

    /// Create an overlay on `card`, filling unset override fields from the defaults.
    pub fn create(&mut self, text: impl Into<String>, card: CardId, overrides: &StyleOverrides) -> OverlayId {
        let (style, geometry) = overrides.resolve(&self.defaults);
        let overlay = TextOverlay::new(text, card, style, geometry);
        let id = overlay.id;
        tracing::debug!("Created overlay {id} on {card}");
        self.overlays.push(overlay);
        id
    }

    /// Remove an overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the overlay is not found.
    pub fn remove(&mut self, id: OverlayId) -> EditorResult<TextOverlay> {
        let index = self
            .overlays
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| EditorError::OverlayNotFound(id.to_string()))?;
        Ok(self.overlays.remove(index))
    }

    /// Remove every overlay on `card`, returning them in creation order.
    pub fn remove_card(&mut self, card: CardId) -> Vec<TextOverlay> {
        let (removed, kept) = std::mem::take(&mut self.overlays)
            .into_iter()
            .partition(|o| o.card() == card);
        self.overlays = kept;
        removed
    }

    /// Get an overlay by ID.
    #[must_use]
    pub fn get(&self, id: OverlayId) -> Option<&TextOverlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    /// Get a mutable reference to an overlay by ID.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut TextOverlay> {
        self.overlays.iter_mut().find(|o| o.id == id)
    }

    /// Check whether an overlay exists.
    #[must_use]
    pub fn contains(&self, id: OverlayId) -> bool {
        self.get(id).is_some()
    }

    /// Overlays on `card` in creation order.
    pub fn list(&self, card: CardId) -> impl Iterator<Item = &TextOverlay> {
        self.overlays.iter().filter(move |o| o.card() == card)
    }

    /// Number of overlays on `card`.
    #[must_use]
    pub fn count(&self, card: CardId) -> usize {
        self.list(card).count()
    }

    /// All overlays in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TextOverlay> {
        self.overlays.iter()
    }

    /// Mutable references to all overlays.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TextOverlay> {
        self.overlays.iter_mut()
    }

    /// Total number of overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cards;

    #[test]
    fn create_and_remove() {
        let cards = Cards::new(3);
        let mut registry = OverlayRegistry::default();
        assert!(registry.is_empty());

        let id = registry.create("Hello", cards.id(0).expect("card"), &StyleOverrides::default());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).map(|o| o.content.as_str()), Some("Hello"));

        registry.remove(id).expect("should remove");
        assert!(registry.is_empty());
        assert!(matches!(registry.remove(id), Err(EditorError::OverlayNotFound(_))));
    }

    #[test]
    fn list_is_per_card_in_creation_order() {
        let cards = Cards::new(3);
        let (a, b) = (cards.id(0).expect("card"), cards.id(1).expect("card"));
        let mut registry = OverlayRegistry::default();

        let first = registry.create("one", a, &StyleOverrides::default());
        registry.create("other", b, &StyleOverrides::default());
        let second = registry.create("two", a, &StyleOverrides::default());

        let ids: Vec<_> = registry.list(a).map(|o| o.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(registry.count(b), 1);
    }

    #[test]
    fn remove_card_leaves_other_cards() {
        let cards = Cards::new(3);
        let (a, b) = (cards.id(0).expect("card"), cards.id(2).expect("card"));
        let mut registry = OverlayRegistry::default();
        registry.create("a1", a, &StyleOverrides::default());
        registry.create("b1", b, &StyleOverrides::default());
        registry.create("a2", a, &StyleOverrides::default());

        let removed = registry.remove_card(a);
        let texts: Vec<_> = removed.iter().map(|o| o.content.as_str()).collect();
        assert_eq!(texts, vec!["a1", "a2"]);
        assert_eq!(registry.count(a), 0);
        assert_eq!(registry.count(b), 1);
    }

    #[test]
    fn ids_are_unique() {
        let card = Cards::new(1).id(0).expect("card");
        let mut registry = OverlayRegistry::default();
        let mut ids: Vec<_> = (0..50)
            .map(|_| registry.create("x", card, &StyleOverrides::default()))
            .collect();
        ids.sort_by_key(ToString::to_string);
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}
