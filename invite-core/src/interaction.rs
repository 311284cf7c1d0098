//! Interaction notifications and handler registration.
//!
//! Hosts register handlers per [`InteractionKind`]; the editor dispatches one
//! [`Interaction`] for every state change it makes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CardId, OverlayId};

/// Kinds of interaction a host can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// An overlay became active.
    Select,
    /// The selection was cleared.
    Deselect,
    /// A drag started.
    DragStart,
    /// A drag moved an overlay.
    DragMove,
    /// A drag ended.
    DragEnd,
    /// A resize started.
    ResizeStart,
    /// A resize changed an overlay's size.
    ResizeMove,
    /// A resize ended.
    ResizeEnd,
    /// An overlay was created.
    Create,
    /// An overlay was deleted.
    Delete,
    /// An overlay's content was edited in place.
    EditContent,
    /// A panel control changed an overlay's style.
    Restyle,
    /// The visible card changed.
    SlideChange,
    /// A card's background image changed.
    Background,
    /// A card was reset to its seed overlay.
    Reset,
}

impl InteractionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Select,
        Self::Deselect,
        Self::DragStart,
        Self::DragMove,
        Self::DragEnd,
        Self::ResizeStart,
        Self::ResizeMove,
        Self::ResizeEnd,
        Self::Create,
        Self::Delete,
        Self::EditContent,
        Self::Restyle,
        Self::SlideChange,
        Self::Background,
        Self::Reset,
    ];
}

/// A single state change reported to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// What happened.
    pub kind: InteractionKind,
    /// Overlay involved, if any.
    pub overlay: Option<OverlayId>,
    /// Card visible when it happened.
    pub card: CardId,
}

type Handler = Box<dyn FnMut(&Interaction)>;

/// Handlers keyed by interaction kind.
#[derive(Default)]
pub struct InteractionHandlers {
    handlers: HashMap<InteractionKind, Vec<Handler>>,
}

impl InteractionHandlers {
    /// Create an empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one kind.
    pub fn on(&mut self, kind: InteractionKind, handler: impl FnMut(&Interaction) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Call every handler registered for the interaction's kind, in registration order.
    pub fn dispatch(&mut self, interaction: &Interaction) {
        if let Some(handlers) = self.handlers.get_mut(&interaction.kind) {
            for handler in handlers {
                handler(interaction);
            }
        }
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: InteractionKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for InteractionHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.handlers.iter().map(|(k, v)| (*k, v.len())).collect();
        kinds.sort_by_key(|(k, _)| format!("{k:?}"));
        f.debug_struct("InteractionHandlers").field("handlers", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::Cards;

    #[test]
    fn dispatch_only_reaches_matching_kind() {
        let card = Cards::new(1).id(0).expect("card");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = InteractionHandlers::new();

        let sink = Rc::clone(&seen);
        handlers.on(InteractionKind::DragMove, move |i| sink.borrow_mut().push(i.kind));
        assert_eq!(handlers.count(InteractionKind::DragMove), 1);

        handlers.dispatch(&Interaction {
            kind: InteractionKind::Select,
            overlay: None,
            card,
        });
        handlers.dispatch(&Interaction {
            kind: InteractionKind::DragMove,
            overlay: Some(OverlayId::new()),
            card,
        });

        assert_eq!(*seen.borrow(), vec![InteractionKind::DragMove]);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let card = Cards::new(1).id(0).expect("card");
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = InteractionHandlers::new();
        for n in 0..3 {
            let sink = Rc::clone(&order);
            handlers.on(InteractionKind::Reset, move |_| sink.borrow_mut().push(n));
        }

        handlers.dispatch(&Interaction {
            kind: InteractionKind::Reset,
            overlay: None,
            card,
        });
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }
}
