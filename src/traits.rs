use std::hash::Hash;

use crate::context::InteractionContext;

/// What kind of element received a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// An editable text field (input, textarea, contenteditable cell).
    TextField,
    /// An interactive control such as a button, checkbox or select.
    Widget,
    /// Anything else.
    Other,
}

/// The host's view of its focusable element tree.
///
/// The context resolver only needs three queries: an explicit role marker,
/// the element kind, and the parent link for the bounded ancestor walk.
pub trait ElementTree {
    type Id: Copy + Eq + Hash;

    // Explicit role marker on this element, if the host tagged it.
    fn marker(&self, element: Self::Id) -> Option<InteractionContext>;

    fn kind(&self, element: Self::Id) -> ElementKind;

    fn parent(&self, element: Self::Id) -> Option<Self::Id>;
}
