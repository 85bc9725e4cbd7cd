//! Interaction context resolution.
//!
//! Decides what the user is focused on when a key arrives: the stack
//! itself, a text field inside a cell, the command or search input, a modal
//! dialog, or some other interactive widget.

use std::collections::HashMap;
use std::hash::Hash;

use crate::traits::{ElementKind, ElementTree};

/// Maximum number of ancestors inspected when the target carries no marker.
pub const MAX_ANCESTOR_DEPTH: usize = 16;

/// Where a key event originated, as far as key handling is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionContext {
    /// Navigating the stack. The engine interprets command keys.
    #[default]
    StackNavigation,
    /// Typing inside a cell's text field.
    CellEditing,
    /// Typing in the `:` command input.
    CommandInput,
    /// Typing in the search input.
    SearchInput,
    /// A modal dialog holds focus.
    ModalDialog,
    /// A button, checkbox or other control holds focus.
    WidgetInteraction,
}

/// Classifies `target` without consulting any cache.
///
/// An explicit marker on the target wins. Otherwise the nearest marked
/// ancestor (within [`MAX_ANCESTOR_DEPTH`]) is combined with the target's
/// own kind.
pub fn classify_target<T: ElementTree>(tree: &T, target: T::Id) -> InteractionContext {
    if let Some(context) = tree.marker(target) {
        return context;
    }

    let ancestor = nearest_marker(tree, target);
    match tree.kind(target) {
        ElementKind::TextField => match ancestor {
            Some(
                context @ (InteractionContext::ModalDialog
                | InteractionContext::CommandInput
                | InteractionContext::SearchInput),
            ) => context,
            _ => InteractionContext::CellEditing,
        },
        ElementKind::Widget => match ancestor {
            Some(InteractionContext::ModalDialog) => InteractionContext::ModalDialog,
            _ => InteractionContext::WidgetInteraction,
        },
        ElementKind::Other => ancestor.unwrap_or_default(),
    }
}

fn nearest_marker<T: ElementTree>(tree: &T, target: T::Id) -> Option<InteractionContext> {
    let mut current = tree.parent(target);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let element = current?;
        if let Some(context) = tree.marker(element) {
            return Some(context);
        }
        current = tree.parent(element);
    }
    None
}

/// Caches [`classify_target`] results per element until focus changes.
#[derive(Debug, Clone)]
pub struct ContextResolver<Id> {
    cache: HashMap<Id, InteractionContext>,
}

impl<Id> Default for ContextResolver<Id> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> ContextResolver<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the context for an event target. Events without a target
    /// (delivered to the document itself) count as stack navigation.
    pub fn resolve<T>(&mut self, tree: &T, target: Option<Id>) -> InteractionContext
    where
        T: ElementTree<Id = Id>,
    {
        let Some(target) = target else {
            return InteractionContext::StackNavigation;
        };
        *self
            .cache
            .entry(target)
            .or_insert_with(|| classify_target(tree, target))
    }

    /// Drops every cached classification. Hosts call this whenever focus
    /// moves, since markers and ancestry may have changed with it.
    pub fn focus_changed(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
