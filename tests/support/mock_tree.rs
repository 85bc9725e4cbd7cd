use std::cell::Cell;
use std::collections::HashMap;

use vim_stack::{ElementKind, ElementTree, InteractionContext};

struct Node {
    kind: ElementKind,
    parent: Option<u32>,
    marker: Option<InteractionContext>,
}

/// An element tree built by hand, counting how often it is queried.
#[derive(Default)]
pub struct MockTree {
    nodes: HashMap<u32, Node>,
    queries: Cell<usize>,
}

impl MockTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: u32, kind: ElementKind, parent: Option<u32>) -> &mut Self {
        self.nodes.insert(
            id,
            Node {
                kind,
                parent,
                marker: None,
            },
        );
        self
    }

    pub fn mark(&mut self, id: u32, context: InteractionContext) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.marker = Some(context);
        }
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn touch(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl ElementTree for MockTree {
    type Id = u32;

    fn marker(&self, element: u32) -> Option<InteractionContext> {
        self.touch();
        self.nodes.get(&element).and_then(|node| node.marker)
    }

    fn kind(&self, element: u32) -> ElementKind {
        self.touch();
        self.nodes
            .get(&element)
            .map_or(ElementKind::Other, |node| node.kind)
    }

    fn parent(&self, element: u32) -> Option<u32> {
        self.touch();
        self.nodes.get(&element).and_then(|node| node.parent)
    }
}
