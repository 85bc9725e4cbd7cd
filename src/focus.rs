//! Focus broker.
//!
//! UI regions register a handler under a component id and receive every
//! semantic command the engine publishes, along with whether they hold
//! focus. At most one component is focused at a time.

use std::fmt;

use crate::error::FocusError;
use crate::types::Command;

type Handler = Box<dyn FnMut(&Command, bool)>;

#[derive(Default)]
pub struct FocusBroker {
    /// Registration order is delivery order.
    handlers: Vec<(String, Handler)>,
    focused: Option<String>,
}

impl FocusBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `component`. Registering an id again replaces
    /// its handler but keeps its place in the delivery order.
    pub fn register_handler<F>(&mut self, component: impl Into<String>, handler: F)
    where
        F: FnMut(&Command, bool) + 'static,
    {
        let component = component.into();
        let handler: Handler = Box::new(handler);
        match self.handlers.iter_mut().find(|(id, _)| *id == component) {
            Some(slot) => slot.1 = handler,
            None => {
                tracing::debug!(component = %component, "registered command handler");
                self.handlers.push((component, handler));
            }
        }
    }

    /// Removes `component`. Unknown ids are ignored. A focused component
    /// gives up focus when it goes.
    pub fn unregister_handler(&mut self, component: &str) {
        self.handlers.retain(|(id, _)| id != component);
        if self.focused.as_deref() == Some(component) {
            tracing::debug!(component, "focused component unregistered");
            self.focused = None;
        }
    }

    /// Gives focus to `component`, taking it from whoever held it.
    pub fn request_focus(&mut self, component: &str) -> Result<(), FocusError> {
        if !self.is_registered(component) {
            return Err(FocusError::UnknownComponent(component.to_string()));
        }
        if self.focused.as_deref() != Some(component) {
            tracing::debug!(from = ?self.focused, to = component, "focus transferred");
            self.focused = Some(component.to_string());
        }
        Ok(())
    }

    /// Drops focus if `component` holds it; otherwise does nothing.
    pub fn release_focus(&mut self, component: &str) {
        if self.focused.as_deref() == Some(component) {
            tracing::debug!(component, "focus released");
            self.focused = None;
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn has_focus(&self, component: &str) -> bool {
        self.focused.as_deref() == Some(component)
    }

    pub fn is_registered(&self, component: &str) -> bool {
        self.handlers.iter().any(|(id, _)| id == component)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Delivers `command` to every handler. Returns how many were called.
    pub fn publish(&mut self, command: &Command) -> usize {
        let focused = self.focused.as_deref();
        for (id, handler) in self.handlers.iter_mut() {
            handler(command, focused == Some(id.as_str()));
        }
        self.handlers.len()
    }
}

impl fmt::Debug for FocusBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusBroker")
            .field(
                "handlers",
                &self.handlers.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .field("focused", &self.focused)
            .finish()
    }
}
