//! Gatekeeper: decides whether the engine intercepts a key at all.
//!
//! Mode rules come first and are final. Only in normal and visual mode
//! does the interaction context get a say.

use crate::context::InteractionContext;
use crate::key::{KeyCategory, KeyEvent, KeyCode, classify};
use crate::parser;
use crate::resolver::buffer_body;
use crate::state::EngineState;
use crate::types::Mode;

pub fn should_handle(event: &KeyEvent, context: InteractionContext, state: &EngineState) -> bool {
    let category = classify(event);
    let handled = match state.mode {
        Mode::Insert => category == KeyCategory::Escape,
        Mode::Command => matches!(category, KeyCategory::Escape | KeyCategory::Submit),
        Mode::Search => true,
        Mode::Normal | Mode::Visual => by_context(event, category, context, state),
    };
    if !handled {
        tracing::trace!(?category, ?context, mode = %state.mode, "key left to host");
    }
    handled
}

fn by_context(
    event: &KeyEvent,
    category: KeyCategory,
    context: InteractionContext,
    state: &EngineState,
) -> bool {
    match context {
        InteractionContext::CellEditing => {
            category == KeyCategory::Escape
                || (category == KeyCategory::Submit && !event.mods.is_empty())
        }
        InteractionContext::CommandInput | InteractionContext::SearchInput => {
            matches!(category, KeyCategory::Escape | KeyCategory::Submit)
        }
        InteractionContext::WidgetInteraction => {
            matches!(category, KeyCategory::Escape | KeyCategory::Meta)
        }
        InteractionContext::ModalDialog => category == KeyCategory::Escape,
        InteractionContext::StackNavigation => {
            category != KeyCategory::TextInput || accepts_digit(event, state)
        }
    }
}

/// Digits are text input, but they still extend a count or an operand while
/// the buffer could grow into a stack command.
fn accepts_digit(event: &KeyEvent, state: &EngineState) -> bool {
    let KeyCode::Char(c) = event.code else {
        return false;
    };
    if !c.is_ascii_digit() || event.has_chord_modifier() {
        return false;
    }
    let body = buffer_body(&state.command_buffer);
    body.chars().all(|c| c.is_ascii_digit()) || parser::is_partial(body)
}
