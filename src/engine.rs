use crate::context::InteractionContext;
use crate::error::ValidationError;
use crate::focus::FocusBroker;
use crate::gate;
use crate::key::InputEvent;
use crate::keymap::{KeyTrieNode, Keymaps};
use crate::machine::{self, Step};
use crate::parser::ParsedCommand;
use crate::stack;
use crate::state::{EngineState, Settings};
use crate::types::{Command, Mode, VisualSelection};
use crate::workspace;

/// Owns the engine state and broadcasts every command it produces.
#[derive(Debug)]
pub struct Engine {
    state: EngineState,
    keymaps: Keymaps,
    settings: Settings,
    broker: FocusBroker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub command_buffer: String,
    pub pending_count: Option<u32>,
    pub stack_position: usize,
    pub stack_depth: usize,
    pub visual_selection: Option<VisualSelection>,
}

/// What happened to one input event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// `false` when the gatekeeper left the key to the host.
    pub handled: bool,
    pub commands: Vec<Command>,
}

pub struct EngineBuilder {
    mode: Mode,
    stack_depth: usize,
    settings: Settings,
    keymaps: Keymaps,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            stack_depth: 0,
            settings: Settings::default(),
            keymaps: Keymaps::default(),
        }
    }
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    /// Items `r` rotates without a count. Defaults to
    /// [`DEFAULT_ROTATE_COUNT`](crate::state::DEFAULT_ROTATE_COUNT); zero is raised to one.
    pub fn rotate_count(mut self, count: u32) -> Self {
        self.settings.rotate_count = count.max(1);
        self
    }

    /// Layers `node` over the default keymap for `mode`. Search mode has no
    /// keymap and ignores this.
    pub fn keymap(mut self, mode: Mode, node: KeyTrieNode) -> Self {
        if let Some(existing) = self.keymaps.for_mode_mut(mode) {
            existing.merge(node);
        }
        self
    }

    /// Replaces every keymap.
    pub fn keymaps(mut self, keymaps: Keymaps) -> Self {
        self.keymaps = keymaps;
        self
    }

    pub fn build(self) -> Engine {
        let mut state = EngineState::new().with_depth(self.stack_depth);
        state.mode = self.mode;
        if self.mode == Mode::Visual {
            state = stack::enter_visual(&state);
        }
        Engine {
            state,
            keymaps: self.keymaps,
            settings: self.settings,
            broker: FocusBroker::new(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.state.mode,
            command_buffer: self.state.command_buffer.clone(),
            pending_count: self.state.pending_count,
            stack_position: self.state.stack_position,
            stack_depth: self.state.stack_depth,
            visual_selection: self.state.visual_selection,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn keymaps(&self) -> &Keymaps {
        &self.keymaps
    }

    pub fn broker(&self) -> &FocusBroker {
        &self.broker
    }

    pub fn broker_mut(&mut self) -> &mut FocusBroker {
        &mut self.broker
    }

    /// Processes one input event from `context`.
    ///
    /// Keys the gatekeeper declines leave the state untouched and come back
    /// with `handled: false` so the host can apply its default behavior.
    pub fn handle_event(&mut self, input: InputEvent, context: InteractionContext) -> EventOutcome {
        if !gate::should_handle(&input.key_event(), context, &self.state) {
            return EventOutcome::default();
        }

        let Step { state, commands } =
            machine::reduce(&self.state, &self.keymaps, &self.settings, &input);
        self.state = state;
        self.publish(&commands);
        EventOutcome {
            handled: true,
            commands,
        }
    }

    /// Processes a key delivered to the stack itself.
    pub fn handle_key(&mut self, input: impl Into<InputEvent>) -> EventOutcome {
        self.handle_event(input.into(), InteractionContext::StackNavigation)
    }

    /// Syncs the engine's belief about the stack size with the host's.
    pub fn set_stack_depth(&mut self, depth: usize) {
        self.state = self.state.with_depth(depth);
        tracing::trace!(
            depth,
            position = self.state.stack_position,
            "stack depth updated"
        );
    }

    /// Sets a count for the next command that has none in its buffer.
    pub fn set_pending_count(&mut self, count: Option<u32>) {
        self.state.pending_count = count.filter(|&n| n > 0);
    }

    /// Stores register content reported by the host after a yank or delete.
    pub fn store_register(&mut self, name: impl Into<String>, items: Vec<String>) {
        self.state.registers.insert(name.into(), items);
    }

    pub fn register(&self, name: &str) -> Option<&[String]> {
        self.state.register(name)
    }

    /// Submits a `:` command line typed in the host's input field.
    ///
    /// Returns to normal mode and publishes the workspace command the line
    /// names, if any. Lines that are not workspace commands are left to the
    /// host and produce no command.
    pub fn submit_command_line(&mut self, line: &str) -> Vec<Command> {
        let parsed = workspace::parse_workspace_command(line);
        if parsed.is_none() {
            tracing::debug!(line, "command line left to host");
        }

        let before = self.state.mode;
        self.state.mode = Mode::Normal;
        self.state.clear_buffer();
        self.state.visual_selection = None;

        let mut commands: Vec<Command> = parsed.into_iter().collect();
        if before != Mode::Normal {
            commands.push(Command::ModeChange { mode: Mode::Normal });
        }
        self.publish(&commands);
        commands
    }

    /// Checks a parsed stack command against the current bounds.
    pub fn validate(&self, parsed: &ParsedCommand) -> Result<(), ValidationError> {
        stack::validate(&self.state, parsed)
    }

    fn publish(&mut self, commands: &[Command]) {
        for command in commands {
            self.broker.publish(command);
        }
    }
}
