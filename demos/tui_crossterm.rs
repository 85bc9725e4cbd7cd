//! Terminal UI example using crossterm and ratatui.
//!
//! This example drives an in-memory stack of notes with vim_stack.
//! Run with: cargo run --example tui_crossterm
//!
//! Set `VIM_STACK_LOG=/tmp/vim_stack.log` to write engine traces to a file
//! (`RUST_LOG` picks the filter, default `vim_stack=debug`).

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vim_stack::{Command, Engine, InputEvent, KeyCode, KeyEvent, Mode, Modifiers};

const UNNAMED: &str = "\"";

/// The items the engine addresses. Position 1 is `items[0]`, drawn last.
struct NoteStack {
    items: Vec<String>,
    registers: HashMap<String, Vec<String>>,
}

impl NoteStack {
    fn new(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|s| s.to_string()).collect(),
            registers: HashMap::new(),
        }
    }

    fn take(&self, positions: &[usize]) -> Vec<String> {
        positions
            .iter()
            .filter_map(|p| self.items.get(p - 1).cloned())
            .collect()
    }

    fn remove(&mut self, positions: &[usize]) -> Vec<String> {
        let taken = self.take(positions);
        let mut sorted = positions.to_vec();
        sorted.sort_unstable();
        for p in sorted.into_iter().rev() {
            if p <= self.items.len() {
                self.items.remove(p - 1);
            }
        }
        taken
    }

    /// Applies an item-level command. Returns true when the item count may
    /// have changed.
    fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::DeleteItems {
                positions,
                to_register,
            }
            | Command::DeleteToPosition {
                positions,
                to_register,
                ..
            } => {
                let removed = self.remove(positions);
                self.registers.insert(to_register.clone(), removed.clone());
                self.registers.insert(UNNAMED.to_string(), removed);
                true
            }
            Command::YankItems {
                positions,
                to_register,
            }
            | Command::YankToPosition {
                positions,
                to_register,
                ..
            } => {
                let copied = self.take(positions);
                self.registers.insert(to_register.clone(), copied.clone());
                self.registers.insert(UNNAMED.to_string(), copied);
                false
            }
            Command::PasteItems {
                from_register,
                position,
                count,
            } => {
                let content = self
                    .registers
                    .get(from_register)
                    .cloned()
                    .unwrap_or_default();
                let at = (*position).min(self.items.len());
                for _ in 0..*count {
                    for (offset, item) in content.iter().enumerate() {
                        self.items.insert(at + offset, item.clone());
                    }
                }
                true
            }
            Command::SwapItems { positions } => {
                if let [a, b] = positions[..] {
                    self.items.swap(a - 1, b - 1);
                }
                false
            }
            Command::RotateItems { positions } => {
                if let (Some(&low), Some(&high)) = (positions.first(), positions.last()) {
                    self.items[low - 1..high].rotate_right(1);
                }
                false
            }
            Command::OpenItem { position, above } => {
                let at = if *above { *position } else { position - 1 };
                self.items.insert(at.min(self.items.len()), String::new());
                true
            }
            Command::ChangeItems { positions, .. } => {
                for p in positions {
                    if let Some(item) = self.items.get_mut(p - 1) {
                        item.clear();
                    }
                }
                false
            }
            _ => false,
        }
    }
}

struct App {
    engine: Engine,
    stack: NoteStack,
    workspaces: HashMap<String, Vec<String>>,
    workspace: String,
    command_line: String,
    /// Index of the item insert mode types into.
    editing: Option<usize>,
    /// Last command seen by the status handler registered on the broker.
    status: Rc<RefCell<String>>,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let stack = NoteStack::new(&[
            "welcome to vim_stack",
            "j/k move, 5g jumps, gg/G bottom/top",
            "dd deletes, 3dd deletes three, 2,4d a range",
            "yy yanks, p/P paste, s swaps, r rotates",
            "v selects, / searches, :ws lists workspaces",
            ":nw <name> creates a workspace, :w <name> switches, :q quits",
        ]);
        let mut engine = Engine::builder().stack_depth(stack.items.len()).build();

        let status = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&status);
        engine.broker_mut().register_handler("status", move |command, focused| {
            if focused {
                *sink.borrow_mut() = format!("{command:?}");
            }
        });
        if let Err(err) = engine.broker_mut().request_focus("status") {
            tracing::warn!(%err, "status line did not get focus");
        }

        let workspace = "default".to_string();
        Self {
            engine,
            stack,
            workspaces: HashMap::from([(workspace.clone(), Vec::new())]),
            workspace,
            command_line: String::new(),
            editing: None,
            status,
            should_quit: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        let Some(input) = convert_crossterm_event(event) else {
            return;
        };

        if self.engine.mode() == Mode::Command
            && let InputEvent::Key(ke) = &input
            && ke.code == KeyCode::Enter
        {
            let line = std::mem::take(&mut self.command_line);
            if line.trim() == ":q" {
                self.should_quit = true;
                return;
            }
            let commands = self.engine.submit_command_line(&line);
            self.apply(&commands);
            return;
        }

        let outcome = self.engine.handle_key(input.clone());
        if outcome.handled {
            self.apply(&outcome.commands);
            return;
        }

        // Keys the engine leaves to us: typing into the command line or the
        // item being edited.
        let ke = input.key_event();
        match self.engine.mode() {
            Mode::Command => match ke.code {
                KeyCode::Backspace => {
                    self.command_line.pop();
                }
                _ => {
                    if let Some(c) = ke.printable() {
                        self.command_line.push(c);
                    }
                }
            },
            Mode::Insert => {
                let index = self
                    .editing
                    .unwrap_or(self.engine.snapshot().stack_position - 1);
                if let Some(item) = self.stack.items.get_mut(index) {
                    match ke.code {
                        KeyCode::Backspace => {
                            item.pop();
                        }
                        _ => {
                            if let Some(c) = ke.printable() {
                                item.push(c);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn apply(&mut self, commands: &[Command]) {
        let mut resized = false;
        for command in commands {
            resized |= self.stack.apply(command);
            match command {
                Command::ModeChange { mode: Mode::Command } => self.command_line = ":".into(),
                Command::ModeChange { mode: Mode::Normal } => self.editing = None,
                Command::OpenItem { position, above } => {
                    let index = if *above { *position } else { position - 1 };
                    self.editing = Some(index.min(self.stack.items.len().saturating_sub(1)));
                }
                Command::ChangeItems { positions, .. } => {
                    self.editing = positions.first().map(|p| p - 1);
                }
                Command::SwitchWorkspace { name } => self.switch_workspace(name),
                Command::CreateWorkspace { name } => {
                    self.workspaces.entry(name.clone()).or_default();
                    self.switch_workspace(name);
                }
                Command::ListWorkspaces => {
                    let mut names: Vec<&str> = self.workspaces.keys().map(String::as_str).collect();
                    names.sort_unstable();
                    *self.status.borrow_mut() = names.join("  ");
                }
                _ => {}
            }
        }
        if resized {
            self.engine.set_stack_depth(self.stack.items.len());
        }
    }

    fn switch_workspace(&mut self, name: &str) {
        let Some(items) = self.workspaces.remove(name) else {
            *self.status.borrow_mut() = format!("no workspace named {name}");
            return;
        };
        let previous = std::mem::replace(&mut self.stack.items, items);
        self.workspaces.insert(self.workspace.clone(), previous);
        self.workspace = name.to_string();
        self.engine.set_stack_depth(self.stack.items.len());
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<InputEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }

    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(InputEvent::Key(KeyEvent { code, mods }))
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let snapshot = app.engine.snapshot();
    let selected = snapshot
        .visual_selection
        .map(|sel| (sel.start.min(sel.end), sel.start.max(sel.end)));

    // Top of the stack first.
    let items: Vec<ListItem> = app
        .stack
        .items
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, text)| {
            let position = idx + 1;
            let mut style = Style::default();
            if selected.is_some_and(|(low, high)| (low..=high).contains(&position)) {
                style = style.bg(Color::Blue);
            }
            if position == snapshot.stack_position {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(format!("{position:>3}  {text}"))).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("vim_stack demo [{}]", app.workspace)),
    );
    f.render_widget(list, chunks[0]);

    let status = match snapshot.mode {
        Mode::Command => app.command_line.clone(),
        Mode::Search => {
            let state = app.engine.state();
            format!("/{}", state.search_pattern.as_deref().unwrap_or(""))
        }
        mode => format!(
            "-- {} --  {}  {}",
            mode.as_str().to_uppercase(),
            snapshot.command_buffer,
            app.status.borrow()
        ),
    };
    let status = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);
}

fn init_logging() {
    let Ok(path) = std::env::var("VIM_STACK_LOG") else {
        return;
    };
    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("cannot open log file {path}: {err}");
            return;
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vim_stack=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), io::Error> {
    init_logging();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.code == CKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
