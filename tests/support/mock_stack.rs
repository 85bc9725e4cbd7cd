use std::collections::HashMap;

use vim_stack::Command;

/// A host-side stack that carries out the engine's semantic commands.
///
/// Position 1 is the bottom item (`items[0]`).
#[derive(Debug, Default)]
pub struct MockStack {
    pub items: Vec<String>,
    pub registers: HashMap<String, Vec<String>>,
}

impl MockStack {
    pub fn new(items: &[&str]) -> Self {
        Self {
            items: items.iter().map(|s| s.to_string()).collect(),
            registers: HashMap::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.items.len()
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

    pub fn apply(&mut self, command: &Command) {
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
                self.registers.insert(to_register.clone(), removed);
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
                self.registers.insert(to_register.clone(), copied);
            }
            Command::PasteItems {
                from_register,
                position,
                count,
            } => {
                let content = self.registers.get(from_register).cloned().unwrap_or_default();
                let at = (*position).min(self.items.len());
                for _ in 0..*count {
                    for (offset, item) in content.iter().enumerate() {
                        self.items.insert(at + offset, item.clone());
                    }
                }
            }
            Command::SwapItems { positions } => {
                if let [a, b] = positions[..] {
                    self.items.swap(a - 1, b - 1);
                }
            }
            Command::RotateItems { positions } => {
                if let (Some(&low), Some(&high)) = (positions.first(), positions.last()) {
                    self.items[low - 1..high].rotate_right(1);
                }
            }
            _ => {}
        }
    }
}
