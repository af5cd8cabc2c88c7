//! Commands queued between ticks.

use std::collections::VecDeque;

/// An external request drained at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Horizontal cart acceleration (m/s²).
    Accelerate(f64),
    /// Replace the state with the at-rest default.
    Reset,
}

/// FIFO of pending commands, applied strictly in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and yield every pending command, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }
}
