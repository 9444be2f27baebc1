//! Bounded undo/redo history.
//!
//! Commands before the cursor are applied, commands at and after it are
//! redoable. Executing a new command discards the redo branch; once the
//! capacity is exceeded the oldest command is evicted.

use inkpad_core::constants::HISTORY_CAPACITY;

use crate::commands::SceneCommand;
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct CommandHistory {
    commands: Vec<SceneCommand>,
    cursor: usize,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Applies `cmd` to the scene and records it.
    pub fn execute(&mut self, mut cmd: SceneCommand, scene: &mut Scene) {
        tracing::debug!("Executing {}", cmd.name());
        cmd.apply(scene);
        self.push(cmd);
    }

    /// Records a command whose effect the caller already applied.
    pub fn record_executed(&mut self, cmd: SceneCommand) {
        tracing::debug!("Recording {}", cmd.name());
        self.push(cmd);
    }

    fn push(&mut self, cmd: SceneCommand) {
        self.commands.truncate(self.cursor);
        self.commands.push(cmd);
        self.cursor += 1;
        if self.commands.len() > self.capacity {
            self.commands.remove(0);
            self.cursor -= 1;
        }
    }

    /// Reverts the last applied command. False at the start of history.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let cmd = &mut self.commands[self.cursor];
        tracing::debug!("Undo {}", cmd.name());
        cmd.invert(scene);
        true
    }

    /// Re-applies the next undone command. False at the end of history.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        if self.cursor >= self.commands.len() {
            return false;
        }
        let cmd = &mut self.commands[self.cursor];
        tracing::debug!("Redo {}", cmd.name());
        cmd.apply(scene);
        self.cursor += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
    }

    /// Command names, oldest first.
    pub fn labels(&self) -> Vec<&str> {
        self.commands.iter().map(SceneCommand::name).collect()
    }
}
