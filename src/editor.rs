use std::time::Instant;

use crate::config::{HistoryConfig, SceneDefaults};
use crate::history::History;
use crate::scene::SceneStore;

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Scene store and history engine wired together.
///
/// UI collaborators mutate `scene` directly for immediate feedback, then call
/// `commit` (or `commit_debounced` during continuous gestures) to checkpoint.
/// Undo and redo only ever flow through the history.
///
/// For compound operations borrow the fields separately:
/// `let batch = editor.history.start_batch();` then mutate `editor.scene` and
/// close with `batch.end(action, editor.scene.state())`.
#[derive(Debug, Clone)]
pub struct Editor {
    pub scene: SceneStore,
    pub history: History,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&SceneDefaults::default(), &HistoryConfig::default())
    }
}

impl Editor {
    /// Create an editor with an empty scene and a baseline history entry.
    #[must_use]
    pub fn new(defaults: &SceneDefaults, config: &HistoryConfig) -> Self {
        let scene = SceneStore::with_state(defaults.scene());
        let mut history = History::new(config);
        history.init(scene.state());
        Self { scene, history }
    }

    /// Create an editor configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(&SceneDefaults::from_env(), &HistoryConfig::from_env())
    }

    // --- Checkpoints ---

    /// Record the current scene as a history entry.
    pub fn commit(&mut self, action: impl Into<String>) {
        self.history.push(action, self.scene.state());
    }

    /// Schedule a coalesced checkpoint; fired by `tick`.
    pub fn commit_debounced(&mut self, action: impl Into<String>, now: Instant) {
        self.history.push_debounced(action, now);
    }

    /// Drive the debounce timer. Returns true if a checkpoint was recorded.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.history.poll(self.scene.state(), now)
    }

    /// Record any pending debounced checkpoint right away.
    pub fn flush(&mut self) -> bool {
        self.history.flush_debounced(self.scene.state())
    }

    /// Drop history and make the current scene the new baseline.
    pub fn reset_history(&mut self) {
        self.history.init(self.scene.state());
    }

    // --- Navigation ---

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.scene)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.history.jump_to(index, &mut self.scene)
    }

    // --- Queries ---

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
