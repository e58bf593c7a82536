//! History engine: bounded, linear undo/redo over full scene snapshots.
//!
//! DESIGN
//! ======
//! The stack holds immutable entries, each a deep copy of `SceneState`, and a
//! cursor pointing at the active one. Pushing after an undo prunes the redo
//! branch. When the stack is full the oldest entry is evicted and the window
//! slides. Undo, redo, and jump restore by overwriting the scene wholesale
//! through `SceneStore::restore`, so drag state is never touched.
//!
//! Debounced pushes are coalesced by a `Debouncer`; the snapshot is taken when
//! the push fires, not when it was scheduled.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::component::now_ms;
use crate::config::HistoryConfig;
use crate::consts::INITIAL_ACTION;
use crate::debounce::Debouncer;
use crate::scene::{SceneState, SceneStore};

/// Unique identifier of a history entry (`history_…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(String);

impl HistoryId {
    fn generate() -> Self {
        Self(format!("history_{}", Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A labeled, timestamped snapshot. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    id: HistoryId,
    timestamp: i64,
    action: String,
    state: SceneState,
}

impl HistoryEntry {
    fn new(action: String, state: &SceneState) -> Self {
        Self { id: HistoryId::generate(), timestamp: now_ms(), action, state: state.clone() }
    }

    #[must_use]
    pub fn id(&self) -> &HistoryId {
        &self.id
    }

    /// Creation time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The captured scene state.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }
}

/// One row of the history panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryListItem {
    pub id: HistoryId,
    pub action: String,
    pub timestamp: i64,
    pub is_current: bool,
}

/// Counters for toolbars and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub current: Option<usize>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub max_size: usize,
}

/// Linear undo/redo stack with a cursor.
///
/// `cursor` is `None` iff the stack is empty, otherwise `< len()`.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    cursor: Option<usize>,
    max_size: usize,
    debounced: Debouncer<String>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(&HistoryConfig::default())
    }
}

impl History {
    #[must_use]
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            max_size: config.capacity.max(1),
            debounced: Debouncer::new(config.debounce),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Index of the active entry, `None` when empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// The active entry.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Rows for a history panel, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<HistoryListItem> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryListItem {
                id: entry.id.clone(),
                action: entry.action.clone(),
                timestamp: entry.timestamp,
                is_current: Some(index) == self.cursor,
            })
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            total: self.entries.len(),
            current: self.cursor,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            max_size: self.max_size,
        }
    }

    // --- Recording ---

    /// Record a snapshot of `state` labeled `action`.
    ///
    /// Entries after the cursor are discarded first. If the stack is full the
    /// oldest entry is evicted. The cursor always ends on the new entry.
    pub fn push(&mut self, action: impl Into<String>, state: &SceneState) {
        let action = action.into();
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push_back(HistoryEntry::new(action, state));
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        debug!(
            action = %self.entries.back().map_or("", HistoryEntry::action),
            entries = self.entries.len(),
            cursor = self.entries.len() - 1,
            "history push"
        );
    }

    /// Schedule a push of `action` after the quiet window, replacing any
    /// pending one. Call `poll` to fire it.
    pub fn push_debounced(&mut self, action: impl Into<String>, now: Instant) {
        let action = action.into();
        if self.debounced.schedule(action, now) {
            debug!("debounced history push rescheduled");
        }
    }

    /// Fire the pending debounced push if due, snapshotting `state` now.
    pub fn poll(&mut self, state: &SceneState, now: Instant) -> bool {
        match self.debounced.poll(now) {
            Some(action) => {
                self.push(action, state);
                true
            }
            None => false,
        }
    }

    /// Fire the pending debounced push immediately, if any.
    pub fn flush_debounced(&mut self, state: &SceneState) -> bool {
        match self.debounced.take() {
            Some(action) => {
                self.push(action, state);
                true
            }
            None => false,
        }
    }

    /// Drop the pending debounced push without recording it.
    pub fn cancel_debounced(&mut self) -> bool {
        self.debounced.cancel()
    }

    /// When the pending debounced push becomes due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounced.deadline()
    }

    /// Open a batch. While the returned guard lives the history is mutably
    /// borrowed, so nothing else can push; `Batch::end` records one entry.
    /// Any pending debounced push is cancelled.
    pub fn start_batch(&mut self) -> Batch<'_> {
        self.debounced.cancel();
        Batch { history: self, ended: false }
    }

    /// Close a compound operation with a single entry.
    pub fn end_batch(&mut self, action: impl Into<String>, state: &SceneState) {
        self.push(action, state);
    }

    // --- Navigation ---

    /// Step back one entry and restore it. False if nothing precedes the cursor.
    pub fn undo(&mut self, scene: &mut SceneStore) -> bool {
        match self.cursor {
            Some(cursor) if cursor > 0 => self.restore_at(cursor - 1, scene),
            _ => false,
        }
    }

    /// Step forward one entry and restore it. False at the newest entry.
    pub fn redo(&mut self, scene: &mut SceneStore) -> bool {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => self.restore_at(cursor + 1, scene),
            _ => false,
        }
    }

    /// Move the cursor to `index` and restore it. False if out of range.
    pub fn jump_to(&mut self, index: usize, scene: &mut SceneStore) -> bool {
        self.restore_at(index, scene)
    }

    fn restore_at(&mut self, index: usize, scene: &mut SceneStore) -> bool {
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        scene.restore(&entry.state);
        self.cursor = Some(index);
        debug!(action = %entry.action, cursor = index, "history restored");
        true
    }

    // --- Lifecycle ---

    /// Empty the stack and drop any pending debounced push.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.debounced.cancel();
        info!("history cleared");
    }

    /// Clear, then record `state` as the baseline entry.
    pub fn init(&mut self, state: &SceneState) {
        self.clear();
        self.push(INITIAL_ACTION, state);
        info!(max_size = self.max_size, "history initialized");
    }

    /// Change the capacity (floored at 1), evicting the oldest entries if needed.
    pub fn set_max_size(&mut self, size: usize) {
        self.max_size = size.max(1);
        if self.entries.len() > self.max_size {
            let evicted = self.entries.len() - self.max_size;
            self.entries.drain(..evicted);
            self.cursor = self.cursor.map(|c| c.saturating_sub(evicted));
            debug!(evicted, max_size = self.max_size, "history trimmed");
        }
    }
}

/// Scoped batch: holds the history exclusively until `end` or drop.
pub struct Batch<'a> {
    history: &'a mut History,
    ended: bool,
}

impl Batch<'_> {
    /// Record the batch as one entry and close it.
    pub fn end(mut self, action: impl Into<String>, state: &SceneState) {
        self.history.end_batch(action, state);
        self.ended = true;
    }
}

impl Drop for Batch<'_> {
    fn drop(&mut self) {
        if !self.ended {
            debug!("history batch dropped without an entry");
        }
    }
}
