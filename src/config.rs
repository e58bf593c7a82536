//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use tracing::info;

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DEBOUNCE_MS, DEFAULT_GRID_SIZE, DEFAULT_HISTORY_CAPACITY};
use crate::scene::SceneState;
use crate::viewport::{GridSettings, Viewport};

/// History sizing and debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of retained entries; at least 1.
    pub capacity: usize,
    /// Quiescence window for debounced pushes.
    pub debounce: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: DEFAULT_HISTORY_CAPACITY, debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS) }
    }
}

impl HistoryConfig {
    /// Build from environment variables.
    ///
    /// Optional:
    /// - `DESIGNER_HISTORY_CAPACITY`: default 50, floored at 1
    /// - `DESIGNER_HISTORY_DEBOUNCE_MS`: default 300
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::from_lookup(env_var);
        info!(capacity = config.capacity, debounce = ?config.debounce, "history configured");
        config
    }

    /// Build from an arbitrary key lookup. Unparsable values fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let capacity = parse_or(&lookup, "DESIGNER_HISTORY_CAPACITY", DEFAULT_HISTORY_CAPACITY).max(1);
        let debounce_ms = parse_or(&lookup, "DESIGNER_HISTORY_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);
        Self { capacity, debounce: Duration::from_millis(debounce_ms) }
    }
}

/// Initial viewport and grid for a new scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneDefaults {
    pub viewport: Viewport,
    pub grid: GridSettings,
}

impl SceneDefaults {
    /// Build from environment variables.
    ///
    /// Optional:
    /// - `DESIGNER_CANVAS_WIDTH`: default 1200
    /// - `DESIGNER_CANVAS_HEIGHT`: default 740
    /// - `DESIGNER_GRID_SIZE`: default 10, floored at 0
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let viewport = Viewport {
            width: parse_or(&lookup, "DESIGNER_CANVAS_WIDTH", DEFAULT_CANVAS_WIDTH),
            height: parse_or(&lookup, "DESIGNER_CANVAS_HEIGHT", DEFAULT_CANVAS_HEIGHT),
            ..Viewport::default()
        };
        let grid = GridSettings {
            grid_size: parse_or(&lookup, "DESIGNER_GRID_SIZE", DEFAULT_GRID_SIZE).max(0.0),
            ..GridSettings::default()
        };
        Self { viewport, grid }
    }

    /// An empty scene using these defaults.
    #[must_use]
    pub fn scene(&self) -> SceneState {
        SceneState::new(self.viewport.clone(), self.grid.clone())
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or(default),
        None => default,
    }
}
