//! Shared numeric constants for the designer crate.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed canvas scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed canvas scale.
pub const MAX_SCALE: f64 = 5.0;

/// Default canvas width in canvas units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;

/// Default canvas height in canvas units.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 740.0;

/// Default canvas background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default grid spacing in canvas units.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

// ── Components ──────────────────────────────────────────────────

/// Default x/y position of a freshly added component.
pub const DEFAULT_POSITION: f64 = 100.0;

/// Default width of a freshly added component.
pub const DEFAULT_WIDTH: f64 = 200.0;

/// Default height of a freshly added component.
pub const DEFAULT_HEIGHT: f64 = 100.0;

/// Offset applied to both axes when duplicating or pasting.
pub const COPY_OFFSET: f64 = 20.0;

/// Suffix appended to the name of duplicated or pasted components.
pub const COPY_SUFFIX: &str = " Copy";

// ── History ─────────────────────────────────────────────────────

/// Default number of history entries retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Default quiescence window for debounced history pushes, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Action label of the baseline entry written by `History::init`.
pub const INITIAL_ACTION: &str = "Initial state";
