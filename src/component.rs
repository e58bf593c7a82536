//! Component model: scene elements, their identity, transform, and edits.
//!
//! This module defines the data types that describe what exists on the canvas
//! (`Component`, `ComponentKind`, `Transform`), the creation options accepted
//! by `SceneStore::add_component` (`ComponentOptions`), and a sparse-update
//! type for shallow merges (`ComponentUpdate`).
//!
//! Every type here is plain, cloneable data so a `Component` can be deep-copied
//! into the clipboard or a history snapshot and serialized without loss.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_POSITION, DEFAULT_WIDTH};

/// Open key/value bag used for `style` and `props`.
pub type PropertyMap = Map<String, Value>;

/// Milliseconds since the Unix epoch.
pub(crate) fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// Stable identifier of a component, prefixed with its kind (`text_…`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Generate a fresh id for a component of the given kind.
    #[must_use]
    pub fn generate(kind: ComponentKind) -> Self {
        Self(format!("{kind}_{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of a component. Determines which `props` shape is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Editable text block.
    Text,
    /// Image display.
    Image,
    /// Layout container holding child component ids.
    Container,
    /// Data chart.
    Chart,
    /// Clickable button.
    Button,
    /// Text input field.
    Input,
}

impl ComponentKind {
    /// Lowercase name, also used as the id prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Container => "container",
            Self::Chart => "chart",
            Self::Button => "button",
            Self::Input => "input",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position, size, rotation, and scale of a component in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    /// Width; never negative.
    pub width: f64,
    /// Height; never negative.
    pub height: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor.
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: DEFAULT_POSITION,
            y: DEFAULT_POSITION,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Transform {
    /// Return a copy shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Clamp negative sizes to zero and replace non-finite values.
    #[must_use]
    pub fn sanitized(self) -> Self {
        fn finite_or(v: f64, fallback: f64) -> f64 {
            if v.is_finite() { v } else { fallback }
        }
        Self {
            x: finite_or(self.x, 0.0),
            y: finite_or(self.y, 0.0),
            width: finite_or(self.width, 0.0).max(0.0),
            height: finite_or(self.height, 0.0).max(0.0),
            rotation: finite_or(self.rotation, 0.0),
            scale_x: finite_or(self.scale_x, 1.0),
            scale_y: finite_or(self.scale_y, 1.0),
        }
    }
}

/// Trigger of an interaction descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTrigger {
    Click,
    Hover,
    Focus,
    Custom,
}

/// What an interaction does when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Navigate,
    Animate,
    Show,
    Hide,
    Custom,
}

/// Interaction descriptor attached to a component. Opaque to the scene store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEvent {
    pub id: String,
    pub trigger: EventTrigger,
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: PropertyMap,
}

/// Built-in animation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    FadeIn,
    SlideIn,
    Bounce,
    Rotate,
    Scale,
    Custom,
}

/// Animation descriptor attached to a component. Opaque to the scene store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAnimation {
    pub id: String,
    pub kind: AnimationKind,
    /// Duration in milliseconds.
    pub duration: f64,
    /// Start delay in milliseconds.
    pub delay: f64,
    pub easing: String,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub autoplay: bool,
}

/// A positioned, styled scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique, never reused identifier.
    pub id: ComponentId,
    /// Element type.
    pub kind: ComponentKind,
    /// Display name shown in layer panels.
    pub name: String,
    /// Position, size, rotation, and scale.
    pub transform: Transform,
    /// Paint order; ties are broken by insertion order.
    pub z_index: i64,
    pub locked: bool,
    pub visible: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    #[serde(default)]
    pub style: PropertyMap,
    #[serde(default)]
    pub props: PropertyMap,
    #[serde(default)]
    pub events: Vec<ComponentEvent>,
    #[serde(default)]
    pub animations: Vec<ComponentAnimation>,
    /// Child ids held by container components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentId>,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Last mutation time in milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl Component {
    /// Deep copy with a fresh id, `" Copy"` name suffix, offset transform, and
    /// refreshed timestamps. Used by duplicate and paste.
    #[must_use]
    pub fn copy_with_offset(&self, dx: f64, dy: f64, suffix: &str) -> Self {
        let now = now_ms();
        let mut copy = self.clone();
        copy.id = ComponentId::generate(self.kind);
        copy.name = format!("{}{suffix}", self.name);
        copy.transform = self.transform.offset(dx, dy).sanitized();
        copy.created_at = now;
        copy.updated_at = now;
        copy
    }

    /// Refresh `updated_at` without ever moving it backwards.
    pub(crate) fn touch(&mut self) {
        self.updated_at = now_ms().max(self.updated_at);
    }
}

/// Options accepted when creating a component. Unset fields take defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentOptions {
    pub kind: ComponentKind,
    pub name: Option<String>,
    pub transform: Option<Transform>,
    pub locked: Option<bool>,
    pub visible: Option<bool>,
    pub opacity: Option<f64>,
    pub style: Option<PropertyMap>,
    pub props: Option<PropertyMap>,
    pub events: Option<Vec<ComponentEvent>>,
    pub animations: Option<Vec<ComponentAnimation>>,
    pub children: Option<Vec<ComponentId>>,
}

impl ComponentOptions {
    /// Options for a component of `kind` with every other field defaulted.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: None,
            transform: None,
            locked: None,
            visible: None,
            opacity: None,
            style: None,
            props: None,
            events: None,
            animations: None,
            children: None,
        }
    }

    /// Build the component. `ordinal` seeds the default name and `z_index`.
    pub(crate) fn build(self, ordinal: usize) -> Component {
        let now = now_ms();
        let kind = self.kind;
        Component {
            id: ComponentId::generate(kind),
            kind,
            name: self.name.unwrap_or_else(|| format!("{kind} {}", ordinal + 1)),
            transform: self.transform.unwrap_or_default().sanitized(),
            z_index: i64::try_from(ordinal).unwrap_or(i64::MAX),
            locked: self.locked.unwrap_or(false),
            visible: self.visible.unwrap_or(true),
            opacity: clamp_opacity(self.opacity.unwrap_or(1.0)),
            style: self.style.unwrap_or_default(),
            props: self.props.unwrap_or_default(),
            events: self.events.unwrap_or_default(),
            animations: self.animations.unwrap_or_default(),
            children: self.children.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<ComponentKind> for ComponentOptions {
    fn from(kind: ComponentKind) -> Self {
        Self::new(kind)
    }
}

/// Shallow update for a component. Present fields replace the existing value
/// wholesale; nested values such as `transform` or `props` are never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<PropertyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<PropertyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<ComponentEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animations: Option<Vec<ComponentAnimation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentId>>,
}

impl ComponentUpdate {
    /// Apply the present fields to `component` and refresh its `updated_at`.
    pub(crate) fn apply_to(self, component: &mut Component) {
        if let Some(name) = self.name {
            component.name = name;
        }
        if let Some(transform) = self.transform {
            component.transform = transform.sanitized();
        }
        if let Some(z) = self.z_index {
            component.z_index = z;
        }
        if let Some(locked) = self.locked {
            component.locked = locked;
        }
        if let Some(visible) = self.visible {
            component.visible = visible;
        }
        if let Some(opacity) = self.opacity {
            component.opacity = clamp_opacity(opacity);
        }
        if let Some(style) = self.style {
            component.style = style;
        }
        if let Some(props) = self.props {
            component.props = props;
        }
        if let Some(events) = self.events {
            component.events = events;
        }
        if let Some(animations) = self.animations {
            component.animations = animations;
        }
        if let Some(children) = self.children {
            component.children = children;
        }
        component.touch();
    }
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() { 1.0 } else { value.clamp(0.0, 1.0) }
}
