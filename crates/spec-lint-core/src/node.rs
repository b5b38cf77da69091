//! Read-only view of canvas elements and the host accessor trait.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Opaque node identifier, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Text layer.
    Text,
    /// Frame (container).
    Frame,
    /// Component definition.
    Component,
    /// Instance of a component.
    Instance,
    /// Rectangle shape.
    Rectangle,
    /// Ellipse shape.
    Ellipse,
    /// Group (container).
    Group,
    /// Anything else the host reports.
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Returns the host's upper-case name for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Frame => "FRAME",
            Self::Component => "COMPONENT",
            Self::Instance => "INSTANCE",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Group => "GROUP",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color with channels normalized to `0.0..=1.0`, as hosts report paint colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedColor {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl NormalizedColor {
    /// Creates a normalized color.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Kind of paint in a fill list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    /// Flat color.
    Solid,
    /// Image fill.
    Image,
    /// Gradients, video, and anything else.
    #[serde(other)]
    Other,
}

/// A single fill entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Paint kind.
    pub kind: PaintKind,
    /// Color for solid paints.
    pub color: Option<NormalizedColor>,
}

impl Paint {
    /// Creates a solid paint.
    #[must_use]
    pub fn solid(color: NormalizedColor) -> Self {
        Self {
            kind: PaintKind::Solid,
            color: Some(color),
        }
    }

    /// Creates an image paint.
    #[must_use]
    pub fn image() -> Self {
        Self {
            kind: PaintKind::Image,
            color: None,
        }
    }
}

/// The fills of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Fills {
    /// An ordered list of paints (topmost first).
    Paints(Vec<Paint>),
    /// Fills differ across sub-ranges; no usable color.
    Mixed,
}

/// No paints at all.
impl Default for Fills {
    fn default() -> Self {
        Self::Paints(Vec::new())
    }
}

impl Fills {
    /// Returns the paints, or `None` when fills are mixed.
    #[must_use]
    pub fn paints(&self) -> Option<&[Paint]> {
        match self {
            Self::Paints(paints) => Some(paints),
            Self::Mixed => None,
        }
    }

    /// Returns true if any paint is of the given kind.
    #[must_use]
    pub fn has_kind(&self, kind: PaintKind) -> bool {
        self.paints()
            .is_some_and(|paints| paints.iter().any(|p| p.kind == kind))
    }
}

/// Font size of a text node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Uniform size in pixels.
    Px(f64),
    /// Size differs across sub-ranges.
    Mixed,
}

/// One element of the canvas tree.
///
/// Structure (children, parent) is exposed by the [`CanvasHost`], not by the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Stable identifier.
    pub id: NodeId,
    /// Author-controlled label.
    pub name: String,
    /// Element kind.
    pub kind: NodeKind,
    /// Canvas-space x.
    pub x: f64,
    /// Canvas-space y.
    pub y: f64,
    /// Width, never negative.
    pub width: f64,
    /// Height, never negative.
    pub height: f64,
    /// Text content (text nodes).
    pub characters: Option<String>,
    /// Font size (text nodes).
    pub font_size: Option<FontSize>,
    /// Font weight (text nodes).
    pub font_weight: Option<f64>,
    /// Fills.
    pub fills: Fills,
}

impl Node {
    /// Creates a node with zero geometry and no fills.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            characters: None,
            font_size: None,
            font_weight: None,
            fills: Fills::default(),
        }
    }

    /// Returns true for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Text content, empty for non-text nodes.
    #[must_use]
    pub fn text(&self) -> &str {
        self.characters.as_deref().unwrap_or_default()
    }

    /// Font size in pixels; mixed or missing sizes resolve to `mixed_default`.
    #[must_use]
    pub fn resolved_font_size(&self, mixed_default: f64) -> f64 {
        match self.font_size {
            Some(FontSize::Px(px)) => px,
            Some(FontSize::Mixed) | None => mixed_default,
        }
    }

    /// Font weight, 400 when absent.
    #[must_use]
    pub fn resolved_font_weight(&self) -> f64 {
        self.font_weight.unwrap_or(400.0)
    }

    /// Case-insensitive check whether the node name contains `needle`.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive check whether the node name contains any of `needles`.
    #[must_use]
    pub fn name_contains_any(&self, needles: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        needles.iter().any(|n| name.contains(&n.to_lowercase()))
    }
}

/// Read accessors the engine needs from the host canvas.
///
/// Implementations must be pure lookups: absence is reported as `None`.
pub trait CanvasHost {
    /// Ids of the currently selected top-level elements, in document order.
    fn current_selection(&self) -> Vec<NodeId>;

    /// Resolves a node by id.
    fn resolve_by_id(&self, id: &NodeId) -> Option<&Node>;

    /// Ordered children of a container node; `None` for leaves.
    fn children_of(&self, id: &NodeId) -> Option<&[NodeId]>;

    /// Parent of a node; `None` at the root.
    fn parent_of(&self, id: &NodeId) -> Option<&NodeId>;

    /// Main component of an instance node, if it can be resolved.
    fn main_component_of(&self, id: &NodeId) -> Option<&Node>;
}

/// Flattens the given roots and all descendants in pre-order.
///
/// Every node appears once even if a root is also a descendant of an earlier root.
/// Ids the host cannot resolve are skipped.
#[must_use]
pub fn collect_nodes<'h>(host: &'h dyn CanvasHost, roots: &[NodeId]) -> Vec<&'h Node> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for root in roots {
        collect_into(host, root, &mut seen, &mut nodes);
    }
    nodes
}

fn collect_into<'h>(
    host: &'h dyn CanvasHost,
    id: &NodeId,
    seen: &mut HashSet<NodeId>,
    out: &mut Vec<&'h Node>,
) {
    if seen.contains(id) {
        return;
    }
    let Some(node) = host.resolve_by_id(id) else {
        warn!("Selected node {} could not be resolved", id);
        return;
    };
    seen.insert(id.clone());
    out.push(node);

    if let Some(children) = host.children_of(id) {
        for child in children {
            collect_into(host, child, seen, out);
        }
    }
}
