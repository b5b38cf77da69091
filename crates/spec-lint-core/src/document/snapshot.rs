//! JSON deserialization types for canvas snapshots (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to [`Node`](crate::node::Node) values by [`Document`](super::Document).

use crate::node::{NodeKind, NormalizedColor, PaintKind};
use serde::Deserialize;

/// A serialized canvas: top-level trees plus an optional selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentSnapshot {
    /// Ids of the selected nodes. Absent means "every top-level node".
    #[serde(default)]
    pub selection: Option<Vec<String>>,
    /// Top-level node trees in document order.
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
}

/// The `"mixed"` marker hosts use for values that vary across sub-ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixedMarker {
    /// `"mixed"`.
    Mixed,
}

/// A font size: a number or `"mixed"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FontSizeSnapshot {
    /// Pixel size.
    Px(f64),
    /// Mixed sentinel.
    Mixed(MixedMarker),
}

/// Fills: a paint list or `"mixed"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FillsSnapshot {
    /// Paint list.
    Paints(Vec<PaintSnapshot>),
    /// Mixed sentinel.
    Mixed(MixedMarker),
}

/// A single paint entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaintSnapshot {
    /// Paint kind (`SOLID`, `IMAGE`, ...).
    #[serde(rename = "type")]
    pub kind: PaintKind,
    /// Normalized color for solid paints.
    #[serde(default)]
    pub color: Option<NormalizedColor>,
}

/// A node and its subtree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Node id.
    pub id: String,
    /// Node name.
    #[serde(default)]
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Canvas-space x.
    #[serde(default)]
    pub x: f64,
    /// Canvas-space y.
    #[serde(default)]
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
    /// Text content.
    #[serde(default)]
    pub characters: Option<String>,
    /// Font size.
    #[serde(default)]
    pub font_size: Option<FontSizeSnapshot>,
    /// Font weight.
    #[serde(default)]
    pub font_weight: Option<f64>,
    /// Fills; absent means no fills.
    #[serde(default)]
    pub fills: Option<FillsSnapshot>,
    /// Children; absent marks a leaf.
    #[serde(default)]
    pub children: Option<Vec<NodeSnapshot>>,
    /// Id of the component an instance was created from.
    #[serde(default)]
    pub main_component: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_mixed_sentinels() {
        let node: NodeSnapshot = serde_json::from_str(
            r#"{"id":"1","type":"TEXT","fontSize":"mixed","fills":"mixed"}"#,
        )
        .unwrap();
        assert_eq!(
            node.font_size,
            Some(FontSizeSnapshot::Mixed(MixedMarker::Mixed))
        );
        assert_eq!(node.fills, Some(FillsSnapshot::Mixed(MixedMarker::Mixed)));
    }

    #[test]
    fn deserialize_paints_and_geometry() {
        let node: NodeSnapshot = serde_json::from_str(
            r#"{
                "id": "2", "name": "Card", "type": "FRAME",
                "x": 10, "y": 20.5, "width": 300, "height": 120,
                "fills": [
                    {"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}},
                    {"type": "GRADIENT_LINEAR"}
                ],
                "children": []
            }"#,
        )
        .unwrap();
        assert_eq!(node.kind, NodeKind::Frame);
        assert!((node.y - 20.5).abs() < f64::EPSILON);
        let Some(FillsSnapshot::Paints(paints)) = node.fills else {
            panic!("expected paints");
        };
        assert_eq!(paints[0].kind, PaintKind::Solid);
        assert_eq!(paints[1].kind, PaintKind::Other);
        assert_eq!(node.children.map(|c| c.len()), Some(0));
    }

    #[test]
    fn absent_selection_differs_from_empty() {
        let absent: DocumentSnapshot = serde_json::from_str(r#"{"nodes": []}"#).unwrap();
        assert!(absent.selection.is_none());
        let empty: DocumentSnapshot =
            serde_json::from_str(r#"{"selection": [], "nodes": []}"#).unwrap();
        assert_eq!(empty.selection, Some(vec![]));
    }
}
