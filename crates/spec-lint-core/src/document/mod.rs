//! In-memory canvas host built from a JSON snapshot.
//!
//! # Architecture
//!
//! ```text
//! JSON text
//!   ↓ serde (DTO layer)
//! snapshot types
//!   ↓ validate + flatten into an arena
//! Document (implements CanvasHost)
//! ```

pub mod snapshot;

use crate::node::{CanvasHost, Fills, FontSize, Node, NodeId, Paint};
use snapshot::{DocumentSnapshot, FillsSnapshot, FontSizeSnapshot, NodeSnapshot};
use std::collections::HashMap;

/// Errors from building a [`Document`].
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// JSON deserialization failed.
    #[error("Failed to parse document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two nodes share an id.
    #[error("Duplicate node id `{id}`")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },

    /// A node has a negative or non-finite size.
    #[error("Node `{id}` has invalid size {width}x{height}")]
    InvalidSize {
        /// Offending node.
        id: String,
        /// Reported width.
        width: f64,
        /// Reported height.
        height: f64,
    },

    /// The selection references a node that does not exist.
    #[error("Selection references unknown node `{id}`")]
    UnknownSelection {
        /// The unknown id.
        id: String,
    },
}

/// A canvas document held in memory.
///
/// Nodes are stored in pre-order; structure is kept in side tables so nodes
/// stay plain values.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    parents: HashMap<NodeId, NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    main_components: HashMap<NodeId, NodeId>,
    roots: Vec<NodeId>,
    selection: Vec<NodeId>,
}

impl Document {
    /// Parses a document from snapshot JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or the snapshot is inconsistent.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let snapshot: DocumentSnapshot = serde_json::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    /// Builds a document from a deserialized snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids, invalid sizes, or unknown selection ids.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self, DocumentError> {
        let mut doc = Self::default();
        for tree in snapshot.nodes {
            let id = doc.insert(tree, None)?;
            doc.roots.push(id);
        }

        doc.selection = match snapshot.selection {
            None => doc.roots.clone(),
            Some(ids) => ids
                .into_iter()
                .map(|id| {
                    let id = NodeId::new(id);
                    if doc.index.contains_key(&id) {
                        Ok(id)
                    } else {
                        Err(DocumentError::UnknownSelection {
                            id: id.as_str().to_string(),
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(doc)
    }

    fn insert(
        &mut self,
        snapshot: NodeSnapshot,
        parent: Option<&NodeId>,
    ) -> Result<NodeId, DocumentError> {
        let id = NodeId::new(snapshot.id);
        if self.index.contains_key(&id) {
            return Err(DocumentError::DuplicateId {
                id: id.as_str().to_string(),
            });
        }
        if !is_valid_extent(snapshot.width) || !is_valid_extent(snapshot.height) {
            return Err(DocumentError::InvalidSize {
                id: id.as_str().to_string(),
                width: snapshot.width,
                height: snapshot.height,
            });
        }

        let node = Node {
            id: id.clone(),
            name: snapshot.name,
            kind: snapshot.kind,
            x: snapshot.x,
            y: snapshot.y,
            width: snapshot.width,
            height: snapshot.height,
            characters: snapshot.characters,
            font_size: snapshot.font_size.map(|size| match size {
                FontSizeSnapshot::Px(px) => FontSize::Px(px),
                FontSizeSnapshot::Mixed(_) => FontSize::Mixed,
            }),
            font_weight: snapshot.font_weight,
            fills: match snapshot.fills {
                None => Fills::default(),
                Some(FillsSnapshot::Mixed(_)) => Fills::Mixed,
                Some(FillsSnapshot::Paints(paints)) => Fills::Paints(
                    paints
                        .into_iter()
                        .map(|p| Paint {
                            kind: p.kind,
                            color: p.color,
                        })
                        .collect(),
                ),
            },
        };

        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.parents.insert(id.clone(), parent.clone());
        }
        if let Some(component) = snapshot.main_component {
            self.main_components
                .insert(id.clone(), NodeId::new(component));
        }

        if let Some(children) = snapshot.children {
            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                child_ids.push(self.insert(child, Some(&id))?);
            }
            self.children.insert(id.clone(), child_ids);
        }

        Ok(id)
    }

    /// All nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Replaces the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if any id is not part of the document.
    pub fn set_selection(&mut self, ids: Vec<NodeId>) -> Result<(), DocumentError> {
        if let Some(unknown) = ids.iter().find(|id| !self.index.contains_key(*id)) {
            return Err(DocumentError::UnknownSelection {
                id: unknown.as_str().to_string(),
            });
        }
        self.selection = ids;
        Ok(())
    }
}

fn is_valid_extent(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl CanvasHost for Document {
    fn current_selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn resolve_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    fn children_of(&self, id: &NodeId) -> Option<&[NodeId]> {
        self.children.get(id).map(Vec::as_slice)
    }

    fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        self.parents.get(id)
    }

    fn main_component_of(&self, id: &NodeId) -> Option<&Node> {
        self.main_components
            .get(id)
            .and_then(|component| self.resolve_by_id(component))
    }
}
