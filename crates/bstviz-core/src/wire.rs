#![forbid(unsafe_code)]

//! JSON wire DTOs for the snapshot serialization boundary.
//!
//! The shapes here mirror the renderer-facing JSON contract:
//!
//! ```text
//! { "root": NodeJson | null, "name"?: string, "animationHints"?: HintJson[] }
//! NodeJson = { "value", "left", "right", "state", "id" }
//! HintJson = { "type": string, "metadata"?: object }
//! ```
//!
//! Node hints carry `{targetType: "node", targetValue}`, link hints carry
//! `{sourceValue, targetValue}`, and tree-wide hints carry
//! `{targetType: "tree"}`. Conversion to the typed model is lossless;
//! conversion from it rejects unknown hint types and malformed metadata.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hint::{AnimationHint, HintKind, HintTarget};
use crate::node::{NodeId, NodeState, TreeNode};
use crate::snapshot::Snapshot;

/// Wire shape of a tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeJson {
    /// The node's key.
    pub value: i64,
    /// Left subtree.
    pub left: Option<Box<NodeJson>>,
    /// Right subtree.
    pub right: Option<Box<NodeJson>>,
    /// Presentation state (`default` | `active` | `visited`).
    pub state: NodeState,
    /// Stable id.
    pub id: String,
}

/// Wire shape of hint metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintMetadataJson {
    /// `"node"`, `"link"`, or `"tree"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// Targeted node key (node hints) or link child key (link hints).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<i64>,
    /// Link parent key (link hints only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_value: Option<i64>,
}

/// Wire shape of an animation hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintJson {
    /// Hint-type name (`appear`, `traverse-down`, `shake`, `found`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-type payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HintMetadataJson>,
}

/// Wire shape of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotJson {
    /// The tree, or `null` when empty.
    pub root: Option<NodeJson>,
    /// Step label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hints for the transition into this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_hints: Option<Vec<HintJson>>,
}

/// Errors converting wire data into the typed model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The hint-type name is not in the engine vocabulary.
    UnknownHintKind(String),
    /// The metadata does not match any target shape.
    MalformedHint {
        /// Hint-type name of the offending hint.
        kind: String,
    },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHintKind(kind) => write!(f, "unknown hint type {kind:?}"),
            Self::MalformedHint { kind } => {
                write!(f, "malformed metadata for hint type {kind:?}")
            }
        }
    }
}

impl std::error::Error for WireError {}

// ---------------------------------------------------------------------------
// Typed model -> wire
// ---------------------------------------------------------------------------

impl From<&TreeNode> for NodeJson {
    fn from(node: &TreeNode) -> Self {
        Self {
            value: node.value(),
            left: node.left().map(|n| Box::new(NodeJson::from(n.as_ref()))),
            right: node.right().map(|n| Box::new(NodeJson::from(n.as_ref()))),
            state: node.state(),
            id: node.id().as_str().to_string(),
        }
    }
}

impl From<&AnimationHint> for HintJson {
    fn from(hint: &AnimationHint) -> Self {
        let metadata = match hint.target() {
            HintTarget::Node { value } => HintMetadataJson {
                target_type: Some("node".to_string()),
                target_value: Some(value),
                source_value: None,
            },
            HintTarget::Link { source, target } => HintMetadataJson {
                target_type: None,
                target_value: Some(target),
                source_value: Some(source),
            },
            HintTarget::Tree => HintMetadataJson {
                target_type: Some("tree".to_string()),
                target_value: None,
                source_value: None,
            },
        };
        Self {
            kind: hint.kind().name().to_string(),
            metadata: Some(metadata),
        }
    }
}

impl From<&Snapshot> for SnapshotJson {
    fn from(snapshot: &Snapshot) -> Self {
        let hints = snapshot.hints();
        Self {
            root: snapshot.root().map(|n| NodeJson::from(n.as_ref())),
            name: snapshot.name().map(str::to_string),
            animation_hints: if hints.is_empty() {
                None
            } else {
                Some(hints.iter().map(HintJson::from).collect())
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire -> typed model
// ---------------------------------------------------------------------------

impl From<NodeJson> for TreeNode {
    fn from(json: NodeJson) -> Self {
        TreeNode::new(json.value)
            .with_id(NodeId::new(json.id))
            .with_state(json.state)
            .with_left(json.left.map(|n| Arc::new(TreeNode::from(*n))))
            .with_right(json.right.map(|n| Arc::new(TreeNode::from(*n))))
    }
}

impl TryFrom<HintJson> for AnimationHint {
    type Error = WireError;

    fn try_from(json: HintJson) -> Result<Self, Self::Error> {
        let kind = HintKind::from_name(&json.kind)
            .ok_or_else(|| WireError::UnknownHintKind(json.kind.clone()))?;
        let meta = json.metadata.unwrap_or_default();
        let target = match (meta.source_value, meta.target_value, meta.target_type.as_deref()) {
            (Some(source), Some(target), _) => HintTarget::Link { source, target },
            (None, Some(value), _) => HintTarget::Node { value },
            (None, None, Some("tree")) => HintTarget::Tree,
            _ => return Err(WireError::MalformedHint { kind: json.kind }),
        };
        Ok(AnimationHint::from_parts(kind, target))
    }
}

impl TryFrom<SnapshotJson> for Snapshot {
    type Error = WireError;

    fn try_from(json: SnapshotJson) -> Result<Self, Self::Error> {
        let mut snapshot = Snapshot::new(json.root.map(|n| Arc::new(TreeNode::from(n))));
        if let Some(name) = json.name {
            snapshot = snapshot.named(name);
        }
        for hint in json.animation_hints.unwrap_or_default() {
            snapshot = snapshot.with_hint(AnimationHint::try_from(hint)?);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeSpec, TreeSpec, normalize};

    fn sample() -> Snapshot {
        normalize(TreeSpec::with_root(
            NodeSpec::new(8)
                .left(NodeSpec::new(3))
                .right(NodeSpec::new(10)),
        ))
        .named("Comparing 42 with 17")
        .with_hint(AnimationHint::traverse_down(8, 3))
        .with_hint(AnimationHint::found(10))
    }

    #[test]
    fn round_trip_is_lossless() {
        let snapshot = sample();
        let json = SnapshotJson::from(&snapshot);
        let back = Snapshot::try_from(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn serialized_field_names_match_contract() {
        let snapshot = sample();
        let text = serde_json::to_string(&SnapshotJson::from(&snapshot)).unwrap();
        assert!(text.contains("\"animationHints\""));
        assert!(text.contains("\"type\":\"traverse-down\""));
        assert!(text.contains("\"sourceValue\":8"));
        assert!(text.contains("\"targetType\":\"node\""));
        assert!(text.contains("\"state\":\"default\""));
        assert!(text.contains("\"id\":\"r-8\""));
    }

    #[test]
    fn tree_hint_round_trip() {
        let snapshot = Snapshot::empty()
            .named("Value 7 not found")
            .with_hint(AnimationHint::shake_tree());
        let json = SnapshotJson::from(&snapshot);
        let text = serde_json::to_string(&json).unwrap();
        assert!(text.contains("\"targetType\":\"tree\""));
        assert_eq!(Snapshot::try_from(json).unwrap(), snapshot);
    }

    #[test]
    fn unknown_hint_type_is_rejected() {
        let json = SnapshotJson {
            root: None,
            name: None,
            animation_hints: Some(vec![HintJson {
                kind: "tree-insert".to_string(),
                metadata: None,
            }]),
        };
        let err = Snapshot::try_from(json).unwrap_err();
        assert_eq!(err, WireError::UnknownHintKind("tree-insert".to_string()));
    }

    #[test]
    fn hint_without_usable_metadata_is_rejected() {
        let json = SnapshotJson {
            root: None,
            name: None,
            animation_hints: Some(vec![HintJson {
                kind: "appear".to_string(),
                metadata: None,
            }]),
        };
        let err = Snapshot::try_from(json).unwrap_err();
        assert!(matches!(err, WireError::MalformedHint { .. }));
    }

    #[test]
    fn empty_tree_serializes_to_null_root() {
        let text = serde_json::to_string(&SnapshotJson::from(&Snapshot::empty())).unwrap();
        assert_eq!(text, "{\"root\":null}");
    }
}
