#![forbid(unsafe_code)]

//! Declarative animation hints.
//!
//! A hint describes *what semantic event* produced a snapshot — a node
//! appeared, the cursor traversed a link, a lookup failed — independent of
//! how a renderer chooses to animate it. The engine emits a closed vocabulary
//! ([`HintKind`]); renderers may extend the vocabulary through the
//! [`HintRegistry`], a capability-keyed map from hint-type name to a
//! validator/target-extractor pair.
//!
//! Registration is explicit and idempotent: build a registry once at startup
//! with [`HintRegistry::with_builtins`] and register extensions on it. There
//! is no module-level registration flag.

use std::fmt;

use ahash::AHashMap;

/// The semantic events this engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// A node entered the tree.
    Appear,
    /// The cursor moved from a parent to an existing child.
    TraverseDown,
    /// A no-op outcome: duplicate insert or failed search.
    Shake,
    /// A lookup located its node.
    Found,
}

impl HintKind {
    /// The wire name of this hint kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::TraverseDown => "traverse-down",
            Self::Shake => "shake",
            Self::Found => "found",
        }
    }

    /// Parse a wire name back into a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "appear" => Some(Self::Appear),
            "traverse-down" => Some(Self::TraverseDown),
            "shake" => Some(Self::Shake),
            "found" => Some(Self::Found),
            _ => None,
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a hint points at.
///
/// Targets reference nodes by *value*, not id: hints are attached to a
/// snapshot before reconciliation rewrites ids, and values are unique within
/// a valid tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintTarget {
    /// A single node.
    Node {
        /// Key of the targeted node.
        value: i64,
    },
    /// The link between a parent and one of its children.
    Link {
        /// Key of the parent node.
        source: i64,
        /// Key of the child node.
        target: i64,
    },
    /// The whole tree (used when there is no node to point at).
    Tree,
}

/// One semantic event attached to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHint {
    kind: HintKind,
    target: HintTarget,
}

impl AnimationHint {
    /// A node appeared.
    #[must_use]
    pub fn appear(value: i64) -> Self {
        Self {
            kind: HintKind::Appear,
            target: HintTarget::Node { value },
        }
    }

    /// The cursor traversed the link from `source` down to `target`.
    #[must_use]
    pub fn traverse_down(source: i64, target: i64) -> Self {
        Self {
            kind: HintKind::TraverseDown,
            target: HintTarget::Link { source, target },
        }
    }

    /// A no-op outcome on a specific node (duplicate insert).
    #[must_use]
    pub fn shake_node(value: i64) -> Self {
        Self {
            kind: HintKind::Shake,
            target: HintTarget::Node { value },
        }
    }

    /// A no-op outcome with no node to point at (failed search).
    #[must_use]
    pub fn shake_tree() -> Self {
        Self {
            kind: HintKind::Shake,
            target: HintTarget::Tree,
        }
    }

    /// A lookup located the node holding `value`.
    #[must_use]
    pub fn found(value: i64) -> Self {
        Self {
            kind: HintKind::Found,
            target: HintTarget::Node { value },
        }
    }

    /// Construct a hint from raw parts (for registry extensions).
    #[must_use]
    pub fn from_parts(kind: HintKind, target: HintTarget) -> Self {
        Self { kind, target }
    }

    /// The semantic event kind.
    #[must_use]
    pub fn kind(&self) -> HintKind {
        self.kind
    }

    /// The hint's target.
    #[must_use]
    pub fn target(&self) -> HintTarget {
        self.target
    }
}

// ---------------------------------------------------------------------------
// Schema registry
// ---------------------------------------------------------------------------

/// Per-hint-type capabilities: shape validation and target extraction.
///
/// Renderers resolve schemas dynamically by hint-type name to decide which
/// scene elements an incoming hint touches.
pub trait HintSchema {
    /// Whether `target` is a well-formed payload for this hint type.
    fn validate(&self, target: &HintTarget) -> bool;

    /// The node values this hint touches (empty for tree-wide hints).
    fn target_values(&self, target: &HintTarget) -> Vec<i64>;
}

/// A hint type that targets exactly one node.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeHintSchema;

impl HintSchema for NodeHintSchema {
    fn validate(&self, target: &HintTarget) -> bool {
        matches!(target, HintTarget::Node { .. })
    }

    fn target_values(&self, target: &HintTarget) -> Vec<i64> {
        match target {
            HintTarget::Node { value } => vec![*value],
            _ => Vec::new(),
        }
    }
}

/// A hint type that targets a parent-child link.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkHintSchema;

impl HintSchema for LinkHintSchema {
    fn validate(&self, target: &HintTarget) -> bool {
        matches!(target, HintTarget::Link { .. })
    }

    fn target_values(&self, target: &HintTarget) -> Vec<i64> {
        match target {
            HintTarget::Link { source, target } => vec![*source, *target],
            _ => Vec::new(),
        }
    }
}

/// A hint type that may target a node or the whole tree (`shake`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeOrTreeHintSchema;

impl HintSchema for NodeOrTreeHintSchema {
    fn validate(&self, target: &HintTarget) -> bool {
        matches!(target, HintTarget::Node { .. } | HintTarget::Tree)
    }

    fn target_values(&self, target: &HintTarget) -> Vec<i64> {
        match target {
            HintTarget::Node { value } => vec![*value],
            _ => Vec::new(),
        }
    }
}

/// Capability-keyed registry of hint schemas.
///
/// Keys are hint-type wire names. Registering a name that already exists
/// replaces the previous schema, so repeated initialization is harmless.
#[derive(Default)]
pub struct HintRegistry {
    schemas: AHashMap<String, Box<dyn HintSchema + Send + Sync>>,
}

impl fmt::Debug for HintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HintRegistry").field("schemas", &names).finish()
    }
}

impl HintRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the four built-in hint kinds.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register(HintKind::Appear.name(), Box::new(NodeHintSchema));
        reg.register(HintKind::TraverseDown.name(), Box::new(LinkHintSchema));
        reg.register(HintKind::Shake.name(), Box::new(NodeOrTreeHintSchema));
        reg.register(HintKind::Found.name(), Box::new(NodeHintSchema));
        reg
    }

    /// Register (or replace) the schema for a hint-type name.
    pub fn register(&mut self, name: &str, schema: Box<dyn HintSchema + Send + Sync>) {
        self.schemas.insert(name.to_string(), schema);
    }

    /// Whether a hint-type name is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Validate a hint against its registered schema.
    ///
    /// Unknown hint types are invalid by definition.
    #[must_use]
    pub fn validate(&self, hint: &AnimationHint) -> bool {
        self.schemas
            .get(hint.kind().name())
            .is_some_and(|s| s.validate(&hint.target()))
    }

    /// Extract the node values a hint touches (empty if unknown type).
    #[must_use]
    pub fn target_values(&self, hint: &AnimationHint) -> Vec<i64> {
        self.schemas
            .get(hint.kind().name())
            .map(|s| s.target_values(&hint.target()))
            .unwrap_or_default()
    }
}
