//! # Core Type Definitions
//!
//! This module contains all core types for the Sentinet network engine:
//! - Input records (`TextRecord`)
//! - Graph identifiers and entities (`NodeKind`, `NodeId`, `GraphNode`, `GraphEdge`)
//! - Layout coordinates (`Position`)
//! - Error types (`SentinetError`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` so graphs can be stored in
//! `BTreeMap`/`BTreeSet` and iterated in a stable order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// TEXT RECORD
// =============================================================================

/// A short text record (a comment or post) with its categorical attribute.
///
/// Records are owned by the caller. The core only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRecord {
    /// The record body. `None` stands for a missing value in the source table.
    pub text: Option<String>,
    /// The categorical attribute, e.g. the country the record came from.
    pub category: String,
    /// Externally supplied compound sentiment in `[-1, 1]`.
    #[serde(default)]
    pub sentiment: f64,
}

impl TextRecord {
    /// Create a record with neutral sentiment.
    #[must_use]
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            category: category.into(),
            sentiment: 0.0,
        }
    }

    /// Create a record whose text is missing.
    #[must_use]
    pub fn missing_text(category: impl Into<String>) -> Self {
        Self {
            text: None,
            category: category.into(),
            sentiment: 0.0,
        }
    }

    /// Replace the sentiment, clamped to `[-1, 1]`.
    #[must_use]
    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = clamp_compound(sentiment);
        self
    }

    /// Borrow the text, if present.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the record carries a usable category value.
    #[must_use]
    pub fn has_category(&self) -> bool {
        !self.category.trim().is_empty()
    }
}

/// Clamp a compound score into `[-1, 1]`. NaN maps to neutral.
#[must_use]
pub fn clamp_compound(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-1.0, 1.0)
    }
}

// =============================================================================
// NODE KIND & COLOR
// =============================================================================

/// The role a node plays in the co-occurrence network.
///
/// The declaration order is the sort order of node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// An energy-source keyword (solar, wind, ...).
    Energy,
    /// A categorical attribute value (a country).
    Category,
    /// A word from the positive sentiment list.
    SentimentPositive,
    /// A word from the negative sentiment list.
    SentimentNegative,
}

impl NodeKind {
    /// All kinds in id order.
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Energy,
        NodeKind::Category,
        NodeKind::SentimentPositive,
        NodeKind::SentimentNegative,
    ];

    /// Namespace prefix used when rendering a `NodeId`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            NodeKind::Energy => "energy",
            NodeKind::Category => "category",
            NodeKind::SentimentPositive => "positive",
            NodeKind::SentimentNegative => "negative",
        }
    }

    /// Fill color for nodes of this kind.
    #[must_use]
    pub const fn color(self) -> NodeColor {
        match self {
            NodeKind::Energy => NodeColor::SkyBlue,
            NodeKind::Category => NodeColor::Blue,
            NodeKind::SentimentPositive => NodeColor::Green,
            NodeKind::SentimentNegative => NodeColor::Red,
        }
    }

    /// Human readable legend name.
    #[must_use]
    pub const fn legend_name(self) -> &'static str {
        match self {
            NodeKind::Energy => "Energy Source",
            NodeKind::Category => "Country",
            NodeKind::SentimentPositive => "Positive Word",
            NodeKind::SentimentNegative => "Negative Word",
        }
    }

    /// Whether this kind is one of the two sentiment kinds.
    #[must_use]
    pub const fn is_sentiment(self) -> bool {
        matches!(
            self,
            NodeKind::SentimentPositive | NodeKind::SentimentNegative
        )
    }
}

/// Node fill color understood by the render adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeColor {
    SkyBlue,
    Blue,
    Green,
    Red,
}

impl NodeColor {
    /// CSS color name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeColor::SkyBlue => "skyblue",
            NodeColor::Blue => "blue",
            NodeColor::Green => "green",
            NodeColor::Red => "red",
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODE IDENTIFIER
// =============================================================================

/// Unique identifier for a node in the network.
///
/// Identity is the kind together with the label, so a country named like a
/// keyword never collides with the keyword's node. Rendered as `kind:label`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace of the node.
    pub kind: NodeKind,
    /// The keyword or category value as displayed.
    pub label: String,
}

impl NodeId {
    /// Create a node id.
    #[must_use]
    pub fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }

    /// Id of an energy keyword node.
    #[must_use]
    pub fn energy(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Energy, label)
    }

    /// Id of a category node.
    #[must_use]
    pub fn category(label: impl Into<String>) -> Self {
        Self::new(NodeKind::Category, label)
    }

    /// Id of a positive sentiment word node.
    #[must_use]
    pub fn positive(label: impl Into<String>) -> Self {
        Self::new(NodeKind::SentimentPositive, label)
    }

    /// Id of a negative sentiment word node.
    #[must_use]
    pub fn negative(label: impl Into<String>) -> Self {
        Self::new(NodeKind::SentimentNegative, label)
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.label)
    }
}

// =============================================================================
// GRAPH NODE
// =============================================================================

/// A node of the co-occurrence network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// The node identifier.
    pub id: NodeId,
    /// Number of filtered records the entity was observed in.
    pub occurrence_count: usize,
    /// Display size (marker area) assigned by the sizing policy.
    pub size: f64,
    /// Fill color, derived from the kind.
    pub color: NodeColor,
}

impl GraphNode {
    /// Create a node; the color follows from the id's kind.
    #[must_use]
    pub fn new(id: NodeId, occurrence_count: usize, size: f64) -> Self {
        let color = id.kind.color();
        Self {
            id,
            occurrence_count,
            size,
            color,
        }
    }

    /// The node kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.id.kind
    }
}

// =============================================================================
// GRAPH EDGE
// =============================================================================

/// An undirected co-occurrence edge.
///
/// Endpoints are stored normalized (`a < b`), so `{a, b}` and `{b, a}` are the
/// same edge and compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    a: NodeId,
    b: NodeId,
}

impl GraphEdge {
    /// Create a normalized edge. Returns `SelfLoop` when both ends are equal.
    pub fn new(x: NodeId, y: NodeId) -> Result<Self, SentinetError> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Ok(Self { a: x, b: y }),
            std::cmp::Ordering::Greater => Ok(Self { a: y, b: x }),
            std::cmp::Ordering::Equal => Err(SentinetError::SelfLoop(x)),
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub fn a(&self) -> &NodeId {
        &self.a
    }

    /// The larger endpoint.
    #[must_use]
    pub fn b(&self) -> &NodeId {
        &self.b
    }

    /// Whether `id` is one of the endpoints.
    #[must_use]
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.a == id || &self.b == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    #[must_use]
    pub fn other(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.a == id {
            Some(&self.b)
        } else if &self.b == id {
            Some(&self.a)
        } else {
            None
        }
    }
}

// =============================================================================
// POSITION
// =============================================================================

/// A 2-D layout coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Sentinet core.
///
/// - Configuration errors surface immediately to the caller
/// - Graph invariant violations are defects and are never tolerated
/// - Empty graphs and non-converged layouts are NOT errors
#[derive(Debug, Error, PartialEq)]
pub enum SentinetError {
    /// Malformed configuration or selection.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A node with the same id is already present.
    #[error("Node collision: {0}")]
    NodeCollision(NodeId),

    /// A node would be inserted without being observed.
    #[error("Node {0} has zero occurrences")]
    ZeroOccurrence(NodeId),

    /// An edge would connect a node to itself.
    #[error("Self-loop on {0}")]
    SelfLoop(NodeId),

    /// An edge references a node missing from the graph.
    #[error("Dangling edge: {0} -- {1}")]
    DanglingEdge(NodeId, NodeId),
}

impl SentinetError {
    /// Shorthand for `InvalidInput`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display_is_namespaced() {
        assert_eq!(NodeId::energy("solar").to_string(), "energy:solar");
        assert_eq!(NodeId::category("UK").to_string(), "category:UK");
        assert_eq!(NodeId::negative("risk").to_string(), "negative:risk");
    }

    #[test]
    fn same_label_different_kind_is_distinct() {
        assert_ne!(NodeId::energy("wind"), NodeId::category("wind"));
    }

    #[test]
    fn node_ids_order_by_kind_first() {
        assert!(NodeId::energy("zzz") < NodeId::category("aaa"));
        assert!(NodeId::category("zzz") < NodeId::positive("aaa"));
    }

    #[test]
    fn edge_is_normalized() {
        let e1 = GraphEdge::new(NodeId::energy("solar"), NodeId::category("UK")).expect("edge");
        let e2 = GraphEdge::new(NodeId::category("UK"), NodeId::energy("solar")).expect("edge");
        assert_eq!(e1, e2);
        assert_eq!(e1.a(), &NodeId::energy("solar"));
    }

    #[test]
    fn edge_rejects_self_loop() {
        let result = GraphEdge::new(NodeId::energy("solar"), NodeId::energy("solar"));
        assert!(matches!(result, Err(SentinetError::SelfLoop(_))));
    }

    #[test]
    fn edge_other_endpoint() {
        let edge = GraphEdge::new(NodeId::energy("wind"), NodeId::category("UK")).expect("edge");
        assert_eq!(
            edge.other(&NodeId::energy("wind")),
            Some(&NodeId::category("UK"))
        );
        assert_eq!(edge.other(&NodeId::positive("clean")), None);
    }

    #[test]
    fn kind_colors_match_palette() {
        assert_eq!(NodeKind::Energy.color().as_str(), "skyblue");
        assert_eq!(NodeKind::Category.color().as_str(), "blue");
        assert_eq!(NodeKind::SentimentPositive.color().as_str(), "green");
        assert_eq!(NodeKind::SentimentNegative.color().as_str(), "red");
    }

    #[test]
    fn sentiment_is_clamped() {
        let record = TextRecord::new("x", "UK").with_sentiment(3.5);
        assert_eq!(record.sentiment, 1.0);
        assert_eq!(clamp_compound(f64::NAN), 0.0);
    }

    #[test]
    fn blank_category_is_not_usable() {
        assert!(!TextRecord::new("solar", "  ").has_category());
        assert!(TextRecord::new("solar", "Chile").has_category());
    }
}
