//! # Render Export
//!
//! Flattens a `NetworkSnapshot` into the structure a render adapter draws:
//! positioned node markers, edge segments, a legend and a title.
//!
//! The payload is plain data. An empty network still yields a payload, with
//! `empty = true`, so the adapter can show a placeholder instead of failing.

use crate::engine::{NetworkSnapshot, UniverseStats};
use crate::{NodeId, NodeKind, Position};
use serde::{Deserialize, Serialize};

/// A positioned node marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    /// Namespaced id, `kind:label`.
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: String,
    /// Hover text, `label (count occurrences)`.
    pub hover: String,
}

/// A straight edge segment between two node markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A legend swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: NodeKind,
    pub name: String,
    pub color: String,
}

/// Everything the render adapter needs for one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub title: String,
    pub empty: bool,
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub legend: Vec<LegendEntry>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub mean_sentiment: Option<f64>,
    pub converged: bool,
}

impl RenderPayload {
    /// Build the payload for a snapshot computed for `energy` keywords.
    #[must_use]
    pub fn from_snapshot(snapshot: &NetworkSnapshot, energy: &[String]) -> Self {
        let position = |id: &NodeId| snapshot.layout.get(id).unwrap_or_default();

        let nodes = snapshot
            .graph
            .nodes()
            .map(|node| {
                let Position { x, y } = position(&node.id);
                RenderNode {
                    id: node.id.to_string(),
                    label: node.id.label().to_string(),
                    kind: node.kind(),
                    x,
                    y,
                    size: node.size,
                    color: node.color.to_string(),
                    hover: format!("{} ({} occurrences)", node.id.label(), node.occurrence_count),
                }
            })
            .collect();

        let edges = snapshot
            .graph
            .edges()
            .map(|edge| {
                let from = position(edge.a());
                let to = position(edge.b());
                RenderEdge {
                    source: edge.a().to_string(),
                    target: edge.b().to_string(),
                    x0: from.x,
                    y0: from.y,
                    x1: to.x,
                    y1: to.y,
                }
            })
            .collect();

        let legend = NodeKind::ALL
            .iter()
            .map(|kind| LegendEntry {
                kind: *kind,
                name: kind.legend_name().to_string(),
                color: kind.color().to_string(),
            })
            .collect();

        let UniverseStats {
            total_records,
            filtered_records,
            mean_sentiment,
        } = snapshot.stats;

        Self {
            title: title_for(energy),
            empty: snapshot.is_empty(),
            nodes,
            edges,
            legend,
            total_records,
            filtered_records,
            mean_sentiment,
            converged: snapshot.layout.converged(),
        }
    }
}

/// Figure title for the selected energy keywords.
#[must_use]
pub fn title_for(energy: &[String]) -> String {
    format!(
        "Energy Types, Sentiment Words, and Countries Network for {}",
        energy.join(", ")
    )
}
