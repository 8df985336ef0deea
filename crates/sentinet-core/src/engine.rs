//! # Network Engine
//!
//! One synchronous call from records and a selection to a finished snapshot:
//! filter, build, lay out. Nothing is cached between calls.

use crate::aggregator::filter_universe;
use crate::builder::{GraphBuilder, SizingPolicy};
use crate::export::RenderPayload;
use crate::keywords::{KeywordConfig, NetworkSelection};
use crate::layout::{LayoutConfig, LayoutResult, layout};
use crate::sentiment::mean_sentiment;
use crate::{Graph, SentinetError, TextRecord};
use serde::Serialize;

/// Counts describing the filtered universe behind a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UniverseStats {
    /// Records offered to the engine.
    pub total_records: usize,
    /// Records matching at least one selected energy keyword.
    pub filtered_records: usize,
    /// Mean sentiment of the filtered records.
    pub mean_sentiment: Option<f64>,
}

/// A built network and its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub graph: Graph,
    pub layout: LayoutResult,
    pub stats: UniverseStats,
}

impl NetworkSnapshot {
    /// No node was observed: the render adapter should show a placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Immutable configuration for building snapshots.
#[derive(Debug, Clone)]
pub struct NetworkEngine {
    keywords: KeywordConfig,
    sizing: SizingPolicy,
    layout: LayoutConfig,
}

impl NetworkEngine {
    /// Validate the policies up front so `compute` only fails on bad selections.
    pub fn new(
        keywords: KeywordConfig,
        sizing: SizingPolicy,
        layout: LayoutConfig,
    ) -> Result<Self, SentinetError> {
        sizing.validate()?;
        layout.validate()?;
        Ok(Self {
            keywords,
            sizing,
            layout,
        })
    }

    #[must_use]
    pub fn keywords(&self) -> &KeywordConfig {
        &self.keywords
    }

    #[must_use]
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Filter, build and lay out.
    pub fn compute(
        &self,
        records: &[TextRecord],
        selection: &NetworkSelection,
    ) -> Result<NetworkSnapshot, SentinetError> {
        let energy = self.keywords.resolve_energy(&selection.energy)?;
        let sentiment = self.keywords.resolve_sentiment(selection.sentiment);
        let universe = filter_universe(records, energy.as_slice());

        let builder = GraphBuilder::new(&self.keywords, self.sizing)?;
        let graph = builder.build(&universe, &energy, &sentiment)?;
        let layout = layout(&graph, &self.layout)?;

        let stats = UniverseStats {
            total_records: records.len(),
            filtered_records: universe.len(),
            mean_sentiment: mean_sentiment(&universe),
        };

        tracing::debug!(
            ?selection,
            filtered = stats.filtered_records,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            converged = layout.converged(),
            "computed network snapshot"
        );

        Ok(NetworkSnapshot {
            graph,
            layout,
            stats,
        })
    }

    /// Compute and flatten into a render payload in one step.
    pub fn render(
        &self,
        records: &[TextRecord],
        selection: &NetworkSelection,
    ) -> Result<RenderPayload, SentinetError> {
        let snapshot = self.compute(records, selection)?;
        let energy = self.keywords.resolve_energy(&selection.energy)?;
        Ok(RenderPayload::from_snapshot(&snapshot, &energy))
    }
}

impl Default for NetworkEngine {
    fn default() -> Self {
        Self {
            keywords: KeywordConfig::default(),
            sizing: SizingPolicy::default(),
            layout: LayoutConfig::default(),
        }
    }
}
