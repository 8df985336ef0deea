//! # Graph Builder
//!
//! Turns a filtered universe of records into the co-occurrence network.
//!
//! Node rules:
//! - Energy keywords observed at least once, sized by frequency with a floor
//! - Every distinct category value, at a fixed size
//! - Sentiment words observed at least once, sized by frequency with a floor
//!
//! Edge rules, per record and per matched energy keyword:
//! - energy -- category
//! - energy -- every matched sentiment word
//!
//! There are never category -- sentiment or energy -- energy edges.
//!
//! A record whose category is empty or whitespace counts toward keyword
//! nodes and energy -- sentiment edges, but creates no category node and no
//! energy -- category edge.
//!
//! Keywords passed to [`GraphBuilder::build`] are lowercased and deduplicated
//! first. A word repeated across lists keeps the kind of its first entry.

use crate::aggregator::{FrequencyTable, filter_universe};
use crate::keywords::{KeywordConfig, NetworkSelection};
use crate::matcher::LoweredText;
use crate::primitives::{
    CATEGORY_SIZE, MIN_SIZE_ENERGY, MIN_SIZE_SENTIMENT, SCALE_ENERGY, SCALE_SENTIMENT,
};
use crate::{Graph, GraphNode, NodeId, NodeKind, SentinetError, TextRecord};
use serde::{Deserialize, Serialize};

// =============================================================================
// SIZING POLICY
// =============================================================================

/// Node size policy: `max(count * scale, floor)` for keywords, fixed for categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingPolicy {
    pub energy_scale: f64,
    pub energy_min: f64,
    pub category_size: f64,
    pub sentiment_scale: f64,
    pub sentiment_min: f64,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            energy_scale: SCALE_ENERGY,
            energy_min: MIN_SIZE_ENERGY,
            category_size: CATEGORY_SIZE,
            sentiment_scale: SCALE_SENTIMENT,
            sentiment_min: MIN_SIZE_SENTIMENT,
        }
    }
}

impl SizingPolicy {
    /// Check that every value is finite and non-negative.
    pub fn validate(&self) -> Result<(), SentinetError> {
        let fields = [
            ("energy_scale", self.energy_scale),
            ("energy_min", self.energy_min),
            ("category_size", self.category_size),
            ("sentiment_scale", self.sentiment_scale),
            ("sentiment_min", self.sentiment_min),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SentinetError::invalid(format!(
                    "sizing.{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Size of a node of `kind` observed `count` times.
    #[must_use]
    pub fn size_for(&self, kind: NodeKind, count: usize) -> f64 {
        let count = count as f64;
        match kind {
            NodeKind::Energy => (count * self.energy_scale).max(self.energy_min),
            NodeKind::Category => self.category_size,
            NodeKind::SentimentPositive | NodeKind::SentimentNegative => {
                (count * self.sentiment_scale).max(self.sentiment_min)
            }
        }
    }
}

// =============================================================================
// GRAPH BUILDER
// =============================================================================

/// Deterministic builder for the co-occurrence network.
///
/// Holds no state between builds: the same inputs always give the same graph.
#[derive(Debug, Clone)]
pub struct GraphBuilder<'c> {
    config: &'c KeywordConfig,
    sizing: SizingPolicy,
}

impl<'c> GraphBuilder<'c> {
    /// Create a builder over a validated keyword configuration.
    pub fn new(config: &'c KeywordConfig, sizing: SizingPolicy) -> Result<Self, SentinetError> {
        sizing.validate()?;
        Ok(Self { config, sizing })
    }

    /// Filter `records` for the selection, then build.
    pub fn build_for(
        &self,
        records: &[TextRecord],
        selection: &NetworkSelection,
    ) -> Result<Graph, SentinetError> {
        let energy = self.config.resolve_energy(&selection.energy)?;
        let sentiment = self.config.resolve_sentiment(selection.sentiment);
        let universe = filter_universe(records, energy.as_slice());
        self.build(&universe, &energy, &sentiment)
    }

    /// Build the network from an already filtered universe.
    ///
    /// `sentiment` pairs each word with its node kind, so the kind comes
    /// from the list the word was configured in.
    pub fn build(
        &self,
        universe: &[&TextRecord],
        energy: &[String],
        sentiment: &[(String, NodeKind)],
    ) -> Result<Graph, SentinetError> {
        let mut graph = Graph::new();
        if universe.is_empty() {
            tracing::debug!("empty universe, returning empty network");
            return Ok(graph);
        }

        let energy = normalize_energy(energy);
        let sentiment = normalize_sentiment(sentiment);
        let keywords = energy
            .iter()
            .map(String::as_str)
            .chain(sentiment.iter().map(|(w, _)| w.as_str()));
        let table = FrequencyTable::count(universe, keywords);

        // 1. Energy nodes
        for keyword in &energy {
            let count = table.keyword_count(keyword);
            if count > 0 {
                self.add_node(&mut graph, NodeId::energy(keyword.as_str()), count)?;
            }
        }

        // 2. Category nodes
        for (category, count) in table.categories() {
            self.add_node(&mut graph, NodeId::category(category), count)?;
        }

        // 3. Sentiment nodes
        for (word, kind) in &sentiment {
            let count = table.keyword_count(word);
            if count > 0 {
                self.add_node(&mut graph, NodeId::new(*kind, word.as_str()), count)?;
            }
        }

        // 4. Co-occurrence edges
        for record in universe {
            let text = LoweredText::new(record.text());
            let matched_sentiment: Vec<NodeId> = sentiment
                .iter()
                .filter(|(w, _)| text.contains(w))
                .map(|(w, kind)| NodeId::new(*kind, w.as_str()))
                .collect();

            for keyword in energy.iter().filter(|k| text.contains(k)) {
                let energy_id = NodeId::energy(keyword.as_str());
                if record.has_category() {
                    graph.insert_edge(&energy_id, &NodeId::category(record.category.as_str()))?;
                }
                for sentiment_id in &matched_sentiment {
                    graph.insert_edge(&energy_id, sentiment_id)?;
                }
            }
        }

        tracing::debug!(
            records = universe.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built co-occurrence network"
        );

        Ok(graph)
    }

    fn add_node(&self, graph: &mut Graph, id: NodeId, count: usize) -> Result<(), SentinetError> {
        let size = self.sizing.size_for(id.kind, count);
        graph.insert_node(GraphNode::new(id, count, size))
    }
}

fn normalize_energy(energy: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(energy.len());
    for keyword in energy {
        let keyword = keyword.to_lowercase();
        if !normalized.contains(&keyword) {
            normalized.push(keyword);
        }
    }
    normalized
}

fn normalize_sentiment(sentiment: &[(String, NodeKind)]) -> Vec<(String, NodeKind)> {
    let mut normalized: Vec<(String, NodeKind)> = Vec::with_capacity(sentiment.len());
    for (word, kind) in sentiment {
        let word = word.to_lowercase();
        if !normalized.iter().any(|(w, _)| *w == word) {
            normalized.push((word, *kind));
        }
    }
    normalized
}

// =============================================================================
// TESTS
// =============================================================================
