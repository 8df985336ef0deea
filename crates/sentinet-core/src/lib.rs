//! # sentinet-core
//!
//! The deterministic network engine for Sentinet.
//!
//! Given a set of text records tagged with a category and a sentiment score,
//! this crate builds a co-occurrence network between energy keywords,
//! categories and sentiment words, then places its nodes in the plane with a
//! seeded force-directed layout.
//!
//! ## Architectural Constraints
//!
//! - Pure computation: no I/O, no async, no network dependencies
//! - Deterministic: same records, selection and seed give the same snapshot
//! - Ordered collections (`BTreeMap`/`BTreeSet`) everywhere iteration order
//!   can leak into output

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod builder;
pub mod engine;
pub mod export;
pub mod graph;
pub mod keywords;
pub mod layout;
pub mod matcher;
pub mod primitives;
pub mod sentiment;
pub mod supersede;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    GraphEdge, GraphNode, NodeColor, NodeId, NodeKind, Position, SentinetError, TextRecord,
};

// =============================================================================
// RE-EXPORTS: Network Engine
// =============================================================================

pub use aggregator::{FrequencyTable, filter_universe};
pub use builder::{GraphBuilder, SizingPolicy};
pub use engine::{NetworkEngine, NetworkSnapshot, UniverseStats};
pub use export::{LegendEntry, RenderEdge, RenderNode, RenderPayload};
pub use graph::{Graph, SerializableGraph};
pub use keywords::{
    EnergySelection, KeywordConfig, KeywordGroup, KeywordSet, NetworkSelection,
    SentimentSelection,
};
pub use layout::{LayoutConfig, LayoutResult, layout, layout_with_rng};
pub use matcher::{LoweredText, contains_keyword, match_keywords};
pub use sentiment::{LexiconScorer, SentimentScorer, mean_sentiment};
pub use supersede::{RequestTracker, Ticket};
