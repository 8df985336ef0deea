//! # Force-Directed Layout
//!
//! Fruchterman–Reingold spring layout over a built network.
//!
//! ## Model
//!
//! With optimal distance `k`:
//! - every node pair repels with `k² / d`
//! - every edge attracts its endpoints with `d² / k`
//! - a node moves along its net force by at most the temperature `t`
//! - `t` starts at a tenth of the initial spread and cools linearly to zero
//!
//! Displacements are computed for all nodes first and applied together, so
//! node order never influences a step. After each step the layout is
//! recentered on its centroid, which keeps disconnected components from
//! drifting. Distances are floored at `MIN_DISTANCE`.
//!
//! ## Determinism
//!
//! Initial positions and coincident-node tie-breaks come from one injected
//! RNG. `layout` seeds a `StdRng` from `LayoutConfig::seed`; the same graph
//! and seed always give the same positions.

use crate::primitives::{
    DEFAULT_ITERATIONS, DEFAULT_K, DEFAULT_SCALE, DEFAULT_SEED, DEFAULT_THRESHOLD,
    INITIAL_TEMPERATURE_RATIO, MAX_ITERATIONS, MIN_DISTANCE,
};
use crate::{Graph, NodeId, Position, SentinetError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Parameters of the spring simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Optimal distance between nodes; larger spreads the layout.
    pub k: f64,
    /// Seed of the initial placement.
    pub seed: u64,
    /// Iteration budget.
    pub iterations: usize,
    /// Mean displacement per node under which the simulation stops early.
    pub threshold: f64,
    /// Largest absolute coordinate of the returned layout.
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
            scale: DEFAULT_SCALE,
        }
    }
}

impl LayoutConfig {
    /// Same configuration with another seed.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Reject parameters the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SentinetError> {
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(SentinetError::invalid(format!(
                "layout.k must be finite and > 0, got {}",
                self.k
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SentinetError::invalid(format!(
                "layout.scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SentinetError::invalid(format!(
                "layout.threshold must be finite and >= 0, got {}",
                self.threshold
            )));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(SentinetError::invalid(format!(
                "layout.iterations must be <= {}, got {}",
                MAX_ITERATIONS, self.iterations
            )));
        }
        Ok(())
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// One position per node of the input graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    positions: BTreeMap<NodeId, Position>,
    iterations_run: usize,
    converged: bool,
}

impl LayoutResult {
    /// Position of a node.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// All positions in node id order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Position)> {
        self.positions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterations actually simulated.
    #[must_use]
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Whether the displacement fell under the threshold before the budget ran out.
    ///
    /// A non-converged layout is still a valid result.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Lay out `graph` with an RNG seeded from `config.seed`.
pub fn layout(graph: &Graph, config: &LayoutConfig) -> Result<LayoutResult, SentinetError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    layout_with_rng(graph, config, &mut rng)
}

/// Lay out `graph` drawing all randomness from `rng`.
///
/// `config.seed` is ignored; the caller owns the RNG state.
pub fn layout_with_rng<R: Rng>(
    graph: &Graph,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<LayoutResult, SentinetError> {
    config.validate()?;

    let ids: Vec<&NodeId> = graph.node_ids().collect();
    match ids.len() {
        0 => return Ok(LayoutResult::default().finished(0, true)),
        1 => {
            let mut result = LayoutResult::default().finished(0, true);
            result.positions.insert(ids[0].clone(), Position::default());
            return Ok(result);
        }
        _ => {}
    }

    let index: BTreeMap<&NodeId, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut edges = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        match (index.get(edge.a()), index.get(edge.b())) {
            (Some(&i), Some(&j)) => edges.push((i, j)),
            _ => {
                return Err(SentinetError::DanglingEdge(
                    edge.a().clone(),
                    edge.b().clone(),
                ));
            }
        }
    }

    let mut sim = Simulation::new(ids.len(), edges, config, rng);
    let (iterations_run, converged) = sim.run(config, rng);
    sim.rescale(config.scale);

    tracing::debug!(
        nodes = ids.len(),
        iterations = iterations_run,
        converged,
        "spring layout finished"
    );

    let mut result = LayoutResult::default().finished(iterations_run, converged);
    for (id, p) in ids.into_iter().zip(sim.pos) {
        result.positions.insert(id.clone(), Position::new(p[0], p[1]));
    }
    Ok(result)
}

impl LayoutResult {
    fn finished(mut self, iterations_run: usize, converged: bool) -> Self {
        self.iterations_run = iterations_run;
        self.converged = converged;
        self
    }
}

/// Dense working state of one layout run.
struct Simulation {
    pos: Vec<[f64; 2]>,
    edges: Vec<(usize, usize)>,
    temperature: f64,
    cooling: f64,
}

impl Simulation {
    fn new<R: Rng>(n: usize, edges: Vec<(usize, usize)>, config: &LayoutConfig, rng: &mut R) -> Self {
        let pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.r#gen::<f64>(), rng.r#gen::<f64>()]).collect();
        let temperature = INITIAL_TEMPERATURE_RATIO * spread(&pos).max(MIN_DISTANCE);
        let cooling = temperature / (config.iterations as f64 + 1.0);
        Self {
            pos,
            edges,
            temperature,
            cooling,
        }
    }

    /// Run until the budget is used up or the layout settles.
    fn run<R: Rng>(&mut self, config: &LayoutConfig, rng: &mut R) -> (usize, bool) {
        let k = config.k;
        let k_squared = k * k;
        let n = self.pos.len();

        for iteration in 0..config.iterations {
            let mut disp = vec![[0.0_f64; 2]; n];

            // a. Repulsion between every pair
            for i in 0..n {
                for j in (i + 1)..n {
                    let (ux, uy, d) = separation(self.pos[i], self.pos[j], rng);
                    let force = k_squared / d;
                    disp[i][0] += ux * force;
                    disp[i][1] += uy * force;
                    disp[j][0] -= ux * force;
                    disp[j][1] -= uy * force;
                }
            }

            // b. Attraction along edges
            for &(i, j) in &self.edges {
                let (ux, uy, d) = separation(self.pos[i], self.pos[j], rng);
                let force = d * d / k;
                disp[i][0] -= ux * force;
                disp[i][1] -= uy * force;
                disp[j][0] += ux * force;
                disp[j][1] += uy * force;
            }

            // c + d. Temperature-capped, synchronous update
            let mut moved = 0.0;
            for (p, d) in self.pos.iter_mut().zip(&disp) {
                let length = d[0].hypot(d[1]);
                if length > 0.0 {
                    let step = length.min(self.temperature);
                    p[0] += d[0] / length * step;
                    p[1] += d[1] / length * step;
                    moved += step;
                }
            }
            self.recenter();
            self.temperature = (self.temperature - self.cooling).max(0.0);

            if moved / (n as f64) < config.threshold {
                return (iteration + 1, true);
            }
        }

        (config.iterations, false)
    }

    fn recenter(&mut self) {
        let n = self.pos.len() as f64;
        let (sx, sy) = self
            .pos
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        let (cx, cy) = (sx / n, sy / n);
        for p in &mut self.pos {
            p[0] -= cx;
            p[1] -= cy;
        }
    }

    /// Center on the origin and scale so the largest coordinate is `scale`.
    fn rescale(&mut self, scale: f64) {
        self.recenter();
        let limit = self
            .pos
            .iter()
            .fold(0.0_f64, |m, p| m.max(p[0].abs()).max(p[1].abs()));
        if limit > 0.0 {
            let factor = scale / limit;
            for p in &mut self.pos {
                p[0] *= factor;
                p[1] *= factor;
            }
        }
    }
}

/// Unit vector from `b` to `a` and the floored distance between them.
///
/// Coincident points get a random direction so they can separate.
fn separation<R: Rng>(a: [f64; 2], b: [f64; 2], rng: &mut R) -> (f64, f64, f64) {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let raw = dx.hypot(dy);
    if raw > 0.0 {
        (dx / raw, dy / raw, raw.max(MIN_DISTANCE))
    } else {
        let angle = rng.r#gen::<f64>() * TAU;
        (angle.cos(), angle.sin(), MIN_DISTANCE)
    }
}

/// Larger side of the bounding box.
fn spread(pos: &[[f64; 2]]) -> f64 {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in pos {
        for axis in 0..2 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    (max[0] - min[0]).max(max[1] - min[1])
}

// =============================================================================
// TESTS
// =============================================================================
