/*!
# Instance Generators

This module provides builder patterns for constructing random min-cut
instances, mainly for benchmarks and property tests.

Each generator is configured through chainable setters and produces a
[`NetworkInstance`], a plain description of terminals and edges that can be
replayed into a [`FlowNetwork`](crate::network::FlowNetwork) any number of
times (useful when a test needs to solve perturbed copies of the same
instance).

The typical workflow is:

1. Create a generator (e.g. `GridNetwork::new()`).
2. Set parameters via trait/inherent setters (e.g. `.width(32).height(24)`).
3. Call `generate(&mut rng)` and [`NetworkInstance::build`] the result.

Supported models:
- [`GridNetwork`]: 4-connected grid with random unary and pairwise costs,
  the canonical segmentation topology.
- [`RandomNetwork`]: uniformly sampled distinct edges over `n` nodes with
  random costs.
*/

use rand::Rng;

use crate::{
    link::NumLinks,
    network::FlowNetwork,
    node::{Node, NumNodes},
};

mod grid;
mod random;

pub use grid::*;
pub use random::*;

/// Trait for generators that allow setting the number of nodes
pub trait NumNodesGen {
    /// Sets the number of nodes of the generated instance
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the number of edges
pub trait NumEdgesGen {
    /// Sets the number of edges of the generated instance
    fn edges(self, m: NumLinks) -> Self;
}

/// General trait for a configurable random instance generator
pub trait NetworkGenerator {
    /// Generates a random instance using the provided random source
    fn generate<R>(&self, rng: &mut R) -> NetworkInstance
    where
        R: Rng;
}

/// A replayable min-cut instance: terminal attachments plus symmetric edges.
///
/// Node ids are `0..number_of_nodes`. `terminals` holds
/// `(node, source_cap, sink_cap)` entries (at most one per node), `edges`
/// holds `(u, v, cap)` triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInstance {
    /// Number of nodes of the instance
    pub number_of_nodes: NumNodes,
    /// Unary terms as `(node, source_cap, sink_cap)`
    pub terminals: Vec<(Node, i64, i64)>,
    /// Pairwise terms as `(u, v, cap)`
    pub edges: Vec<(Node, Node, i64)>,
}

impl NetworkInstance {
    /// Replays the instance into a freshly allocated network
    pub fn build(&self) -> FlowNetwork<i64> {
        let mut net = FlowNetwork::new(self.number_of_nodes, self.edges.len().max(1) as NumLinks);
        for &(u, source_cap, sink_cap) in &self.terminals {
            net.set_terminal_caps(u, source_cap, sink_cap);
        }
        for &(u, v, cap) in &self.edges {
            net.add_edge(u, v, cap);
        }
        net
    }

    /// Returns the instance with every node's source and sink capacity
    /// exchanged. Its minimum cut has the same value with the sides mirrored.
    pub fn terminal_swapped(&self) -> Self {
        Self {
            number_of_nodes: self.number_of_nodes,
            terminals: self
                .terminals
                .iter()
                .map(|&(u, source_cap, sink_cap)| (u, sink_cap, source_cap))
                .collect(),
            edges: self.edges.clone(),
        }
    }
}
