use fxhash::FxHashSet;
use rand::Rng;

use crate::{
    gens::{NetworkGenerator, NetworkInstance, NumEdgesGen, NumNodesGen},
    link::NumLinks,
    node::{Node, NumNodes},
};

/// Generator for uniform random instances: `m` distinct non-loop edges over
/// `n` nodes, every node attached to both terminals with independent uniform
/// costs.
///
/// Costs are sampled from `0..=max_unary` (terminals) and `0..=max_pairwise`
/// (edges). Nodes whose two unary samples coincide end up with net-zero
/// terminal capacity, so generated instances routinely exercise free nodes.
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomNetwork {
    n: NumNodes,
    m: NumLinks,
    max_unary: i64,
    max_pairwise: i64,
}

impl RandomNetwork {
    /// Creates a new empty generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the upper bound for unary (terminal) costs
    pub fn max_unary(mut self, bound: i64) -> Self {
        assert!(bound >= 0, "Cost bounds must be non-negative!");
        self.max_unary = bound;
        self
    }

    /// Sets the upper bound for pairwise (edge) costs
    pub fn max_pairwise(mut self, bound: i64) -> Self {
        assert!(bound >= 0, "Cost bounds must be non-negative!");
        self.max_pairwise = bound;
        self
    }
}

impl NumNodesGen for RandomNetwork {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl NumEdgesGen for RandomNetwork {
    fn edges(mut self, m: NumLinks) -> Self {
        self.m = m;
        self
    }
}

impl NetworkGenerator for RandomNetwork {
    fn generate<R>(&self, rng: &mut R) -> NetworkInstance
    where
        R: Rng,
    {
        assert!(self.n > 0, "At least one node must be generated!");
        assert!(
            (self.m as u64) <= (self.n as u64) * (self.n as u64 - 1) / 2,
            "Too many edges for the given number of nodes!"
        );

        let terminals = (0..self.n)
            .map(|u| {
                (
                    u,
                    rng.random_range(0..=self.max_unary),
                    rng.random_range(0..=self.max_unary),
                )
            })
            .collect();

        // rejection sampling of distinct normalized pairs; kept in insertion
        // order so the same seed reproduces the same instance byte for byte
        let mut seen: FxHashSet<(Node, Node)> = FxHashSet::default();
        let mut edges = Vec::with_capacity(self.m as usize);
        while edges.len() < self.m as usize {
            let u = rng.random_range(0..self.n);
            let v = rng.random_range(0..self.n);
            if u == v {
                continue;
            }

            let edge = (u.min(v), u.max(v));
            if seen.insert(edge) {
                edges.push((edge.0, edge.1, rng.random_range(0..=self.max_pairwise)));
            }
        }

        NetworkInstance {
            number_of_nodes: self.n,
            terminals,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn respects_the_requested_shape() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for (n, m) in [(5u32, 4u32), (10, 20), (3, 3), (7, 0)] {
            let instance = RandomNetwork::new()
                .nodes(n)
                .edges(m)
                .max_unary(10)
                .max_pairwise(5)
                .generate(rng);

            assert_eq!(instance.number_of_nodes, n);
            assert_eq!(instance.terminals.len(), n as usize);
            assert_eq!(instance.edges.len(), m as usize);

            // edges are distinct, normalized and loop-free
            assert!(instance.edges.iter().all(|&(u, v, _)| u < v && v < n));
            let distinct = instance.edges.iter().map(|&(u, v, _)| (u, v)).unique();
            assert_eq!(distinct.count(), m as usize);

            // costs respect their bounds
            assert!(instance
                .terminals
                .iter()
                .all(|&(_, s, k)| (0..=10).contains(&s) && (0..=10).contains(&k)));
            assert!(instance.edges.iter().all(|&(_, _, c)| (0..=5).contains(&c)));
        }
    }

    #[test]
    fn identical_seeds_reproduce_the_instance() {
        let generator = RandomNetwork::new()
            .nodes(20)
            .edges(40)
            .max_unary(9)
            .max_pairwise(9);

        let a = generator.generate(&mut Pcg64Mcg::seed_from_u64(42));
        let b = generator.generate(&mut Pcg64Mcg::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn rejects_impossible_edge_counts() {
        RandomNetwork::new()
            .nodes(3)
            .edges(4)
            .generate(&mut Pcg64Mcg::seed_from_u64(0));
    }
}
