use rand::Rng;

use crate::{
    gens::{NetworkGenerator, NetworkInstance},
    node::{Node, NumNodes},
};

/// Generator for 4-connected grid instances, the topology of pixel-labeling
/// problems: one node per cell in row-major order, an edge between horizontal
/// and vertical neighbors.
///
/// Every cell is attached to both terminals with independent uniform costs in
/// `0..=max_unary`; neighbor edges get uniform costs in `0..=max_pairwise`.
#[derive(Debug, Copy, Clone, Default)]
pub struct GridNetwork {
    width: NumNodes,
    height: NumNodes,
    max_unary: i64,
    max_pairwise: i64,
}

impl GridNetwork {
    /// Creates a new empty generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of columns
    pub fn width(mut self, width: NumNodes) -> Self {
        self.width = width;
        self
    }

    /// Sets the number of rows
    pub fn height(mut self, height: NumNodes) -> Self {
        self.height = height;
        self
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

    /// Node id of the cell in column `x`, row `y`
    pub fn node_at(&self, x: NumNodes, y: NumNodes) -> Node {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }
}

impl NetworkGenerator for GridNetwork {
    fn generate<R>(&self, rng: &mut R) -> NetworkInstance
    where
        R: Rng,
    {
        assert!(
            self.width > 0 && self.height > 0,
            "At least one cell must be generated!"
        );

        let n = self.width * self.height;

        let terminals = (0..n)
            .map(|u| {
                (
                    u,
                    rng.random_range(0..=self.max_unary),
                    rng.random_range(0..=self.max_unary),
                )
            })
            .collect();

        let num_edges = self.width * (self.height - 1) + self.height * (self.width - 1);
        let mut edges = Vec::with_capacity(num_edges as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let u = self.node_at(x, y);
                if x + 1 < self.width {
                    edges.push((u, u + 1, rng.random_range(0..=self.max_pairwise)));
                }
                if y + 1 < self.height {
                    edges.push((u, u + self.width, rng.random_range(0..=self.max_pairwise)));
                }
            }
        }

        NetworkInstance {
            number_of_nodes: n,
            terminals,
            edges,
        }
    }
}
