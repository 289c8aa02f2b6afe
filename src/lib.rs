/*!
`stcut` is a min-cut/max-flow library for **binary labeling** problems, the
energy-minimization core behind background subtraction, segmentation and
denoising: given per-node costs for the two labels (unary "data" terms) and
per-edge costs for label disagreement (pairwise "smoothness" terms), it
computes the labeling of minimum total cost as a minimum s-t cut.

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of
nodes in the network (typically one node per pixel). Directed **links** are
arena-indexed as `u32` and allocated in reverse-paired couples, so every
undirected edge of the cost graph is two links whose residual capacities trade
off against each other as flow is pushed.

The whole network (adjacency, residual capacities, search state) lives in a
single [`FlowNetwork`](network::FlowNetwork) arena that is sized once up
front; solving allocates nothing beyond two index queues.

# Algorithm

The solver is the Boykov-Kolmogorov search
([`algo::BoykovKolmogorov`]): two search trees grown from the terminals,
augmentation along bridging paths, and incremental tree repair through orphan
adoption. See the [`algo`] module for the details.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes the node/link/capacity definitions and the
  [`FlowNetwork`](network::FlowNetwork),
- [`gens`] includes random instance generators (grids and uniform networks)
  for benchmarks and property tests,
- [`io`] includes readers/writers for instance files and a DOT renderer for
  computed cuts,
- [`algo`] gives lower-level access to the solver itself.

```
use stcut::prelude::*;

// one bright pixel, one dark pixel, a smoothness edge between them
let mut net = FlowNetwork::<i64>::new(2, 1);
net.set_terminal_caps(0, 5, 0);
net.set_terminal_caps(1, 0, 5);
net.add_edge(0, 1, 3);

assert_eq!(net.max_flow(), 3);
assert_eq!(net.cut_side(0), Terminal::Source);
assert_eq!(net.cut_side(1), Terminal::Sink);
```

# When to use

You should only use this library if the following apply:
- Your problem is *binary* (two labels). Multi-label optimization
  (alpha-expansion and friends) is built *on top of* solvers like this one
  but is not provided here.
- Your cost graph is static: the solver runs one instance to completion and
  does not support re-cutting after capacity edits.
- Pairwise costs are symmetric and non-negative.

The *construction* of the cost graph (what the capacities mean in terms of
pixel intensities or likelihoods) is deliberately left to the caller.
*/

pub mod algo;
pub mod capacity;
pub mod gens;
pub mod io;
pub mod link;
pub mod network;
pub mod node;
#[cfg(test)]
pub(crate) mod testing;

/// `stcut::prelude` includes the node, link and capacity definitions as well
/// as the flow network itself.
pub mod prelude {
    pub use super::{capacity::*, link::*, network::*, node::*};
}
