/*!
# Solver

This module contains the min-cut/max-flow engine:

- [`BoykovKolmogorov`]: the search itself — tree growth, path augmentation and
  orphan adoption over the residual network.
- `ActiveQueue` (crate-private): the FIFO of nodes eligible for growth.

You usually do not interact with this module directly;
[`FlowNetwork::max_flow`](crate::network::FlowNetwork::max_flow) drives it.
*/

mod boykov_kolmogorov;
pub(crate) mod queue;

pub use boykov_kolmogorov::*;
