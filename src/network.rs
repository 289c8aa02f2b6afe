/*!
# Flow Network Arena

The [`FlowNetwork`] is a fixed-capacity arena holding all per-node search state
and all directed links of the residual network. It is sized once at
construction; afterwards only capacities and search fields mutate; no node or
link is ever created or freed during a solve.

Construction follows the cost-graph convention of binary energy minimization:

- [`FlowNetwork::set_terminal_caps`] attaches a node to the two terminals with
  the unary ("data") costs,
- [`FlowNetwork::add_edge`] inserts a symmetric pairwise ("smoothness") edge,
- [`FlowNetwork::max_flow`] solves the instance,
- [`FlowNetwork::cut_side`] reads the resulting binary label per node.

Misuse (out-of-range indices, negative capacities, exhausted link budget) is a
programming error of the cost-graph builder and panics immediately.
*/

use itertools::Itertools;

use crate::{
    algo::BoykovKolmogorov,
    capacity::Capacity,
    link::{pair, Link, LinkId, NumLinks, INVALID_LINK},
    node::{Node, NodeBitSet, NumNodes, Parent, Terminal},
};

/// Per-node search state of the residual network.
///
/// `terminal_cap` is the signed net terminal capacity: positive values are
/// residual capacity *from the source*, negative values residual capacity
/// *toward the sink*, zero means detached from both terminals.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeState<C> {
    /// Head of the adjacency chain
    pub(crate) first: LinkId,
    /// Tree attachment
    pub(crate) parent: Parent,
    /// Owning tree (meaningful only while attached)
    pub(crate) side: Terminal,
    /// Signed residual terminal capacity
    pub(crate) terminal_cap: C,
    /// Timestamp of the search round that last computed `dist`
    pub(crate) time: u32,
    /// Estimated distance to the owning terminal, valid for `time`
    pub(crate) dist: NumNodes,
}

impl<C: Capacity> Default for NodeState<C> {
    fn default() -> Self {
        Self {
            first: INVALID_LINK,
            parent: Parent::Free,
            side: Terminal::Source,
            terminal_cap: C::zero(),
            time: 0,
            dist: 0,
        }
    }
}

/// An s-t flow network over an explicit adjacency graph.
///
/// Generic over the signed [`Capacity`] type; defaults to `i64`.
///
/// # Example
/// ```
/// use stcut::prelude::*;
///
/// let mut net = FlowNetwork::<i64>::new(2, 1);
/// net.set_terminal_caps(0, 5, 0);
/// net.set_terminal_caps(1, 0, 5);
/// net.add_edge(0, 1, 3);
///
/// assert_eq!(net.max_flow(), 3);
/// assert_eq!(net.cut_side(0), Terminal::Source);
/// assert_eq!(net.cut_side(1), Terminal::Sink);
/// ```
#[derive(Debug, Clone)]
pub struct FlowNetwork<C = i64> {
    nodes: Vec<NodeState<C>>,
    links: Vec<Link<C>>,
    max_links: usize,
}

impl<C: Capacity> FlowNetwork<C> {
    /// Creates an empty network with `n` nodes and room for `m` undirected edges.
    ///
    /// Each undirected edge consumes two directed link slots.
    /// ** Panics if `n == 0 || m == 0` **
    pub fn new(n: NumNodes, m: NumLinks) -> Self {
        assert!(n > 0, "At least one node is required!");
        assert!(m > 0, "At least one edge slot is required!");

        Self {
            nodes: vec![NodeState::default(); n as usize],
            links: Vec::with_capacity(2 * m as usize),
            max_links: 2 * m as usize,
        }
    }

    /// Returns the number of nodes of the network
    pub fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }

    /// Returns the number of directed links inserted so far
    pub fn number_of_links(&self) -> NumLinks {
        self.links.len() as NumLinks
    }

    /// Returns the number of undirected edges inserted so far
    pub fn number_of_edges(&self) -> NumLinks {
        self.number_of_links() / 2
    }

    /// Attaches node `u` to the terminals with unary costs `source_cap` / `sink_cap`.
    ///
    /// Only the net value `source_cap - sink_cap` is stored: flow routed
    /// source -> u -> sink never crosses a cut, so the common part of both
    /// costs cancels. Calling this twice on the same node overwrites the
    /// previous value (last write wins, no accumulation).
    ///
    /// ** Panics if `u >= n` or either capacity is negative **
    pub fn set_terminal_caps(&mut self, u: Node, source_cap: C, sink_cap: C) {
        assert!((u as usize) < self.nodes.len(), "Node out of range!");
        assert!(
            source_cap >= C::zero() && sink_cap >= C::zero(),
            "Terminal capacities must be non-negative!"
        );

        let cap = source_cap - sink_cap;
        let node = &mut self.nodes[u as usize];
        node.terminal_cap = cap;

        if cap.is_zero() {
            node.parent = Parent::Free;
            node.dist = 0;
        } else {
            node.side = if cap > C::zero() {
                Terminal::Source
            } else {
                Terminal::Sink
            };
            node.parent = Parent::Terminal;
            node.dist = 1;
        }
    }

    /// Inserts the undirected edge `{u, v}` with symmetric capacity `cap`.
    ///
    /// Both directions start with residual `cap`; their sum is conserved by
    /// every push of flow.
    ///
    /// ** Panics if an endpoint is out of range, `u == v`, `cap < 0`, or the
    /// edge budget of [`FlowNetwork::new`] is exhausted **
    pub fn add_edge(&mut self, u: Node, v: Node, cap: C) {
        assert!(
            (u as usize) < self.nodes.len() && (v as usize) < self.nodes.len(),
            "Node out of range!"
        );
        assert!(u != v, "Self-loops are not allowed!");
        assert!(cap >= C::zero(), "Edge capacities must be non-negative!");
        assert!(self.links.len() + 2 <= self.max_links, "Edge budget exhausted!");

        let forward = self.links.len() as LinkId;
        self.links.push(Link {
            target: v,
            next: self.nodes[u as usize].first,
            cap,
        });
        self.links.push(Link {
            target: u,
            next: self.nodes[v as usize].first,
            cap,
        });

        self.nodes[u as usize].first = forward;
        self.nodes[v as usize].first = pair(forward);
    }

    /// Returns an iterator over all undirected edges as `(tail, head)` pairs
    /// in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.links
            .iter()
            .map(|link| link.target)
            .tuples()
            .map(|(head, tail)| (tail, head))
    }

    /// Computes the maximum flow from source to sink and returns its value.
    ///
    /// Afterwards every node's [`FlowNetwork::cut_side`] reflects the minimum
    /// cut. Running the solver consumes the residual capacities: a second call
    /// finds no augmenting path and returns zero.
    pub fn max_flow(&mut self) -> C {
        BoykovKolmogorov::new(self).run()
    }

    /// Like [`FlowNetwork::max_flow`], but polls `stop` once per search round.
    ///
    /// Returns `None` if the solve was abandoned; labels are meaningless then.
    pub fn max_flow_interruptible<F>(&mut self, stop: F) -> Option<C>
    where
        F: FnMut() -> bool,
    {
        BoykovKolmogorov::new(self).run_interruptible(stop)
    }

    /// Returns the side of the minimum cut node `u` ends up on.
    ///
    /// Nodes left in neither search tree may be placed on either side without
    /// changing the cut value; they stably report [`Terminal::Source`].
    ///
    /// Valid only after [`FlowNetwork::max_flow`] has returned.
    /// ** Panics if `u >= n` **
    pub fn cut_side(&self, u: Node) -> Terminal {
        let node = &self.nodes[u as usize];
        if node.parent.is_attached() {
            node.side
        } else {
            Terminal::Source
        }
    }

    /// Returns the source-side partition of the minimum cut as a bitset
    pub fn source_side(&self) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(
            self.number_of_nodes(),
            (0..self.number_of_nodes()).filter(|&u| self.cut_side(u) == Terminal::Source),
        )
    }

    #[inline]
    pub(crate) fn node(&self, u: Node) -> &NodeState<C> {
        &self.nodes[u as usize]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, u: Node) -> &mut NodeState<C> {
        &mut self.nodes[u as usize]
    }

    #[inline]
    pub(crate) fn link(&self, l: LinkId) -> &Link<C> {
        &self.links[l as usize]
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, l: LinkId) -> &mut Link<C> {
        &mut self.links[l as usize]
    }

    /// Tail endpoint of link `l` (the target of its reverse)
    #[inline]
    pub(crate) fn tail(&self, l: LinkId) -> Node {
        self.link(pair(l)).target
    }
}
