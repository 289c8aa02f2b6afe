/*!
# Boykov-Kolmogorov Max-Flow

Implementation of the Boykov-Kolmogorov min-cut/max-flow search used for
binary energy minimization (segmentation, denoising, background subtraction).

## Core concepts

Two search trees grow simultaneously, one rooted at the source terminal and
one at the sink:

- **Growth**: an *active* node expands its tree by one BFS layer, annexing
  free neighbors over non-saturated links. When the two trees touch, the
  connecting link bridges a source->sink path.
- **Augmentation**: the bottleneck residual along that path (terminal
  capacities at both ends included) is pushed. Saturated path edges break the
  trees apart; every child losing its parent this way becomes an *orphan*.
- **Adoption**: each orphan searches its neighborhood for a new same-tree
  parent with minimal distance to the terminal, or is set free, cascading
  orphanhood to its own children.

The trees are never rebuilt from scratch; the orphan mechanic repairs them
incrementally, which is what makes the algorithm fast on the long, thin
augmenting paths typical of grid graphs.

## Distance labels and staleness

Every node carries a `(time, dist)` stamp: `dist` estimates the hops to the
owning terminal and is only trusted for the round `time` it was computed in.
Growth uses the stamp to re-parent same-tree neighbors onto provably shorter
paths; adoption uses it to amortize repeated walks toward the terminal to
constant time per node and round.
*/

use std::collections::VecDeque;

use crate::{
    algo::queue::ActiveQueue,
    capacity::Capacity,
    link::{pair, LinkId, INVALID_LINK},
    node::{Node, NumNodes, Parent, Terminal},
    network::FlowNetwork,
};

/// Distance assigned to candidates that cannot reach their terminal this round
const INFINITE_DIST: NumNodes = NumNodes::MAX;

/// The link direction whose residual capacity extends a `side`-rooted tree
/// across `l`.
///
/// Source trees push flow outward along `l` itself; sink trees pull flow in,
/// so the reverse direction carries the usable residual.
#[inline]
const fn tree_arc(side: Terminal, l: LinkId) -> LinkId {
    match side {
        Terminal::Source => l,
        Terminal::Sink => pair(l),
    }
}

/// One full min-cut/max-flow search over a [`FlowNetwork`].
///
/// The solver borrows the network exclusively; all auxiliary state (active
/// queue, orphan queue, round counter) lives here and is discarded after
/// [`BoykovKolmogorov::run`] returns.
pub struct BoykovKolmogorov<'a, C> {
    net: &'a mut FlowNetwork<C>,
    active: ActiveQueue,
    orphans: VecDeque<Node>,
    time: u32,
}

impl<'a, C: Capacity> BoykovKolmogorov<'a, C> {
    /// Creates a solver for `net` with every terminal-attached node active
    pub fn new(net: &'a mut FlowNetwork<C>) -> Self {
        let n = net.number_of_nodes();
        let mut active = ActiveQueue::new(n);
        for u in 0..n {
            if net.node(u).parent == Parent::Terminal {
                active.push(u);
            }
        }

        Self {
            net,
            active,
            orphans: VecDeque::new(),
            time: 0,
        }
    }

    /// Runs the search to completion and returns the max-flow value
    pub fn run(self) -> C {
        self.run_interruptible(|| false).unwrap()
    }

    /// Runs the search, polling `stop` once per round.
    ///
    /// Returns `None` if `stop` fired; the network's labels are meaningless
    /// in that case.
    pub fn run_interruptible<F>(mut self, mut stop: F) -> Option<C>
    where
        F: FnMut() -> bool,
    {
        let mut flow = C::zero();

        loop {
            if stop() {
                return None;
            }

            let Some(u) = self.next_active() else {
                break;
            };

            let bridge = self.grow(u);
            self.time += 1;

            let Some(bridge) = bridge else {
                continue;
            };

            // growth resumes at `u` once the trees are repaired; queueing it
            // up front also keeps adoption from re-inserting it behind
            self.active.push_front(u);

            flow += self.augment(bridge);

            while let Some(orphan) = self.orphans.pop_front() {
                self.adopt(orphan);
            }
        }

        Some(flow)
    }

    /// Pops active nodes until one surfaces that is still attached to a tree.
    /// Nodes cut loose by adoption while queued are silently dropped.
    fn next_active(&mut self) -> Option<Node> {
        while let Some(u) = self.active.pop() {
            if self.net.node(u).parent.is_attached() {
                return Some(u);
            }
        }
        None
    }

    /// Expands `u`'s tree by one layer.
    ///
    /// Returns the bridging link (oriented source-side -> sink-side) as soon
    /// as a neighbor of the opposite tree is reached, or `None` once the
    /// adjacency list is exhausted.
    fn grow(&mut self, u: Node) -> Option<LinkId> {
        let side = self.net.node(u).side;
        let u_time = self.net.node(u).time;
        let u_dist = self.net.node(u).dist;

        let mut l = self.net.node(u).first;
        while l != INVALID_LINK {
            let base = tree_arc(side, l);
            if !self.net.link(base).cap.is_zero() {
                let v = self.net.link(l).target;
                let neighbor = *self.net.node(v);

                match neighbor.parent {
                    Parent::Free => {
                        // annex into this tree
                        let annexed = self.net.node_mut(v);
                        annexed.side = side;
                        annexed.parent = Parent::Link(pair(l));
                        annexed.time = u_time;
                        annexed.dist = u_dist + 1;
                        self.active.push(v);
                    }
                    _ if neighbor.side != side => return Some(base),
                    _ => {
                        // same tree: steal the neighbor if our path is
                        // shorter and its estimate is not newer than ours
                        if neighbor.time <= u_time && neighbor.dist > u_dist {
                            let stolen = self.net.node_mut(v);
                            stolen.parent = Parent::Link(pair(l));
                            stolen.time = u_time;
                            stolen.dist = u_dist + 1;
                        }
                    }
                }
            }
            l = self.net.link(l).next;
        }

        None
    }

    /// Pushes the bottleneck flow across `bridge` and along both tree paths
    /// to the terminals, orphaning every node whose parent connection
    /// saturates. Returns the amount pushed.
    fn augment(&mut self, bridge: LinkId) -> C {
        let source_end = self.net.tail(bridge);
        let sink_end = self.net.link(bridge).target;

        // first pass: bottleneck over the whole path, the terminal
        // capacities at both ends included
        let mut bottleneck = self.net.link(bridge).cap;

        let mut u = source_end;
        loop {
            match self.net.node(u).parent {
                Parent::Link(p) => {
                    bottleneck = bottleneck.min(self.net.link(pair(p)).cap);
                    u = self.net.link(p).target;
                }
                Parent::Terminal => {
                    bottleneck = bottleneck.min(self.net.node(u).terminal_cap);
                    break;
                }
                _ => unreachable!("augmenting path escaped the source tree"),
            }
        }

        let mut u = sink_end;
        loop {
            match self.net.node(u).parent {
                Parent::Link(p) => {
                    bottleneck = bottleneck.min(self.net.link(p).cap);
                    u = self.net.link(p).target;
                }
                Parent::Terminal => {
                    bottleneck = bottleneck.min(-self.net.node(u).terminal_cap);
                    break;
                }
                _ => unreachable!("augmenting path escaped the sink tree"),
            }
        }

        debug_assert!(bottleneck > C::zero());

        // second pass: push, saturate, orphan
        self.net.link_mut(pair(bridge)).cap += bottleneck;
        self.net.link_mut(bridge).cap -= bottleneck;

        let mut u = source_end;
        loop {
            match self.net.node(u).parent {
                Parent::Link(p) => {
                    self.net.link_mut(p).cap += bottleneck;
                    self.net.link_mut(pair(p)).cap -= bottleneck;
                    if self.net.link(pair(p)).cap.is_zero() {
                        self.orphan_front(u);
                    }
                    u = self.net.link(p).target;
                }
                Parent::Terminal => {
                    self.net.node_mut(u).terminal_cap -= bottleneck;
                    if self.net.node(u).terminal_cap.is_zero() {
                        self.orphan_front(u);
                    }
                    break;
                }
                _ => unreachable!(),
            }
        }

        let mut u = sink_end;
        loop {
            match self.net.node(u).parent {
                Parent::Link(p) => {
                    self.net.link_mut(pair(p)).cap += bottleneck;
                    self.net.link_mut(p).cap -= bottleneck;
                    if self.net.link(p).cap.is_zero() {
                        self.orphan_front(u);
                    }
                    u = self.net.link(p).target;
                }
                Parent::Terminal => {
                    self.net.node_mut(u).terminal_cap += bottleneck;
                    if self.net.node(u).terminal_cap.is_zero() {
                        self.orphan_front(u);
                    }
                    break;
                }
                _ => unreachable!(),
            }
        }

        bottleneck
    }

    /// Reconnects the orphan `u` to the best reachable same-tree parent, or
    /// sets it free and cascades orphanhood to its children.
    fn adopt(&mut self, u: Node) {
        let side = self.net.node(u).side;
        let mut best_dist = INFINITE_DIST;
        let mut best_link = INVALID_LINK;

        // candidates are same-tree neighbors with residual capacity toward
        // the orphan (the reverse orientation of growth); among them, pick
        // the one closest to the terminal
        let mut l = self.net.node(u).first;
        while l != INVALID_LINK {
            let base = tree_arc(side.opposite(), l);
            if !self.net.link(base).cap.is_zero() {
                let v = self.net.link(l).target;
                if self.net.node(v).side == side && self.net.node(v).parent.is_attached() {
                    if let Some(d) = self.distance_to_terminal(v) {
                        if d < best_dist {
                            best_dist = d;
                            best_link = l;
                        }
                    }
                }
            }
            l = self.net.link(l).next;
        }

        if best_link != INVALID_LINK {
            let node = self.net.node_mut(u);
            node.parent = Parent::Link(best_link);
            node.time = self.time;
            node.dist = best_dist + 1;
            return;
        }

        // no valid parent in reach: set the node free
        self.net.node_mut(u).parent = Parent::Free;
        self.net.node_mut(u).time = 0;

        let mut l = self.net.node(u).first;
        while l != INVALID_LINK {
            let v = self.net.link(l).target;
            if self.net.node(v).side == side && self.net.node(v).parent.is_attached() {
                // the neighbor may now extend its tree back here
                if !self.net.link(tree_arc(side.opposite(), l)).cap.is_zero() {
                    self.active.push(v);
                }
                // children of the demoted node queue up behind all current orphans
                if let Parent::Link(p) = self.net.node(v).parent {
                    if self.net.link(p).target == u {
                        self.orphan_back(v);
                    }
                }
            }
            l = self.net.link(l).next;
        }
    }

    /// Walks parent pointers from `v` to its terminal and returns the path
    /// length, or `None` if the walk runs into an orphan (no valid origin
    /// this round).
    ///
    /// Nodes already stamped with the current round short-circuit the walk;
    /// on success the walked prefix is stamped with its now-known distances,
    /// so later walks crossing it finish early.
    fn distance_to_terminal(&mut self, v: Node) -> Option<NumNodes> {
        let mut d = 0;
        let mut j = v;
        loop {
            if self.net.node(j).time == self.time {
                d += self.net.node(j).dist;
                break;
            }
            d += 1;
            match self.net.node(j).parent {
                Parent::Terminal => {
                    let root = self.net.node_mut(j);
                    root.time = self.time;
                    root.dist = 1;
                    break;
                }
                Parent::Link(p) => j = self.net.link(p).target,
                Parent::Orphan | Parent::Free => return None,
            }
        }

        let mut j = v;
        let mut dist = d;
        while self.net.node(j).time != self.time {
            {
                let node = self.net.node_mut(j);
                node.time = self.time;
                node.dist = dist;
            }
            dist -= 1;
            j = match self.net.node(j).parent {
                Parent::Link(p) => self.net.link(p).target,
                _ => break,
            };
        }

        Some(d)
    }

    fn orphan_front(&mut self, u: Node) {
        self.net.node_mut(u).parent = Parent::Orphan;
        self.orphans.push_front(u);
    }

    fn orphan_back(&mut self, u: Node) {
        self.net.node_mut(u).parent = Parent::Orphan;
        self.orphans.push_back(u);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        gens::{GridNetwork, NetworkGenerator, NumEdgesGen, NumNodesGen, RandomNetwork},
        network::FlowNetwork,
        node::Terminal,
        testing::{brute_force_min_cut, cut_value},
    };
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn solved_labels(net: &FlowNetwork<i64>) -> Vec<Terminal> {
        (0..net.number_of_nodes()).map(|u| net.cut_side(u)).collect_vec()
    }

    #[test]
    fn single_node_pushes_nothing() {
        let mut net = FlowNetwork::<i64>::new(1, 1);
        net.set_terminal_caps(0, 5, 0);
        assert_eq!(net.max_flow(), 0);
        assert_eq!(net.cut_side(0), Terminal::Source);
    }

    #[test]
    fn two_node_saturation() {
        let mut net = FlowNetwork::<i64>::new(2, 1);
        net.set_terminal_caps(0, 5, 0);
        net.set_terminal_caps(1, 0, 5);
        net.add_edge(0, 1, 3);

        assert_eq!(net.max_flow(), 3);
        assert_eq!(net.cut_side(0), Terminal::Source);
        assert_eq!(net.cut_side(1), Terminal::Sink);
    }

    #[test]
    fn chain_cuts_at_the_bottleneck() {
        let mut net = FlowNetwork::<i64>::new(4, 3);
        net.set_terminal_caps(0, 10, 0);
        net.set_terminal_caps(3, 0, 10);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 2, 3);
        net.add_edge(2, 3, 7);

        assert_eq!(net.max_flow(), 3);
        assert_eq!(
            solved_labels(&net),
            vec![
                Terminal::Source,
                Terminal::Source,
                Terminal::Sink,
                Terminal::Sink
            ]
        );
    }

    #[test]
    fn diamond_saturates_both_branches() {
        let mut net = FlowNetwork::<i64>::new(4, 5);
        net.set_terminal_caps(0, 9, 0);
        net.set_terminal_caps(3, 0, 9);
        net.add_edge(0, 1, 4);
        net.add_edge(0, 2, 3);
        net.add_edge(1, 3, 4);
        net.add_edge(2, 3, 3);
        net.add_edge(1, 2, 1);

        assert_eq!(net.max_flow(), 7);
    }

    #[test]
    fn terminal_only_exchange_needs_no_edges() {
        // both terminals compete on the same node; the smaller side cancels
        // out at construction, so no flow crosses any cut
        let mut net = FlowNetwork::<i64>::new(2, 1);
        net.set_terminal_caps(0, 7, 3);
        net.set_terminal_caps(1, 2, 8);
        assert_eq!(net.max_flow(), 0);
        assert_eq!(net.cut_side(0), Terminal::Source);
        assert_eq!(net.cut_side(1), Terminal::Sink);
    }

    #[test]
    fn flow_matches_brute_force_on_random_networks() {
        let rng = &mut Pcg64::seed_from_u64(1234);

        for _ in 0..200 {
            let n = rng.random_range(2..=8u32);
            let max_edges = n * (n - 1) / 2;
            let m = rng.random_range(0..=max_edges);

            let instance = RandomNetwork::new()
                .nodes(n)
                .edges(m)
                .max_unary(10)
                .max_pairwise(6)
                .generate(rng);

            let mut net = instance.build();
            let flow = net.max_flow();

            assert_eq!(flow, brute_force_min_cut(&instance));
            // the returned labeling must be a certificate of that value
            assert_eq!(
                flow,
                cut_value(&instance, |u| net.cut_side(u) == Terminal::Sink)
            );
        }
    }

    #[test]
    fn repeated_solves_are_deterministic() {
        let rng = &mut Pcg64::seed_from_u64(99);

        for _ in 0..20 {
            let instance = RandomNetwork::new()
                .nodes(12)
                .edges(30)
                .max_unary(20)
                .max_pairwise(8)
                .generate(rng);

            let mut first = instance.build();
            let mut second = instance.build();

            assert_eq!(first.max_flow(), second.max_flow());
            assert_eq!(solved_labels(&first), solved_labels(&second));
        }
    }

    #[test]
    fn raising_one_edge_never_lowers_the_flow() {
        let rng = &mut Pcg64::seed_from_u64(7);

        for _ in 0..50 {
            let instance = RandomNetwork::new()
                .nodes(8)
                .edges(14)
                .max_unary(12)
                .max_pairwise(5)
                .generate(rng);
            let base_flow = instance.build().max_flow();

            let edge = rng.random_range(0..instance.edges.len());
            let mut raised = instance.clone();
            raised.edges[edge].2 += rng.random_range(1..=10i64);

            assert!(raised.build().max_flow() >= base_flow);
        }
    }

    #[test]
    fn terminal_swap_mirrors_the_cut() {
        let rng = &mut Pcg64::seed_from_u64(4321);

        for _ in 0..50 {
            let instance = RandomNetwork::new()
                .nodes(9)
                .edges(16)
                .max_unary(10)
                .max_pairwise(6)
                .generate(rng);
            let swapped = instance.terminal_swapped();

            let mut net = instance.build();
            let mut mirror = swapped.build();

            let flow = net.max_flow();
            assert_eq!(flow, mirror.max_flow());

            // the mirrored labeling, read back flipped, cuts the original
            // instance at the same optimal value
            assert_eq!(
                flow,
                cut_value(&instance, |u| mirror.cut_side(u) == Terminal::Source)
            );
        }
    }

    #[test]
    fn terminal_swap_flips_labels_exactly_on_a_chain() {
        let build = |flip: bool| {
            let mut net = FlowNetwork::<i64>::new(4, 3);
            let (s, k) = if flip { (0, 10) } else { (10, 0) };
            net.set_terminal_caps(0, s, k);
            net.set_terminal_caps(3, k, s);
            net.add_edge(0, 1, 5);
            net.add_edge(1, 2, 3);
            net.add_edge(2, 3, 7);
            net
        };

        let mut net = build(false);
        let mut mirror = build(true);
        assert_eq!(net.max_flow(), mirror.max_flow());

        for u in 0..4 {
            assert_eq!(net.cut_side(u), mirror.cut_side(u).opposite());
        }
    }

    #[test]
    fn isolated_nodes_default_to_source() {
        let mut net = FlowNetwork::<i64>::new(5, 1);
        net.set_terminal_caps(0, 5, 0);
        net.set_terminal_caps(1, 0, 5);
        net.add_edge(0, 1, 3);
        // nodes 2..4 have no links and no terminal capacity

        assert_eq!(net.max_flow(), 3);
        for u in 2..5 {
            assert_eq!(net.cut_side(u), Terminal::Source);
        }

        let cardinality = net.source_side().cardinality();
        assert_eq!(cardinality, 4);
    }

    #[test]
    fn grid_labeling_certifies_its_flow() {
        let rng = &mut Pcg64::seed_from_u64(31337);

        let instance = GridNetwork::new()
            .width(12)
            .height(9)
            .max_unary(16)
            .max_pairwise(4)
            .generate(rng);

        let mut net = instance.build();
        let flow = net.max_flow();

        assert_eq!(
            flow,
            cut_value(&instance, |u| net.cut_side(u) == Terminal::Sink)
        );
    }

    #[test]
    fn small_grid_matches_brute_force() {
        let rng = &mut Pcg64::seed_from_u64(5);

        for _ in 0..30 {
            let instance = GridNetwork::new()
                .width(3)
                .height(3)
                .max_unary(9)
                .max_pairwise(4)
                .generate(rng);

            let mut net = instance.build();
            assert_eq!(net.max_flow(), brute_force_min_cut(&instance));
        }
    }

    #[test]
    fn narrow_capacity_type_works() {
        let mut net = FlowNetwork::<i32>::new(3, 2);
        net.set_terminal_caps(0, 4, 0);
        net.set_terminal_caps(2, 0, 4);
        net.add_edge(0, 1, 2);
        net.add_edge(1, 2, 3);
        assert_eq!(net.max_flow(), 2i32);
    }

    #[test]
    fn interruption_abandons_the_solve() {
        let mut net = FlowNetwork::<i64>::new(2, 1);
        net.set_terminal_caps(0, 5, 0);
        net.set_terminal_caps(1, 0, 5);
        net.add_edge(0, 1, 3);

        assert_eq!(net.max_flow_interruptible(|| true), None);
    }

    #[test]
    fn interruption_after_budget_exhausts() {
        let rng = &mut Pcg64::seed_from_u64(8);
        let instance = RandomNetwork::new()
            .nodes(10)
            .edges(20)
            .max_unary(10)
            .max_pairwise(5)
            .generate(rng);

        let expected = instance.build().max_flow();

        // a generous round budget lets the solve finish normally
        let mut rounds = 0usize;
        let mut net = instance.build();
        let flow = net.max_flow_interruptible(|| {
            rounds += 1;
            rounds > 100_000
        });
        assert_eq!(flow, Some(expected));
    }

    #[test]
    fn second_solve_finds_no_residual_path() {
        let mut net = FlowNetwork::<i64>::new(2, 1);
        net.set_terminal_caps(0, 5, 0);
        net.set_terminal_caps(1, 0, 5);
        net.add_edge(0, 1, 3);

        assert_eq!(net.max_flow(), 3);
        assert_eq!(net.max_flow(), 0);
        assert_eq!(net.cut_side(0), Terminal::Source);
        assert_eq!(net.cut_side(1), Terminal::Sink);
    }
}
