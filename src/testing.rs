//! Exhaustive reference evaluation of small instances for the test suite.

use crate::{gens::NetworkInstance, node::Node};

/// Value of the cut induced by a labeling: net terminal capacities on the
/// wrong side plus all crossing edge capacities. `sink_side(u)` returns
/// *true* if the labeling places `u` on the sink side.
pub(crate) fn cut_value<F>(instance: &NetworkInstance, sink_side: F) -> i64
where
    F: Fn(Node) -> bool,
{
    // replay terminal entries so repeated entries keep last-write semantics
    let mut net_caps = vec![0i64; instance.number_of_nodes as usize];
    for &(u, source_cap, sink_cap) in &instance.terminals {
        net_caps[u as usize] = source_cap - sink_cap;
    }

    let mut value = 0;
    for (u, &cap) in net_caps.iter().enumerate() {
        if sink_side(u as Node) {
            value += cap.max(0);
        } else {
            value += (-cap).max(0);
        }
    }
    for &(u, v, cap) in &instance.edges {
        if sink_side(u) != sink_side(v) {
            value += cap;
        }
    }

    value
}

/// Minimum cut value of an instance by enumerating all `2^n` labelings.
/// ** Panics if the instance has more than 20 nodes **
pub(crate) fn brute_force_min_cut(instance: &NetworkInstance) -> i64 {
    let n = instance.number_of_nodes;
    assert!(n <= 20, "Instance too large for exhaustive search!");

    (0u32..1 << n)
        .map(|mask| cut_value(instance, |u| mask >> u & 1 == 1))
        .min()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> NetworkInstance {
        NetworkInstance {
            number_of_nodes: 4,
            terminals: vec![(0, 10, 0), (3, 0, 10)],
            edges: vec![(0, 1, 5), (1, 2, 3), (2, 3, 7)],
        }
    }

    #[test]
    fn cut_value_counts_wrong_side_terminals_and_crossings() {
        let instance = chain();

        // cutting between nodes 1 and 2 costs exactly that edge
        assert_eq!(cut_value(&instance, |u| u >= 2), 3);
        // cutting between 0 and 1 costs the 0-1 edge
        assert_eq!(cut_value(&instance, |u| u >= 1), 5);
        // putting everything on the source side pays the sink terminal
        assert_eq!(cut_value(&instance, |_| false), 10);
        // putting the source node on the sink side pays its terminal
        assert_eq!(cut_value(&instance, |_| true), 10);
    }

    #[test]
    fn brute_force_finds_the_bottleneck() {
        assert_eq!(brute_force_min_cut(&chain()), 3);
    }

    #[test]
    fn repeated_terminal_entries_keep_the_last_value() {
        let instance = NetworkInstance {
            number_of_nodes: 1,
            terminals: vec![(0, 100, 0), (0, 0, 2)],
            edges: vec![],
        };
        assert_eq!(cut_value(&instance, |_| false), 2);
        assert_eq!(brute_force_min_cut(&instance), 0);
    }
}
