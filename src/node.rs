/*!
# Node Representation

We choose `Node = u32` as segmentation graphs rarely involve more than `2^32` vertices
(a node per pixel leaves room for a 65536 x 65536 image).
This allows us to (1) save space by not using `usize` or `u64` and (2) index the arena
directly without abstracting over node values.
*/

use crate::link::LinkId;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a network!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// The two terminals of the network.
///
/// During the search, a node's terminal denotes which tree currently owns it.
/// After the solve, it is the side of the minimum cut the node ends up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminal {
    /// The source terminal (label `0`)
    #[default]
    Source,
    /// The sink terminal (label `1`)
    Sink,
}

impl Terminal {
    /// Returns the other terminal
    pub const fn opposite(self) -> Self {
        match self {
            Terminal::Source => Terminal::Sink,
            Terminal::Sink => Terminal::Source,
        }
    }

    /// Returns the conventional numeric label: `0` for source, `1` for sink
    pub const fn label(self) -> u8 {
        match self {
            Terminal::Source => 0,
            Terminal::Sink => 1,
        }
    }
}

/// A node's connection to its search tree.
///
/// Replaces the magic pointer constants of classical max-flow implementations
/// with an explicit tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parent {
    /// The node belongs to no tree
    #[default]
    Free,
    /// The node is rooted directly at its terminal
    Terminal,
    /// The node lost its parent mid-augmentation and awaits adoption
    Orphan,
    /// The link from the node to its tree parent
    Link(LinkId),
}

impl Parent {
    /// Returns *true* if the node belongs to a tree (including mid-repair orphans)
    pub const fn is_attached(self) -> bool {
        !matches!(self, Parent::Free)
    }
}
