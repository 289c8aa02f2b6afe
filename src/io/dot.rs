//! # Dot
//!
//! The Dot-Format is a very extensive format used by
//! [GraphViz](https://graphviz.org/) to allow for detailed visualizations.
//! We only use basic functionality: drawing the network's edges and filling
//! the nodes that end up on the source side of the cut, which makes the
//! computed segmentation visible at a glance.

use std::io::{Result, Write};

use crate::{
    capacity::Capacity,
    network::FlowNetwork,
    node::{Node, Terminal},
};

/// A writer rendering a solved network and its cut in the Dot-Format
#[derive(Debug, Clone)]
pub struct CutDotWriter {
    /// Increment nodes by 1 before writing
    inc_nodes: bool,
    /// Prefix of a node (default: 'u')
    prefix: String,
    /// Fill color for source-side nodes (default: 'lightblue')
    color: String,
}

impl Default for CutDotWriter {
    fn default() -> Self {
        Self {
            inc_nodes: true,
            prefix: "u".to_string(),
            color: "lightblue".to_string(),
        }
    }
}

impl CutDotWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If *false*, nodes retain their internal value (-1 that of output)
    pub fn inc_nodes(mut self, inc_nodes: bool) -> Self {
        self.inc_nodes = inc_nodes;
        self
    }

    /// Sets the prefix of a node (`u` by default)
    pub fn node_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the fill color of source-side nodes (`lightblue` by default)
    pub fn source_color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = color.into();
        self
    }

    /// Formats a node depending on `self.prefix, self.inc_nodes`
    fn format_node(&self, u: Node) -> String {
        let u = u + self.inc_nodes as Node;
        format!("{}{u}", self.prefix)
    }

    /// Writes the network with its source-side nodes filled.
    ///
    /// Should be called after
    /// [`max_flow`](crate::network::FlowNetwork::max_flow); beforehand only
    /// the terminal-attached nodes are colored.
    ///
    /// # Errors
    /// Returns an error if writing fails (e.g. IO errors).
    pub fn try_write_cut<C, W>(&self, net: &FlowNetwork<C>, mut writer: W) -> Result<()>
    where
        C: Capacity,
        W: Write,
    {
        writeln!(writer, "graph {{")?;

        for (u, v) in net.edges() {
            write!(writer, "{}--{};", self.format_node(u), self.format_node(v))?;
        }
        writeln!(writer)?;

        for u in (0..net.number_of_nodes()).filter(|&u| net.cut_side(u) == Terminal::Source) {
            write!(
                writer,
                "{}[style=filled, color={}]",
                self.format_node(u),
                self.color
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "}}")
    }
}
