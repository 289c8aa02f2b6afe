//! # NetworkList
//!
//! A line-oriented instance format: a header `p cut <n> <m>` followed by any
//! number of terminal records `t <node> <source_cap> <sink_cap>` and exactly
//! `m` edge records `e <u> <v> <cap>`. Nodes are 1-indexed in the file; lines
//! starting with the comment identifier (`c` by default) are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Result, Write},
    path::Path,
};

use super::*;
use crate::{
    gens::NetworkInstance,
    link::NumLinks,
    node::{Node, NumNodes},
};

/// A reader for the NetworkList-Format
#[derive(Debug, Clone)]
pub struct NetworkListReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
}

impl Default for NetworkListReader {
    fn default() -> Self {
        Self {
            comment_identifier: "c".to_string(),
        }
    }
}

impl NetworkListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> Self {
        self.comment_identifier = c.into();
        self
    }

    /// Reads an instance from the given reader.
    ///
    /// # Errors
    /// Returns an error if the header is missing, a record is malformed, a
    /// node id is out of range, a capacity is negative, or the edge count
    /// does not match the header.
    pub fn try_read<R: BufRead>(&self, reader: R) -> Result<NetworkInstance> {
        let mut lines = NonCommentLines {
            lines: reader.lines(),
            comment_identifier: &self.comment_identifier,
        };

        let header = lines
            .try_next()?
            .ok_or(io_error!(ErrorKind::NotFound, "Header not found"))?;
        let mut parts = header.split(' ').filter(|t| !t.is_empty());
        raise_error_unless!(
            parts.next() == Some("p"),
            ErrorKind::InvalidData,
            "Expected a `p cut <n> <m>` header line."
        );
        raise_error_unless!(
            parts.next() == Some("cut"),
            ErrorKind::InvalidData,
            "Unknown problem descriptor."
        );
        let n: NumNodes = parse_next_value!(parts, "Number of nodes");
        let m: NumLinks = parse_next_value!(parts, "Number of edges");
        raise_error_unless!(
            n > 0,
            ErrorKind::InvalidData,
            "Empty networks are not supported."
        );

        let mut terminals = Vec::new();
        let mut edges = Vec::with_capacity(m as usize);

        while let Some(line) = lines.try_next()? {
            let mut parts = line.split(' ').filter(|t| !t.is_empty());
            match parts.next() {
                Some("t") => {
                    let u: Node = parse_next_value!(parts, "Terminal node");
                    let source_cap: i64 = parse_next_value!(parts, "Source capacity");
                    let sink_cap: i64 = parse_next_value!(parts, "Sink capacity");
                    raise_error_unless!(
                        (1..=n).contains(&u),
                        ErrorKind::InvalidData,
                        format!("Terminal node {u} out of range.")
                    );
                    raise_error_unless!(
                        source_cap >= 0 && sink_cap >= 0,
                        ErrorKind::InvalidData,
                        "Capacities must be non-negative."
                    );
                    terminals.push((u - 1, source_cap, sink_cap));
                }
                Some("e") => {
                    let u: Node = parse_next_value!(parts, "Edge tail");
                    let v: Node = parse_next_value!(parts, "Edge head");
                    let cap: i64 = parse_next_value!(parts, "Edge capacity");
                    raise_error_unless!(
                        (1..=n).contains(&u) && (1..=n).contains(&v),
                        ErrorKind::InvalidData,
                        format!("Edge ({u},{v}) out of range.")
                    );
                    raise_error_unless!(
                        u != v,
                        ErrorKind::InvalidData,
                        "Self-loops are not supported."
                    );
                    raise_error_unless!(
                        cap >= 0,
                        ErrorKind::InvalidData,
                        "Capacities must be non-negative."
                    );
                    edges.push((u - 1, v - 1, cap));
                }
                Some(record) => {
                    return Err(io_error!(
                        ErrorKind::InvalidData,
                        format!("Unknown record type `{record}`.")
                    ));
                }
                None => continue,
            }
        }

        raise_error_unless!(
            edges.len() == m as usize,
            ErrorKind::InvalidData,
            "Edge count does not match the header."
        );

        Ok(NetworkInstance {
            number_of_nodes: n,
            terminals,
            edges,
        })
    }

    /// Reads an instance from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its contents are not
    /// a valid NetworkList instance.
    pub fn try_read_file<P: AsRef<Path>>(&self, path: P) -> Result<NetworkInstance> {
        self.try_read(BufReader::new(File::open(path)?))
    }
}

/// Line iterator skipping comment lines and propagating IO errors
struct NonCommentLines<'a, R> {
    lines: Lines<R>,
    comment_identifier: &'a str,
}

impl<'a, R: BufRead> NonCommentLines<'a, R> {
    fn try_next(&mut self) -> Result<Option<String>> {
        loop {
            match self.lines.next() {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.starts_with(self.comment_identifier) => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }
}

/// A writer for the NetworkList-Format
#[derive(Debug, Clone, Default)]
pub struct NetworkListWriter;

impl NetworkListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self
    }

    /// Writes the instance to the given writer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn try_write<W: Write>(&self, instance: &NetworkInstance, mut writer: W) -> Result<()> {
        writeln!(
            writer,
            "p cut {} {}",
            instance.number_of_nodes,
            instance.edges.len()
        )?;

        for &(u, source_cap, sink_cap) in &instance.terminals {
            writeln!(writer, "t {} {source_cap} {sink_cap}", u + 1)?;
        }
        for &(u, v, cap) in &instance.edges {
            writeln!(writer, "e {} {} {cap}", u + 1, v + 1)?;
        }

        Ok(())
    }

    /// Writes the instance to a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or writing fails.
    pub fn try_write_file<P: AsRef<Path>>(
        &self,
        instance: &NetworkInstance,
        path: P,
    ) -> Result<()> {
        self.try_write(instance, BufWriter::new(File::create(path)?))
    }
}
