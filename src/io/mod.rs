/*!
# IO

Utilities for reading and writing min-cut instances and cut results.

## Formats

- **NetworkList**: a plain-text instance format consisting of a `p cut <n> <m>` header
  followed by `t <node> <source_cap> <sink_cap>` terminal records and
  `e <u> <v> <cap>` edge records, one per line, with 1-indexed nodes and
  `c`-prefixed comment lines. See [`NetworkListReader`] / [`NetworkListWriter`].
- **Dot**: the [DOT language](https://graphviz.org/doc/info/lang.html) of
  [GraphViz](https://graphviz.org/), write-only, rendering a solved network
  with the source-side nodes filled in. See [`CutDotWriter`].

All readers operate on [`BufRead`](std::io::BufRead), all writers on
[`Write`](std::io::Write), and both report failures as
[`std::io::Result`].
*/

pub mod dot;
pub mod list;

pub use dot::*;
pub use list::*;

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
