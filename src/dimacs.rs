//! Parser for the DIMACS shortest-paths input format.
//!
//! Line-oriented: `c <text>` comments are ignored, `p sp <n> <m>` states
//! the problem size and must precede the arcs, and `a <u> <v> <w>` adds a
//! directed edge with 1-based endpoints. Duplicate arcs between the same
//! ordered pair are skipped with a warning rather than aborting the parse;
//! everything else malformed is an error. Vertex indices are converted to
//! the crate's 0-based convention here.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SsspError};
use crate::graph::{WeightedEdge, WeightedGraph, MAX_EDGE_WEIGHT};

/// Parses a DIMACS shortest-paths graph from a reader.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<WeightedGraph> {
    let mut graph: Option<WeightedGraph> = None;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_number + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("c") | None => {}
            Some("p") => {
                if graph.is_some() {
                    return Err(SsspError::InvalidInput(format!(
                        "line {line_number}: duplicate problem line"
                    )));
                }
                if tokens.next() != Some("sp") {
                    return Err(SsspError::InvalidInput(format!(
                        "line {line_number}: not a shortest-paths problem"
                    )));
                }
                let n: usize = next_number(&mut tokens, line_number, "vertex count")?;
                let _m: usize = next_number(&mut tokens, line_number, "edge count")?;
                graph = Some(WeightedGraph::new(n)?);
            }
            Some("a") => {
                let graph = graph.as_mut().ok_or_else(|| {
                    SsspError::InvalidInput(format!(
                        "line {line_number}: arc before the problem line"
                    ))
                })?;
                let u: usize = next_number(&mut tokens, line_number, "source")?;
                let v: usize = next_number(&mut tokens, line_number, "target")?;
                let w: i64 = next_number(&mut tokens, line_number, "weight")?;
                if u < 1 || v < 1 {
                    return Err(SsspError::InvalidInput(format!(
                        "line {line_number}: vertex indices are 1-based"
                    )));
                }
                if w < 1 || w > MAX_EDGE_WEIGHT as i64 {
                    return Err(SsspError::InvalidInput(format!(
                        "line {line_number}: weight {w} out of range"
                    )));
                }
                match graph.add_edge(WeightedEdge::new(u - 1, v - 1, w as i32)) {
                    Ok(()) => {}
                    Err(SsspError::ParallelEdge { .. }) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(line_number, u, v, "ignoring parallel edge");
                    }
                    Err(err) => {
                        return Err(SsspError::InvalidInput(format!(
                            "line {line_number}: {err}"
                        )))
                    }
                }
            }
            // other descriptor lines are not part of the sp format we need
            Some(_) => {}
        }
    }

    graph.ok_or_else(|| SsspError::InvalidInput("missing problem line".into()))
}

/// Parses a DIMACS graph from a file on disk.
pub fn read_dimacs_file<P: AsRef<Path>>(path: P) -> Result<WeightedGraph> {
    let file = File::open(path)?;
    parse_dimacs(BufReader::new(file))
}

fn next_number<'a, T, I>(tokens: &mut I, line_number: usize, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| SsspError::InvalidInput(format!("line {line_number}: bad {what}")))
}
