//! Line-oriented corpus text format.
//!
//! The format interleaves three directives:
//!
//! - `#` begins a new graph (finalizing the previous one, if it has at least
//!   one vertex);
//! - `v <id> <label>` declares a vertex;
//! - `e <src> <dst> <label>` declares an edge between previously declared
//!   vertices.
//!
//! Blank lines are ignored. End of input finalizes a trailing in-progress
//! graph. [`write_corpus`] renders the inverse form, so a split corpus can be
//! persisted and re-parsed losslessly.

use std::io;

use crate::{
    error::FormatError,
    graph::{Graph, GraphBuilder, GraphError},
};

/// Parses a whole corpus from the line-oriented text format.
///
/// # Errors
/// Returns [`FormatError`] carrying the offending 1-based line number when a
/// line is malformed or an edge references an undeclared vertex.
///
/// # Examples
/// ```
/// use kasago_core::parse_corpus;
///
/// let graphs = parse_corpus("#\nv 0 A\nv 1 B\ne 0 1 x\n")?;
/// assert_eq!(graphs.len(), 1);
/// assert_eq!(graphs[0].vertex_label(0), Some("A"));
/// assert!(graphs[0].has_edge(0, 1));
/// # Ok::<(), kasago_core::FormatError>(())
/// ```
pub fn parse_corpus(text: &str) -> Result<Vec<Graph>, FormatError> {
    let mut graphs = Vec::new();
    let mut current = GraphBuilder::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') {
            finalize(&mut current, &mut graphs);
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields.first().copied() {
            Some("v") => parse_vertex(line, &fields, &mut current)?,
            Some("e") => parse_edge(line, &fields, &mut current)?,
            Some(directive) => {
                return Err(FormatError::UnknownDirective {
                    line,
                    directive: directive.to_owned(),
                });
            }
            None => {}
        }
    }

    finalize(&mut current, &mut graphs);
    Ok(graphs)
}

/// Parses one integer class label per non-empty line.
///
/// Pairing the result with a graph corpus (count check included) is the
/// caller's job; see [`crate::Corpus::with_labels`].
///
/// # Errors
/// Returns [`FormatError::InvalidInt`] when a non-empty line is not an
/// integer in the label domain.
pub fn parse_labels(text: &str) -> Result<Vec<u8>, FormatError> {
    let mut labels = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let label = trimmed.parse().map_err(|_| FormatError::InvalidInt {
            line: index + 1,
            token: trimmed.to_owned(),
        })?;
        labels.push(label);
    }
    Ok(labels)
}

/// Renders graphs in the corpus text format.
///
/// # Errors
/// Returns [`io::Error`] when writing to `writer` fails.
pub fn write_corpus<W: io::Write>(graphs: &[Graph], writer: &mut W) -> io::Result<()> {
    for graph in graphs {
        writeln!(writer, "#")?;
        for vertex in graph.vertices() {
            writeln!(writer, "v {} {}", vertex.id(), vertex.label())?;
        }
        for edge in graph.edges() {
            writeln!(writer, "e {} {} {}", edge.source(), edge.target(), edge.label())?;
        }
    }
    Ok(())
}

/// Renders one class label per line.
///
/// # Errors
/// Returns [`io::Error`] when writing to `writer` fails.
pub fn write_labels<W: io::Write>(labels: &[u8], writer: &mut W) -> io::Result<()> {
    for label in labels {
        writeln!(writer, "{label}")?;
    }
    Ok(())
}

/// Appends the in-progress graph when it has at least one vertex.
fn finalize(current: &mut GraphBuilder, graphs: &mut Vec<Graph>) {
    if !current.is_empty() {
        let builder = std::mem::take(current);
        graphs.push(builder.finish());
    }
}

fn parse_vertex(line: usize, fields: &[&str], current: &mut GraphBuilder) -> Result<(), FormatError> {
    let &[_, id, label] = fields else {
        return Err(FormatError::FieldCount {
            line,
            directive: 'v',
            expected: 3,
            found: fields.len(),
        });
    };
    let id = parse_u32(line, id)?;
    current
        .add_vertex(id, label)
        .map_err(|err| lift_graph_error(line, err))
}

fn parse_edge(line: usize, fields: &[&str], current: &mut GraphBuilder) -> Result<(), FormatError> {
    let &[_, source, target, label] = fields else {
        return Err(FormatError::FieldCount {
            line,
            directive: 'e',
            expected: 4,
            found: fields.len(),
        });
    };
    let source = parse_u32(line, source)?;
    let target = parse_u32(line, target)?;
    current
        .add_edge(source, target, label)
        .map_err(|err| lift_graph_error(line, err))
}

fn parse_u32(line: usize, token: &str) -> Result<u32, FormatError> {
    token.parse().map_err(|_| FormatError::InvalidInt {
        line,
        token: token.to_owned(),
    })
}

fn lift_graph_error(line: usize, err: GraphError) -> FormatError {
    match err {
        GraphError::DuplicateVertex { id } => FormatError::DuplicateVertex { line, id },
        GraphError::UnknownVertex { missing, .. } => FormatError::UnknownVertex {
            line,
            vertex: missing,
        },
        GraphError::DuplicateEdge { .. } => FormatError::DuplicateEdge { line },
    }
}
