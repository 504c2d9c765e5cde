//! Parsing the miner's pattern stream back into the graph model.

use kasago_core::{Graph, GraphBuilder, MinerError};

use crate::labels::LabelTables;

/// Parses the miner's stdout: `t`-prefixed headers separate patterns, and
/// `v <id> <code>` / `e <src> <dst> <code>` lines carry interned labels.
///
/// Anything after the `t` token on a header line (pattern ids, support
/// counts) is ignored. Any other non-blank content is malformed — partial
/// pattern sets are never returned.
pub(crate) fn parse_patterns(text: &str, tables: &LabelTables) -> Result<Vec<Graph>, MinerError> {
    let mut graphs = Vec::new();
    let mut current = GraphBuilder::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match fields.first().copied() {
            Some("t") => finalize(&mut current, &mut graphs),
            Some("v") => parse_vertex(line, &fields, tables, &mut current)?,
            Some("e") => parse_edge(line, &fields, tables, &mut current)?,
            Some(directive) => {
                return Err(MinerError::Malformed {
                    line,
                    message: format!("unrecognized directive `{directive}`"),
                });
            }
            None => {}
        }
    }

    finalize(&mut current, &mut graphs);
    Ok(graphs)
}

fn finalize(current: &mut GraphBuilder, graphs: &mut Vec<Graph>) {
    if !current.is_empty() {
        let builder = std::mem::take(current);
        graphs.push(builder.finish());
    }
}

fn parse_vertex(
    line: usize,
    fields: &[&str],
    tables: &LabelTables,
    current: &mut GraphBuilder,
) -> Result<(), MinerError> {
    let &[_, id, code] = fields else {
        return Err(field_count(line, 'v', 3, fields.len()));
    };
    let id = parse_number(line, id)?;
    let code: usize = parse_number(line, code)?;
    let label = tables.vertices.resolve(code).ok_or_else(|| {
        MinerError::Malformed {
            line,
            message: format!("unknown vertex label code {code}"),
        }
    })?;
    current
        .add_vertex(id, label)
        .map_err(|err| MinerError::Malformed {
            line,
            message: err.to_string(),
        })
}

fn parse_edge(
    line: usize,
    fields: &[&str],
    tables: &LabelTables,
    current: &mut GraphBuilder,
) -> Result<(), MinerError> {
    let &[_, source, target, code] = fields else {
        return Err(field_count(line, 'e', 4, fields.len()));
    };
    let source = parse_number(line, source)?;
    let target = parse_number(line, target)?;
    let code: usize = parse_number(line, code)?;
    let label = tables.edges.resolve(code).ok_or_else(|| {
        MinerError::Malformed {
            line,
            message: format!("unknown edge label code {code}"),
        }
    })?;
    current
        .add_edge(source, target, label)
        .map_err(|err| MinerError::Malformed {
            line,
            message: err.to_string(),
        })
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, MinerError> {
    token.parse().map_err(|_| MinerError::Malformed {
        line,
        message: format!("invalid integer `{token}`"),
    })
}

fn field_count(line: usize, directive: char, expected: usize, found: usize) -> MinerError {
    MinerError::Malformed {
        line,
        message: format!("`{directive}` line has {found} fields but expects {expected}"),
    }
}
