//! Rendering a corpus into the miner's numeric transaction format.

use std::collections::HashMap;
use std::io::{self, Write};

use kasago_core::Corpus;

use crate::labels::LabelTables;

/// Writes one `t # <index>` transaction per graph.
///
/// Per-graph vertex ids are compacted to `0..n` in declaration order, and
/// string labels are interned into `tables` as they are first seen.
pub(crate) fn write_transactions<W: Write>(
    corpus: &Corpus,
    tables: &mut LabelTables,
    writer: &mut W,
) -> io::Result<()> {
    for (index, graph) in corpus.graphs().iter().enumerate() {
        writeln!(writer, "t # {index}")?;
        let compact: HashMap<u32, usize> = graph
            .vertices()
            .iter()
            .enumerate()
            .map(|(position, vertex)| (vertex.id(), position))
            .collect();
        for (position, vertex) in graph.vertices().iter().enumerate() {
            let code = tables.vertices.intern(vertex.label());
            writeln!(writer, "v {position} {code}")?;
        }
        for edge in graph.edges() {
            // Both endpoints are declared vertices by Graph's invariants.
            let source = compact[&edge.source()];
            let target = compact[&edge.target()];
            let code = tables.edges.intern(edge.label());
            writeln!(writer, "e {source} {target} {code}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use kasago_test_support::graphs::graph;

    use super::*;

    #[test]
    fn renders_compacted_ids_and_interned_codes() {
        let first = graph(&[(10, "C"), (7, "O")], &[(10, 7, "s")]);
        let second = graph(&[(0, "O")], &[]);
        let corpus = Corpus::new(vec![first, second]);

        let mut tables = LabelTables::default();
        let mut rendered = Vec::new();
        write_transactions(&corpus, &mut tables, &mut rendered)
            .expect("writing to a Vec cannot fail");

        let text = String::from_utf8(rendered).expect("transactions are UTF-8");
        assert_eq!(text, "t # 0\nv 0 0\nv 1 1\ne 0 1 0\nt # 1\nv 0 1\n");
        assert_eq!(tables.vertices.resolve(0), Some("C"));
        assert_eq!(tables.vertices.resolve(1), Some("O"));
        assert_eq!(tables.edges.resolve(0), Some("s"));
    }
}
