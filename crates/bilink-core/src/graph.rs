//! Backlinks and the note graph.
//!
//! A note links to another when its rewritten content contains the other
//! note's URL anywhere, anchor or not. Plain text mentions count too.

use crate::config::SiteConfig;
use crate::model::{Document, Edge, Graph, Node, NoteRef};
use crate::utils::node_id;

/// Notes (other than `target` itself) whose content contains `target`'s URL
pub fn find_backlinks(notes: &[Document], target: &Document) -> Vec<NoteRef> {
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| note.url != target.url && note.content.contains(&target.url))
        .map(|(i, _)| NoteRef(i))
        .collect()
}

/// Compute backlinks for every note, store them on the notes, and build the graph.
///
/// Nodes and edges follow note order. The note whose path contains
/// `graph.excluded_path` gets no node, though edges pointing at it are kept.
pub fn build_graph(notes: &mut [Document], config: &SiteConfig) -> Graph {
    let backlinks: Vec<Vec<NoteRef>> = {
        let notes: &[Document] = notes;
        notes
            .iter()
            .map(|note| find_backlinks(notes, note))
            .collect()
    };

    let mut graph = Graph::default();
    for (note, links) in notes.iter().zip(&backlinks) {
        let id = node_id(note);

        if !is_excluded(note, &config.graph.excluded_path) {
            graph.nodes.push(Node {
                id: id.clone(),
                path: config.href_for(&note.url),
                label: note.title.clone(),
            });
        }

        for source in links {
            graph.edges.push(Edge {
                source: node_id(&notes[source.0]),
                target: id.clone(),
            });
        }
    }

    for (note, links) in notes.iter_mut().zip(backlinks) {
        note.backlinks = links;
    }

    graph
}

fn is_excluded(note: &Document, excluded_path: &str) -> bool {
    note.path
        .as_deref()
        .is_some_and(|path| path.contains(excluded_path))
}
