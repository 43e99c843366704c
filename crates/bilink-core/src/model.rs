use serde::{Deserialize, Serialize};

/// Graph vertex identifier.
/// Built from character codes, so two different titles may collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Index of a note inside [`Site::notes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteRef(pub usize);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Site-relative URL, e.g. `/my-note`
    pub url: String,
    pub title: Option<String>,
    /// Raw text, rewritten in place by the generator
    pub content: String,
    /// File name with extension. Documents without one are never link targets.
    pub basename: Option<String>,
    /// Storage path relative to the site root
    pub path: Option<String>,
    pub frontmatter: Option<serde_json::Value>,
    /// Notes whose rewritten content mentions this document's URL.
    /// Filled by the graph builder, only meaningful for notes.
    #[serde(default)]
    pub backlinks: Vec<NoteRef>,
}

impl Document {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Everything the generator works on.
/// Notes take part in the graph; pages only take part in link resolution.
#[derive(Debug, Clone, Default)]
pub struct Site {
    pub notes: Vec<Document>,
    pub pages: Vec<Document>,
}

impl Site {
    pub fn new(notes: Vec<Document>, pages: Vec<Document>) -> Self {
        Self { notes, pages }
    }

    pub fn note(&self, note: NoteRef) -> Option<&Document> {
        self.notes.get(note.0)
    }

    /// Resolve the backlink references of `doc` back into notes
    pub fn backlinks_of<'a>(&'a self, doc: &'a Document) -> impl Iterator<Item = &'a Document> {
        doc.backlinks.iter().filter_map(move |r| self.note(*r))
    }

    /// Notes first, then pages
    pub fn all_documents(&self) -> impl Iterator<Item = &Document> {
        self.notes.iter().chain(self.pages.iter())
    }

    pub fn all_documents_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.notes.iter_mut().chain(self.pages.iter_mut())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub path: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Field order is the serialized key order: `edges` first, then `nodes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub edges: Vec<Edge>,
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
