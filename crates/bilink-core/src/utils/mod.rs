use crate::model::{Document, NodeId};
use std::path::Path;

/// Strip the final extension from a file name.
///
/// # Examples
///
/// ```
/// use bilink_core::stem_of;
///
/// assert_eq!(stem_of("my_note.md"), "my_note");
/// assert_eq!(stem_of("foo.bar.md"), "foo.bar");
/// assert_eq!(stem_of("README"), "README");
/// ```
pub fn stem_of(basename: &str) -> String {
    Path::new(basename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| basename.to_string())
}

/// Derive the graph id of a document.
///
/// Concatenates the decimal code point of every character of the title,
/// falling back to the basename when there is no title.
///
/// # Examples
///
/// ```
/// use bilink_core::{node_id, Document};
///
/// let titled = Document::new("/ab", "").with_title("AB");
/// assert_eq!(node_id(&titled).0, "6566");
///
/// let untitled = Document::new("/a", "").with_basename("a.md");
/// assert_eq!(node_id(&untitled).0, "9746109100");
/// ```
pub fn node_id(doc: &Document) -> NodeId {
    let source = doc
        .title
        .as_deref()
        .or(doc.basename.as_deref())
        .unwrap_or_default();
    NodeId(
        source
            .chars()
            .map(|c| u32::from(c).to_string())
            .collect::<String>(),
    )
}
