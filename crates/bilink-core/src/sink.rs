use std::io::Write;
use std::path::PathBuf;

use crate::error::{BilinkError, Result};
use crate::model::Graph;
use crate::vfs::FileSystem;

/// Destination of the serialized graph. Written once per generation.
pub trait GraphSink {
    fn write_graph(&mut self, graph: &Graph) -> Result<()>;
}

/// Overwrites a JSON file through a [`FileSystem`]
pub struct FileGraphSink<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> FileGraphSink<'a> {
    pub fn new(fs: &'a dyn FileSystem, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl GraphSink for FileGraphSink<'_> {
    fn write_graph(&mut self, graph: &Graph) -> Result<()> {
        let buffer = serde_json::to_vec(graph)?;
        self.fs
            .write_all(&self.path, &buffer)
            .map_err(|e| BilinkError::io(&self.path, e))
    }
}

/// Streams the graph into any writer (stdout, a buffer in tests)
pub struct WriterSink<W: Write>(pub W);

impl<W: Write> GraphSink for WriterSink<W> {
    fn write_graph(&mut self, graph: &Graph) -> Result<()> {
        serde_json::to_writer(&mut self.0, graph)?;
        self.0
            .flush()
            .map_err(|e| BilinkError::io("<writer>", e))
    }
}
