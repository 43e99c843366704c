//! Bilink Core Library
//!
//! Resolves `[[wiki links]]` across a site, marks the ones that point nowhere,
//! and derives the backlink graph.
//! All IO goes through [`vfs::FileSystem`] and [`sink::GraphSink`].
//!

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod loader;
pub mod model;
mod parser;
pub mod pattern;
pub mod resolver;
pub mod sink;
pub mod utils;
pub mod vfs;

pub use config::SiteConfig;
pub use error::{BilinkError, Result};
pub use generator::{GenerationStats, Generator};
pub use loader::SiteLoader;
pub use model::{Document, Edge, Graph, Node, NodeId, NoteRef, Site};
pub use sink::{FileGraphSink, GraphSink, WriterSink};
pub use utils::{node_id, stem_of};
