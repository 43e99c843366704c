use log::{debug, info};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::graph::build_graph;
use crate::model::{Graph, Site};
use crate::resolver::LinkResolver;
use crate::sink::GraphSink;

#[cfg(test)]
mod tests;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub documents: usize,
    pub resolved_links: usize,
    pub invalid_links: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Runs the whole pass over a site: link resolution, invalid link marking,
/// backlinks, and finally a single graph write.
pub struct Generator<'a> {
    config: &'a SiteConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Rewrite `[[links]]` in every note and page.
    ///
    /// Candidates are notes followed by pages, in site order.
    pub fn resolve_links(&self, site: &mut Site) -> Result<GenerationStats> {
        let resolver = LinkResolver::new(site.all_documents(), self.config)?;
        let mut stats = GenerationStats::default();

        for doc in site.all_documents_mut() {
            let resolution = resolver.resolve(&doc.content);
            if resolution.invalid > 0 {
                debug!(
                    "{}: {} resolved, {} invalid",
                    doc.url, resolution.resolved, resolution.invalid
                );
            }
            stats.documents += 1;
            stats.resolved_links += resolution.resolved;
            stats.invalid_links += resolution.invalid;
            doc.content = resolution.content;
        }

        Ok(stats)
    }

    /// Resolve links, then attach backlinks to the notes and build the graph
    pub fn build(&self, site: &mut Site) -> Result<(Graph, GenerationStats)> {
        let mut stats = self.resolve_links(site)?;
        let graph = build_graph(&mut site.notes, self.config);
        stats.nodes = graph.nodes.len();
        stats.edges = graph.edges.len();
        Ok((graph, stats))
    }

    /// Full generation. The sink is written exactly once, after everything else.
    pub fn generate(&self, site: &mut Site, sink: &mut dyn GraphSink) -> Result<GenerationStats> {
        let (graph, stats) = self.build(site)?;
        sink.write_graph(&graph)?;

        if self.config.logging.show_stats {
            info!(
                "Processed {} documents: {} links resolved, {} invalid; graph has {} nodes and {} edges",
                stats.documents, stats.resolved_links, stats.invalid_links, stats.nodes, stats.edges
            );
        }
        Ok(stats)
    }
}
