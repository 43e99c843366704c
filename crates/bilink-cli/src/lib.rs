//! Bilink command line driver
//!
//! Loads `_config.yml` and the site, runs one generation, writes the graph.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bilink_core::vfs::{FileSystem, PhysicalFileSystem};
use bilink_core::{
    BilinkError, Document, FileGraphSink, GenerationStats, Generator, Result, Site, SiteConfig,
    SiteLoader,
};
use clap::Parser;
use log::info;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "bilink",
    version,
    about = "Resolve [[wiki links]] and build the backlink graph of a site"
)]
pub struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".")]
    pub site: PathBuf,

    /// Config file (defaults to <site>/_config.yml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Graph output file (overrides the configured one)
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Also write the rewritten documents as JSON
    #[arg(long)]
    pub emit_documents: Option<PathBuf>,
}

/// Rewritten document as handed to a renderer
#[derive(Debug, Serialize)]
pub struct DocumentExport<'a> {
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub content: &'a str,
    /// Front matter data map, for layouts and templates
    pub frontmatter: Option<&'a serde_json::Value>,
    /// URLs of the notes linking here
    pub backlinks: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct SiteExport<'a> {
    pub notes: Vec<DocumentExport<'a>>,
    pub pages: Vec<DocumentExport<'a>>,
}

impl<'a> SiteExport<'a> {
    pub fn new(site: &'a Site) -> Self {
        let export = move |doc: &'a Document| DocumentExport {
            url: &doc.url,
            title: doc.title.as_deref(),
            content: &doc.content,
            frontmatter: doc.frontmatter.as_ref(),
            backlinks: site.backlinks_of(doc).map(|d| d.url.as_str()).collect(),
        };
        Self {
            notes: site.notes.iter().map(export).collect(),
            pages: site.pages.iter().map(export).collect(),
        }
    }
}

/// Read the config file; a missing file means defaults
pub fn load_config(fs: &dyn FileSystem, path: &Path) -> Result<SiteConfig> {
    match fs.read_to_string(path) {
        Ok(content) => Ok(SiteConfig::from_yaml(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config at {:?}, using defaults", path);
            Ok(SiteConfig::default())
        }
        Err(e) => Err(BilinkError::io(path, e)),
    }
}

pub fn run(cli: &Cli) -> Result<GenerationStats> {
    let fs = PhysicalFileSystem;
    run_with(cli, &fs)
}

pub fn run_with(cli: &Cli, fs: &dyn FileSystem) -> Result<GenerationStats> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.site.join("_config.yml"));
    let config = load_config(fs, &config_path)?;

    let mut site = SiteLoader::new(fs, &config).load(&cli.site);

    let graph_path = cli
        .graph
        .clone()
        .unwrap_or_else(|| cli.site.join(&config.graph.output));
    let mut sink = FileGraphSink::new(fs, &graph_path);
    let stats = Generator::new(&config).generate(&mut site, &mut sink)?;
    info!("Graph written to {:?}", graph_path);

    if let Some(path) = &cli.emit_documents {
        let buffer = serde_json::to_vec_pretty(&SiteExport::new(&site))?;
        fs.write_all(path, &buffer)
            .map_err(|e| BilinkError::io(path, e))?;
        info!("Documents written to {:?}", path);
    }

    Ok(stats)
}
