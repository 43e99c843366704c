use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

/// Site-level settings, read from the site's `_config.yml`.
/// Keys the generator does not know about are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Prefix prepended to every generated href and node path
    #[serde(default, deserialize_with = "null_as_empty")]
    pub baseurl: String,
    /// Append `.html` to generated links
    #[serde(default)]
    pub use_html_extension: bool,
    /// Paths kept out of the site, on top of [`DEFAULT_EXCLUDES`]
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where notes and pages come from
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Directory holding the notes collection (relative to the site root)
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
    /// URL template for notes; `:slug` is replaced with the file stem
    #[serde(default = "default_notes_permalink")]
    pub notes_permalink: String,
    /// File extensions treated as documents
    #[serde(default = "default_page_extensions")]
    pub page_extensions: Vec<String>,
}

/// Graph artifact settings
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Output file (relative to the site root)
    #[serde(default = "default_graph_output")]
    pub output: PathBuf,
    /// Notes whose storage path contains this string get no graph node
    #[serde(default = "default_excluded_path")]
    pub excluded_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Whether to log link and graph statistics after generation
    #[serde(default = "default_true")]
    pub show_stats: bool,
}

/// Always excluded, whatever the site lists under `exclude`
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".sass-cache",
    ".jekyll-cache",
    "gemfiles",
    "Gemfile",
    "Gemfile.lock",
    "node_modules",
    "vendor/bundle/",
    "vendor/cache/",
    "vendor/gems/",
    "vendor/ruby/",
];

/// `baseurl:` with no value is common in Jekyll configs
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_notes_dir() -> String {
    "_posts".to_string()
}

fn default_notes_permalink() -> String {
    "/:slug".to_string()
}

fn default_page_extensions() -> Vec<String> {
    vec!["md".to_string(), "html".to_string()]
}

fn default_graph_output() -> PathBuf {
    PathBuf::from("_includes/posts_graph.json")
}

fn default_excluded_path() -> String {
    "_posts/index.html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            notes_permalink: default_notes_permalink(),
            page_extensions: default_page_extensions(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            output: default_graph_output(),
            excluded_path: default_excluded_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { show_stats: true }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            baseurl: String::new(),
            use_html_extension: false,
            exclude: Vec::new(),
            collection: CollectionConfig::default(),
            graph: GraphConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load config from YAML text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Whether a path relative to the site root falls under an `exclude` entry.
    /// Entries match whole leading path components, so `vendor` covers
    /// `vendor/bundle/x.md` but not `vendors.md`.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        DEFAULT_EXCLUDES
            .iter()
            .copied()
            .chain(self.exclude.iter().map(String::as_str))
            .map(|entry| entry.trim_matches('/'))
            .filter(|entry| !entry.is_empty())
            .any(|entry| rel_path.starts_with(entry))
    }

    /// Suffix appended to every generated link
    pub fn link_extension(&self) -> &'static str {
        if self.use_html_extension {
            ".html"
        } else {
            ""
        }
    }

    /// Fully qualified href for a site-relative URL
    pub fn href_for(&self, url: &str) -> String {
        format!("{}{}{}", self.baseurl, url, self.link_extension())
    }
}
