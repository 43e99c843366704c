use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::config::SiteConfig;
use crate::model::{Document, Site};
use crate::parser::{parse_front_matter, FrontMatter};
use crate::utils::stem_of;
use crate::vfs::FileSystem;

/// Builds a [`Site`] from a Jekyll-style directory.
///
/// Notes live under `collection.notes_dir`. Pages are every other document
/// outside `_`/`.` prefixed directories that opens with front matter; the
/// rest are static files. Paths matching the site's `exclude` list are never
/// loaded. Both lists are ordered by path so that link disambiguation is
/// stable across builds.
pub struct SiteLoader<'a> {
    fs: &'a dyn FileSystem,
    config: &'a SiteConfig,
}

impl<'a> SiteLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem, config: &'a SiteConfig) -> Self {
        Self { fs, config }
    }

    pub fn load(&self, root: &Path) -> Site {
        let notes_root = root.join(&self.config.collection.notes_dir);
        let notes: Vec<Document> = self
            .list_documents(root, &notes_root)
            .into_iter()
            .filter_map(|path| self.load_note(root, &path))
            .collect();

        let pages: Vec<Document> = self
            .list_documents(root, root)
            .into_iter()
            .filter(|path| self.is_page(root, path))
            .filter_map(|path| self.load_page(root, &path))
            .collect();

        debug!(
            "Loaded {} notes and {} pages from {:?}",
            notes.len(),
            pages.len(),
            root
        );
        Site::new(notes, pages)
    }

    fn list_documents(&self, root: &Path, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for ext in &self.config.collection.page_extensions {
            files.extend(self.fs.list_files(dir, ext));
        }
        files.retain(|path| match path.strip_prefix(root) {
            Ok(rel) if self.config.is_excluded(rel) => {
                debug!("Excluded {:?}", rel);
                false
            }
            _ => true,
        });
        files.sort();
        files.dedup();
        files
    }

    fn is_page(&self, root: &Path, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(root) else {
            return false;
        };
        if rel.starts_with(&self.config.collection.notes_dir) {
            return false;
        }
        !rel.components().any(|c| match c {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name.starts_with('_') || name.starts_with('.')
            }
            _ => false,
        })
    }

    fn read_document(&self, root: &Path, path: &Path) -> Option<(Document, FrontMatter)> {
        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping unreadable document {:?}: {}", path, e);
                return None;
            }
        };
        let mut front_matter = parse_front_matter(&text);
        let basename = path.file_name()?.to_string_lossy().to_string();

        let doc = Document {
            url: String::new(),
            title: front_matter.title.take(),
            content: front_matter.body(&text).to_string(),
            basename: Some(basename),
            path: relative_path_string(root, path),
            frontmatter: front_matter.data.take(),
            backlinks: Vec::new(),
        };
        Some((doc, front_matter))
    }

    fn load_note(&self, root: &Path, path: &Path) -> Option<Document> {
        let (mut doc, front_matter) = self.read_document(root, path)?;
        let stem = doc.basename.as_deref().map(stem_of).unwrap_or_default();
        doc.url = front_matter.permalink.unwrap_or_else(|| {
            self.config
                .collection
                .notes_permalink
                .replace(":slug", &stem)
        });
        Some(doc)
    }

    fn load_page(&self, root: &Path, path: &Path) -> Option<Document> {
        let (mut doc, front_matter) = self.read_document(root, path)?;
        if !front_matter.has_metadata_block {
            debug!("Treating {:?} as a static file", path);
            return None;
        }
        doc.url = match front_matter.permalink {
            Some(permalink) => permalink,
            None => page_url(doc.path.as_deref().unwrap_or_default()),
        };
        Some(doc)
    }
}

/// `/`-separated path relative to `root`
fn relative_path_string(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Some(parts.join("/"))
}

/// Default page URL: `about.md` -> `/about`, `docs/index.md` -> `/docs/`
fn page_url(rel_path: &str) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };
    let stem = stem_of(file);
    match (dir, stem.as_str()) {
        (None, "index") => "/".to_string(),
        (Some(dir), "index") => format!("/{}/", dir),
        (None, stem) => format!("/{}", stem),
        (Some(dir), stem) => format!("/{}/{}", dir, stem),
    }
}
