use super::*;
use crate::error::BilinkError;
use crate::loader::SiteLoader;
use crate::model::{Document, NoteRef};
use crate::resolver::{anchor, invalid_link_markup};
use crate::sink::{FileGraphSink, WriterSink};
use crate::utils::node_id;
use crate::vfs::{FileSystem, PhysicalFileSystem};
use tempfile::TempDir;

fn sample_site() -> Site {
    let notes = vec![
        Document::new("/alpha", "See [[beta|the beta note]] and [[Gamma Ray]].")
            .with_basename("alpha.md")
            .with_title("Alpha Notes")
            .with_path("_posts/alpha.md"),
        Document::new("/beta", "Back to [[Alpha]] and [[missing]].")
            .with_basename("beta.md")
            .with_title("Alpha")
            .with_path("_posts/beta.md"),
        Document::new("/gamma-ray", "[[alpha]] and [[Alpha Notes]]")
            .with_basename("gamma-ray.md")
            .with_path("_posts/gamma-ray.md"),
        Document::new("/posts/", "[[beta]] [[gamma ray]]")
            .with_basename("index.html")
            .with_path("_posts/index.html"),
    ];
    let pages = vec![Document::new("/404", "Try [[alpha]]")];
    Site::new(notes, pages)
}

#[test]
fn test_resolve_links_rewrites_every_document() {
    let config = SiteConfig::default();
    let mut site = sample_site();
    let stats = Generator::new(&config).resolve_links(&mut site).unwrap();

    assert_eq!(
        site.notes[0].content,
        format!(
            "See {} and {}.",
            anchor("/beta", "the beta note"),
            anchor("/gamma-ray", "Gamma Ray")
        )
    );
    // Stem of the first note wins over the title of the second
    assert_eq!(
        site.notes[1].content,
        format!(
            "Back to {} and {}.",
            anchor("/alpha", "Alpha"),
            invalid_link_markup("missing")
        )
    );
    assert_eq!(
        site.notes[2].content,
        format!(
            "{} and {}",
            anchor("/alpha", "alpha"),
            anchor("/alpha", "Alpha Notes")
        )
    );
    assert_eq!(
        site.notes[3].content,
        format!(
            "{} {}",
            anchor("/beta", "beta"),
            anchor("/gamma-ray", "gamma ray")
        )
    );
    // Pages without a basename are still sources
    assert_eq!(
        site.pages[0].content,
        format!("Try {}", anchor("/alpha", "alpha"))
    );

    assert_eq!(stats.documents, 5);
    assert_eq!(stats.resolved_links, 8);
    assert_eq!(stats.invalid_links, 1);
}

#[test]
fn test_build_graph_from_rewritten_content() {
    let config = SiteConfig::default();
    let mut site = sample_site();
    let (graph, stats) = Generator::new(&config).build(&mut site).unwrap();

    let ids: Vec<_> = site.notes.iter().map(node_id).collect();

    assert_eq!(site.notes[0].backlinks, vec![NoteRef(1), NoteRef(2)]);
    assert_eq!(site.notes[1].backlinks, vec![NoteRef(0), NoteRef(3)]);
    assert_eq!(site.notes[2].backlinks, vec![NoteRef(0), NoteRef(3)]);
    assert!(site.notes[3].backlinks.is_empty());

    let backlink_urls: Vec<_> = site
        .backlinks_of(&site.notes[0])
        .map(|d| d.url.as_str())
        .collect();
    assert_eq!(backlink_urls, vec!["/beta", "/gamma-ray"]);

    let node_ids: Vec<_> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    assert_eq!(node_ids, vec![ids[0].clone(), ids[1].clone(), ids[2].clone()]);
    assert_eq!(graph.nodes[0].label.as_deref(), Some("Alpha Notes"));
    assert_eq!(graph.nodes[2].label, None);

    let edges: Vec<_> = graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    assert_eq!(
        edges,
        vec![
            (ids[1].clone(), ids[0].clone()),
            (ids[2].clone(), ids[0].clone()),
            (ids[0].clone(), ids[1].clone()),
            (ids[3].clone(), ids[1].clone()),
            (ids[0].clone(), ids[2].clone()),
            (ids[3].clone(), ids[2].clone()),
        ]
    );
    assert!(graph.edges.iter().all(|e| e.source != e.target));

    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.edges, 6);
}

#[test]
fn test_resolution_twice_changes_nothing() {
    let config = SiteConfig::default();
    let generator = Generator::new(&config);
    let mut site = sample_site();
    generator.resolve_links(&mut site).unwrap();
    let first: Vec<String> = site.all_documents().map(|d| d.content.clone()).collect();

    let stats = generator.resolve_links(&mut site).unwrap();
    let second: Vec<String> = site.all_documents().map(|d| d.content.clone()).collect();

    assert_eq!(first, second);
    assert_eq!(stats.resolved_links, 0);
    assert_eq!(stats.invalid_links, 0);
}

#[test]
fn test_generate_writes_graph_once() {
    let config = SiteConfig::default();
    let mut site = sample_site();
    let mut sink = WriterSink(Vec::new());
    Generator::new(&config)
        .generate(&mut site, &mut sink)
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&sink.0).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(json["edges"].as_array().unwrap().len(), 6);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["nodes"][0]["path"], "/alpha");
    assert!(json["nodes"][2]["label"].is_null());
}

struct FailingSink;

impl GraphSink for FailingSink {
    fn write_graph(&mut self, _graph: &Graph) -> Result<()> {
        Err(BilinkError::io(
            "posts_graph.json",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        ))
    }
}

#[test]
fn test_sink_failure_is_fatal() {
    let config = SiteConfig::default();
    let mut site = sample_site();
    let result = Generator::new(&config).generate(&mut site, &mut FailingSink);
    assert!(matches!(result, Err(BilinkError::Io { .. })));
}

#[test]
fn test_generate_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let fs = PhysicalFileSystem;
    let files = [
        ("_posts/my_note.md", "---\ntitle: My Note\n---\nSee [[foo bar]]."),
        ("_posts/foo-bar.md", "Back to [[My Note|the note]]. Also [[nope]]."),
        ("_posts/index.html", "---\nlayout: list\n---\n[[my note]]"),
        ("about.md", "---\ntitle: About\n---\nAbout [[Foo_Bar]]"),
    ];
    for (rel, content) in files {
        fs.write_all(&root.join(rel), content.as_bytes()).unwrap();
    }

    let config = SiteConfig {
        baseurl: "/garden".to_string(),
        ..Default::default()
    };
    let mut site = SiteLoader::new(&fs, &config).load(root);
    let graph_path = root.join(&config.graph.output);
    let mut sink = FileGraphSink::new(&fs, &graph_path);
    let stats = Generator::new(&config)
        .generate(&mut site, &mut sink)
        .unwrap();

    // Notes sorted by path: foo-bar, index, my_note
    assert_eq!(
        site.notes[0].content,
        format!(
            "Back to {}. Also {}.",
            anchor("/garden/my_note", "the note"),
            invalid_link_markup("nope")
        )
    );
    assert_eq!(
        site.notes[2].content,
        format!("See {}.", anchor("/garden/foo-bar", "foo bar"))
    );
    // `Foo_Bar` uses an underscore, which the stem `foo-bar` does not accept
    assert_eq!(site.pages[0].content, format!("About {}", invalid_link_markup("Foo_Bar")));

    let json: serde_json::Value =
        serde_json::from_str(&fs.read_to_string(&graph_path).unwrap()).unwrap();
    let paths: Vec<_> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["/garden/foo-bar", "/garden/my_note"]);
    assert_eq!(stats.nodes, 2);
    assert_eq!(stats.invalid_links, 2);
}

#[test]
fn test_excluded_and_static_files_are_not_targets() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let fs = PhysicalFileSystem;
    let files = [
        ("_posts/a.md", "see [[readme]] and [[static]]"),
        ("vendor/bundle/gems/foo/README.md", "---\ntitle: Foo\n---\nfoo"),
        ("vendor/README.md", "---\ntitle: Vendored\n---\nvendored"),
        ("static.html", "<p>no front matter</p>"),
    ];
    for (rel, content) in files {
        fs.write_all(&root.join(rel), content.as_bytes()).unwrap();
    }

    let config = SiteConfig::from_yaml("exclude:\n  - vendor\n").unwrap();
    let mut site = SiteLoader::new(&fs, &config).load(root);
    assert!(site.pages.is_empty());

    let stats = Generator::new(&config).resolve_links(&mut site).unwrap();
    assert_eq!(
        site.notes[0].content,
        format!(
            "see {} and {}",
            invalid_link_markup("readme"),
            invalid_link_markup("static")
        )
    );
    assert_eq!(stats.resolved_links, 0);
    assert_eq!(stats.invalid_links, 2);
}
