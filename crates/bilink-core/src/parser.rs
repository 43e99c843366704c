use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};

pub(crate) struct FrontMatter {
    pub title: Option<String>,
    pub permalink: Option<String>,
    pub data: Option<serde_json::Value>,
    /// A `---` block opened the document, even if its YAML did not parse
    pub has_metadata_block: bool,
    /// Byte offset where the body starts
    pub content_start_offset: usize,
}

impl FrontMatter {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        let rest = &text[self.content_start_offset..];
        rest.strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest)
    }
}

/// Scalar front matter values are accepted as strings (`title: 2024` is a title)
fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_front_matter(text: &str) -> FrontMatter {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let parser = Parser::new_ext(text, options);

    let mut title = None;
    let mut permalink = None;
    let mut data = None;
    let mut has_metadata_block = false;
    let mut content_start_offset = 0;

    let mut in_frontmatter = false;
    let mut frontmatter_content = String::new();

    for (event, range) in parser.into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                in_frontmatter = true;
            }
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                if let Ok(json) = serde_yaml::from_str::<serde_json::Value>(&frontmatter_content) {
                    title = json.get("title").and_then(scalar_to_string);
                    permalink = json.get("permalink").and_then(scalar_to_string);
                    data = Some(json);
                }
                has_metadata_block = true;
                content_start_offset = range.end;
                break;
            }
            Event::Text(cow_str) if in_frontmatter => {
                frontmatter_content.push_str(cow_str.as_ref());
            }
            // Front matter only ever opens the document
            _ if !in_frontmatter => break,
            _ => {}
        }
    }

    FrontMatter {
        title,
        permalink,
        data,
        has_metadata_block,
        content_start_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: My Note\nid: 123\n---\n# Content";
        let result = parse_front_matter(content);

        assert_eq!(result.title, Some("My Note".to_string()));
        assert!(result.data.is_some());
        let fm = result.data.unwrap();
        assert_eq!(fm["title"], "My Note");
        assert_eq!(fm["id"], 123);
    }

    #[test]
    fn test_permalink_and_numeric_title() {
        let content = "---\ntitle: 2024\npermalink: /year/\n---\nbody";
        let result = parse_front_matter(content);
        assert_eq!(result.title.as_deref(), Some("2024"));
        assert_eq!(result.permalink.as_deref(), Some("/year/"));
    }

    #[test]
    fn test_content_offset_calculation() {
        let content_with_fm = "---\ntitle: Hello\n---\nActual content starts here.";
        let result_fm = parse_front_matter(content_with_fm);
        // "---\ntitle: Hello\n---" is 20 bytes
        assert_eq!(result_fm.content_start_offset, 20);
        assert!(result_fm.has_metadata_block);
        assert_eq!(result_fm.body(content_with_fm), "Actual content starts here.");

        let content_no_fm = "No frontmatter here.";
        let result_no_fm = parse_front_matter(content_no_fm);
        assert_eq!(result_no_fm.content_start_offset, 0);
        assert!(result_no_fm.title.is_none());
        assert!(!result_no_fm.has_metadata_block);
        assert_eq!(result_no_fm.body(content_no_fm), content_no_fm);
    }

    #[test]
    fn test_body_keeps_wikilinks() {
        let content = "---\ntitle: A\n---\nSee [[b]] and [[c|the c]].";
        let result = parse_front_matter(content);
        assert_eq!(result.body(content), "See [[b]] and [[c|the c]].");
    }
}
