//! Wiki link resolution.
//!
//! Every candidate target carries four rules, tried in this order:
//!
//! 1. `[[stem|label]]`
//! 2. `[[title|label]]`
//! 3. `[[title]]`
//! 4. `[[stem]]`
//!
//! Each rule collects its matches on the current text and applies them as
//! non-overlapping span rewrites before the next rule runs. Rewritten spans no
//! longer contain brackets, so whichever candidate matches a span first owns it.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::model::Document;
use crate::pattern::ReferencePatterns;

pub const INTERNAL_LINK_CLASS: &str = "internal-link";
pub const INVALID_LINK_CLASS: &str = "invalid-link";
pub const INVALID_LINK_TOOLTIP: &str = "There is no note that matches this link.";

/// Replace `range` of the text with `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub range: Range<usize>,
    pub replacement: String,
}

/// Apply rewrites sorted by start offset with no overlaps.
pub fn apply_rewrites(text: &str, rewrites: &[Rewrite]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for rewrite in rewrites {
        debug_assert!(rewrite.range.start >= cursor, "overlapping rewrites");
        out.push_str(&text[cursor..rewrite.range.start]);
        out.push_str(&rewrite.replacement);
        cursor = rewrite.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Collect one rewrite per match, rendering capture group 1
fn collect_rewrites(regex: &Regex, text: &str, render: impl Fn(&str) -> String) -> Vec<Rewrite> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Rewrite {
                range: whole.range(),
                replacement: render(inner.as_str()),
            })
        })
        .collect()
}

pub fn anchor(href: &str, text: &str) -> String {
    format!("<a class='{INTERNAL_LINK_CLASS}' href='{href}'>{text}</a>")
}

pub fn invalid_link_markup(text: &str) -> String {
    format!(
        "<span title='{INVALID_LINK_TOOLTIP}' class='{INVALID_LINK_CLASS}'>  \
         <span class='invalid-link-brackets'>[[</span>  {text}  \
         <span class='invalid-link-brackets'>]]</span></span>"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    StemWithLabel,
    TitleWithLabel,
    Title,
    Stem,
}

#[derive(Debug, Clone)]
struct Rule {
    kind: RuleKind,
    regex: Regex,
}

fn build_rule(kind: RuleKind, source: String) -> Result<Rule> {
    let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
    Ok(Rule { kind, regex })
}

/// Compiled rules for one candidate document
#[derive(Debug, Clone)]
pub struct ReferenceTarget {
    pub href: String,
    pub patterns: ReferencePatterns,
    rules: Vec<Rule>,
}

impl ReferenceTarget {
    /// Returns `None` for documents without a basename; they cannot be linked to.
    pub fn new(doc: &Document, config: &SiteConfig) -> Result<Option<Self>> {
        let Some(basename) = doc.basename.as_deref() else {
            return Ok(None);
        };
        let patterns = ReferencePatterns::new(basename, doc.title.as_deref());
        let stem = &patterns.stem_pattern;

        let mut rules = vec![build_rule(
            RuleKind::StemWithLabel,
            format!(r"\[\[{stem}\|(.+?)\]\]"),
        )?];
        if let Some(title) = &patterns.title_pattern {
            rules.push(build_rule(
                RuleKind::TitleWithLabel,
                format!(r"\[\[{title}\|(.+?)\]\]"),
            )?);
            rules.push(build_rule(RuleKind::Title, format!(r"\[\[({title})\]\]"))?);
        }
        rules.push(build_rule(RuleKind::Stem, format!(r"\[\[({stem})\]\]"))?);

        Ok(Some(Self {
            href: config.href_for(&doc.url),
            patterns,
            rules,
        }))
    }

    pub fn rule_kinds(&self) -> impl Iterator<Item = RuleKind> + '_ {
        self.rules.iter().map(|rule| rule.kind)
    }

    /// Run all rules in priority order; returns the new text and the number of links rewritten
    pub fn rewrite(&self, content: &str) -> (String, usize) {
        let mut current = content.to_string();
        let mut count = 0;
        for rule in &self.rules {
            let rewrites = collect_rewrites(&rule.regex, &current, |text| anchor(&self.href, text));
            if rewrites.is_empty() {
                continue;
            }
            count += rewrites.len();
            current = apply_rewrites(&current, &rewrites);
        }
        (current, count)
    }
}

/// Outcome of resolving one source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub content: String,
    pub resolved: usize,
    pub invalid: usize,
}

/// Ordered candidate list shared by every source document of a build
#[derive(Debug, Clone)]
pub struct LinkResolver {
    targets: Vec<ReferenceTarget>,
    invalid_link: Regex,
}

impl LinkResolver {
    /// Candidates keep the iteration order given here; earlier ones win.
    pub fn new<'a>(
        candidates: impl IntoIterator<Item = &'a Document>,
        config: &SiteConfig,
    ) -> Result<Self> {
        let mut targets = Vec::new();
        for doc in candidates {
            if let Some(target) = ReferenceTarget::new(doc, config)? {
                targets.push(target);
            }
        }
        Ok(Self {
            targets,
            invalid_link: Regex::new(r"\[\[([^\]]+)\]\]")?,
        })
    }

    pub fn targets(&self) -> &[ReferenceTarget] {
        &self.targets
    }

    /// Resolve against every candidate, then mark whatever is left as invalid
    pub fn resolve(&self, content: &str) -> Resolution {
        let mut current = content.to_string();
        let mut resolved = 0;
        for target in &self.targets {
            let (next, count) = target.rewrite(&current);
            if count > 0 {
                current = next;
                resolved += count;
            }
        }
        let (content, invalid) = self.mark_invalid_links(&current);
        Resolution {
            content,
            resolved,
            invalid,
        }
    }

    pub fn mark_invalid_links(&self, content: &str) -> (String, usize) {
        let rewrites = collect_rewrites(&self.invalid_link, content, invalid_link_markup);
        if rewrites.is_empty() {
            return (content.to_string(), 0);
        }
        (apply_rewrites(content, &rewrites), rewrites.len())
    }
}
