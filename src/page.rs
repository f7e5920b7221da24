//! In-memory page model that endpoint callers render into.
//!
//! The page is a small element tree: a `<main>` mount point holding one
//! section per output region. Rendered markup is appended to an element's
//! content as an opaque string, the way `innerHTML +=` would, and is never
//! parsed back into the tree.

use crate::error::{HubError, HubResult};
use crate::render::escape_html;

/// The three host-provided locations endpoint callers write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Emojis,
    User,
    Repos,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Emojis, Region::User, Region::Repos];

    pub fn id(self) -> &'static str {
        match self {
            Region::Emojis => "githubEmojisContent",
            Region::User => "userContent",
            Region::Repos => "reposContent",
        }
    }

    pub fn selector(self) -> String {
        format!("#{}", self.id())
    }

    fn container_id(self) -> &'static str {
        match self {
            Region::Emojis => "githubEmojisContainer",
            Region::User => "userContainer",
            Region::Repos => "reposContainer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<Element>,
    /// Markup appended after the children.
    pub content: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            children: Vec::new(),
            content: String::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
        }
    }

    fn collect<'a>(&'a self, selector: &Selector, out: &mut Vec<&'a Element>) {
        if self.matches(selector) {
            out.push(self);
        }
        for child in &self.children {
            child.collect(selector, out);
        }
    }

    fn count(&self, selector: &Selector) -> usize {
        usize::from(self.matches(selector))
            + self
                .children
                .iter()
                .map(|c| c.count(selector))
                .sum::<usize>()
    }

    fn first_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        if self.matches(selector) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.first_mut(selector))
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<{}", self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", escape_html(id)));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }
        out.push('>');
        for child in &self.children {
            out.push_str(&child.to_html());
        }
        out.push_str(&self.content);
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

/// Supported selector forms: `#id`, `.class` and a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(raw: &str) -> HubResult<Self> {
        let raw = raw.trim();
        let valid_name = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        let selector = if let Some(id) = raw.strip_prefix('#') {
            Selector::Id(id.to_string())
        } else if let Some(class) = raw.strip_prefix('.') {
            Selector::Class(class.to_string())
        } else {
            Selector::Tag(raw.to_string())
        };

        let name = match &selector {
            Selector::Id(s) | Selector::Class(s) | Selector::Tag(s) => s,
        };
        if !valid_name(name.as_str()) {
            return Err(HubError::Selector(format!("unsupported selector '{raw}'")));
        }
        Ok(selector)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    root: Element,
}

impl Page {
    /// A page with an empty `<main>` and nothing else.
    pub fn empty() -> Self {
        Self {
            root: Element::new("main"),
        }
    }

    /// A page with the three output regions mounted under `<main>`.
    pub fn bootstrap() -> Self {
        let mut page = Self::empty();
        for region in Region::ALL {
            let section = Element::new("section")
                .with_id(region.container_id())
                .with_class("my-3")
                .with_child(Element::new("div").with_id(region.id()));
            page.root.children.push(section);
        }
        page
    }

    /// Every element matching `selector`, in document order.
    pub fn find_all(&self, selector: &str) -> HubResult<Vec<&Element>> {
        let selector = Selector::parse(selector)?;
        let mut out = Vec::new();
        self.root.collect(&selector, &mut out);
        Ok(out)
    }

    /// The single element matching `selector`. Zero or several matches is an error.
    pub fn find_one(&self, selector: &str) -> HubResult<&Element> {
        let mut matches = self.find_all(selector)?;
        match matches.len() {
            1 => Ok(matches.remove(0)),
            n => Err(HubError::Selector(format!(
                "expected exactly one match for '{selector}', found {n}"
            ))),
        }
    }

    fn find_one_mut(&mut self, selector: &str) -> HubResult<&mut Element> {
        let parsed = Selector::parse(selector)?;
        let n = self.root.count(&parsed);
        if n != 1 {
            return Err(HubError::Selector(format!(
                "expected exactly one match for '{selector}', found {n}"
            )));
        }
        self.root
            .first_mut(&parsed)
            .ok_or_else(|| HubError::Selector(format!("no match for '{selector}'")))
    }

    /// Append markup to the content of the element matching `selector`.
    pub fn append(&mut self, selector: &str, markup: &str) -> HubResult<()> {
        self.find_one_mut(selector)?.content.push_str(markup);
        Ok(())
    }

    /// Current markup of a region.
    pub fn region_content(&self, region: Region) -> HubResult<&str> {
        Ok(self.find_one(&region.selector())?.content.as_str())
    }

    /// Reset all three output regions to empty.
    pub fn clear_dynamic_content(&mut self) -> HubResult<()> {
        for region in Region::ALL {
            self.find_one_mut(&region.selector())?.content.clear();
        }
        Ok(())
    }

    /// Serialize as a standalone HTML document.
    pub fn to_document(&self, title: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{main}
</body>
</html>
"#,
            title = escape_html(title),
            main = self.root.to_html()
        )
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::bootstrap()
    }
}
