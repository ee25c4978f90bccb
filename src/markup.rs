//! A small owned HTML tree.
//!
//! Rendered fragments stay structured until they reach the page, where they are serialized
//! with text and attribute values escaped.

use std::fmt;

const VOID_TAGS: [&str; 4] = ["img", "br", "hr", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(El),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct El {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Markup>,
}

impl El {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attrs.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Markup] {
        &self.children
    }

    /// Descendant elements carrying `class`, in document order.
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a El> {
        let mut found = Vec::new();
        collect_by_class(&self.children, class, &mut found);
        found
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_by_class<'a>(nodes: &'a [Markup], class: &str, found: &mut Vec<&'a El>) {
    for node in nodes {
        if let Markup::Element(el) = node {
            if el.has_class(class) {
                found.push(el);
            }
            collect_by_class(&el.children, class, found);
        }
    }
}

fn collect_text(nodes: &[Markup], out: &mut String) {
    for node in nodes {
        match node {
            Markup::Text(text) => out.push_str(text),
            Markup::Element(el) => collect_text(&el.children, out),
        }
    }
}

impl From<El> for Markup {
    fn from(el: El) -> Self {
        Markup::Element(el)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::Text(text.to_string())
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Markup::Text(text) => f.write_str(&escape(text, false)),
            Markup::Element(el) => fmt::Display::fmt(el, f),
        }
    }
}

impl fmt::Display for El {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape(value, true))?;
        }
        f.write_str(">")?;
        if VOID_TAGS.contains(&self.tag) {
            return Ok(());
        }
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

pub fn to_html(fragment: &[Markup]) -> String {
    fragment.iter().map(ToString::to_string).collect()
}

fn escape(raw: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
