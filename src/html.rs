//! Minimal element tree for HTML output. Pages build a tree of
//! [`Element`]s and serialize it once the page is complete.

use std::fmt::Write;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Escape text for use in element content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    Text(String),
    /// Emitted verbatim, e.g. script bodies.
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value for the same name.
    pub fn attr(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn raw(&mut self, markup: impl Into<String>) -> &mut Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    /// Append a new child element and return it for further building.
    pub fn child(&mut self, tag: &str) -> &mut Element {
        let idx = self.children.len();
        self.children.push(Node::Element(Element::new(tag)));
        match &mut self.children[idx] {
            Node::Element(e) => e,
            _ => unreachable!("child() always pushes an element"),
        }
    }

    /// Append a child with a `class` attribute; an empty class is omitted.
    pub fn child_with_class(&mut self, tag: &str, class: &str) -> &mut Element {
        let el = self.child(tag);
        if !class.is_empty() {
            el.attr("class", class);
        }
        el
    }

    pub fn div(&mut self, class: &str) -> &mut Element {
        self.child_with_class("div", class)
    }

    pub fn span(&mut self, class: &str) -> &mut Element {
        self.child_with_class("span", class)
    }

    pub fn a(&mut self, href: &str) -> &mut Element {
        let el = self.child("a");
        el.attr("href", href);
        el
    }

    /// Link if `href` is given, otherwise a plain span.
    pub fn a_or_span(&mut self, href: Option<&str>, class: &str) -> &mut Element {
        match href {
            Some(href) => {
                let el = self.a(href);
                if !class.is_empty() {
                    el.attr("class", class);
                }
                el
            }
            None => self.span(class),
        }
    }

    pub fn script_src(&mut self, src: &str) -> &mut Element {
        let el = self.child("script");
        el.attr("type", "text/javascript").attr("src", src);
        el
    }

    pub fn stylesheet(&mut self, href: &str) -> &mut Element {
        let el = self.child("link");
        el.attr("rel", "stylesheet")
            .attr("href", href)
            .attr("type", "text/css");
        el
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out),
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Raw(r) => out.push_str(r),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Serialize a complete document with its doctype.
#[must_use]
pub fn document(html: &Element) -> String {
    format!("<!DOCTYPE html>\n{}\n", html.render())
}
