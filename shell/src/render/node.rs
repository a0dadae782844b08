//! Declarative UI tree.

use std::fmt::Write as _;

/// A node in the rendered tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// A text node
    Text(String),
}

/// An element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes; boolean attributes carry an empty value
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Adds a boolean attribute when `on` is true
    #[must_use]
    pub fn flag(self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Shorthand for the `id` attribute
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Appends a child
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Appends a text child
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Value of attribute `name`
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    /// Whether attribute `name` is present
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Sets or replaces attribute `name`
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Sets attribute `name` and moves it to position `index`
    ///
    /// `index` is clamped to the attribute count.
    pub fn insert_attribute(&mut self, index: usize, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_attribute(&name);
        let index = index.min(self.attributes.len());
        self.attributes.insert(index, (name, value.into()));
    }

    /// Removes attribute `name`
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }

    /// Whether the element carries `hidden`
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.has_attribute("hidden")
    }

    /// Concatenated text of every descendant text node
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Node {
    /// The element, if this is one
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// First element in document order with `id`
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|element| element.attribute("id") == Some(id))
    }

    /// First element in document order with tag `tag`
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|element| element.tag == tag)
    }

    /// Every element with tag `tag`, in document order
    #[must_use]
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if element.tag == tag {
                found.push(element);
            }
        });
        found
    }

    fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if predicate(element) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find(predicate))
    }

    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Element)) {
        if let Self::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            },
        }
    }

    /// Serializes the tree as markup
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => escape_into(out, text, false),
            Self::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}");
                    if !value.is_empty() {
                        out.push_str("=\"");
                        escape_into(out, value, true);
                        out.push('"');
                    }
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            },
        }
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
