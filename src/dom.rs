//! In-memory document tree produced by the parser.
//!
//! The tree is immutable once built; every validation pass only reads it.

use compact_str::CompactString;

/// A single element in the parsed filing document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Qualified tag name as written in the markup, e.g. `ix:nonFraction`.
    pub name: CompactString,
    /// Attributes in document order.
    pub attributes: Vec<(CompactString, CompactString)>,
    pub children: Vec<Node>,
    /// Text content directly under this element, whitespace-trimmed.
    pub text: String,
}

impl Node {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        }
    }

    /// Value of the first attribute with the given name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// True when the tag matches `local` with any (or no) namespace prefix,
    /// e.g. `node.is("context")` matches both `context` and `xbrli:context`.
    pub fn is(&self, local: &str) -> bool {
        match self.name.strip_suffix(local) {
            Some(rest) => rest.is_empty() || rest.ends_with(':'),
            None => false,
        }
    }

    /// First direct child matching `local`.
    pub fn child(&self, local: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.is(local))
    }

    /// Depth-first walk over this element and its whole subtree, in
    /// document order. Lazy and restartable.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// All nodes in the subtree satisfying `predicate`, lazily.
    pub fn find_all<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Node>
    where
        P: FnMut(&&'a Node) -> bool,
    {
        self.walk().filter(predicate)
    }

    /// Concatenated text of this element and all its descendants.
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        for node in self.walk() {
            if !node.text.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&node.text);
            }
        }
        out
    }
}

/// A parsed filing document. Owns the whole node tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
}

impl Document {
    /// Depth-first walk over every node in the document.
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// All nodes whose `name` attribute equals the given taxonomy name.
    pub fn tagged<'a>(&'a self, taxonomy_name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.walk()
            .filter(move |n| n.attr("name") == Some(taxonomy_name))
    }
}

/// Depth-first node iterator. See [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
