//! Owned, mutable markup tree. Attributes keep document order, children are
//! an ordered node list, and subtrees clone independently.

use ordermap::OrderMap;

/// One node in an element's child list.
#[derive(Clone, Debug, PartialEq)]
pub enum XmlNode {
    /// A nested element.
    Element(Element),
    /// Character data, stored unescaped.
    Text(String),
    /// A comment, stored without the `<!--`/`-->` delimiters.
    Comment(String),
}

/// An element with ordered attributes and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    attributes: OrderMap<String, String>,
    children: Vec<XmlNode>,
}

impl Element {
    /// New element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: OrderMap::new(),
            children: Vec::new(),
        }
    }

    /// Tag name as written in the source, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute. Replacing an existing attribute keeps its position.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Mutable attribute values in document order, for in-place rewriting.
    pub fn attr_values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.attributes.values_mut()
    }

    /// Append an element child.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append any node.
    pub fn push_node(&mut self, node: XmlNode) {
        self.children.push(node);
    }

    /// Builder form of [`Element::push_element`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_element(child);
        self
    }

    /// Child nodes in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Mutable child node list.
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Element children in document order, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Mutable element children in document order.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First element child with the given tag name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Element children with the given tag name, in document order.
    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// Namespace bindings declared on this element itself: the `xmlns`
    /// attribute keys the default binding under `"xmlns"`, and each
    /// `xmlns:prefix` attribute keys its URI under the bare prefix.
    pub fn namespaces(&self) -> OrderMap<String, String> {
        let mut out = OrderMap::new();
        for (key, value) in self.attributes.iter() {
            if key == "xmlns" {
                out.insert(key.clone(), value.clone());
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                out.insert(prefix.to_string(), value.clone());
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/tree.rs"]
mod tests;
