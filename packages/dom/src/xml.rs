use serde::{Deserialize, Serialize};

pub const MYBATIS3_MAPPER_PUBLIC_ID: &str = "-//mybatis.org//DTD Mapper 3.0//EN";
pub const MYBATIS3_MAPPER_SYSTEM_ID: &str = "http://mybatis.org/dtd/mybatis-3-mapper.dtd";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Child of an element: either a nested element or a literal text line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// Structured query-template node
///
/// Attributes keep insertion order. Text children are kept as individual
/// lines; wrapping and indentation are the renderer's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.add_text(text);
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(name, value));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    pub fn add_child(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Direct child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct text children in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// All text beneath this element, depth first, joined by single spaces
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => parts.push(text.as_str()),
                XmlNode::Element(element) => element.collect_text(parts),
            }
        }
    }

    /// Depth-first search for the first descendant with the given tag name
    pub fn find_descendant(&self, name: &str) -> Option<&XmlElement> {
        for element in self.elements() {
            if element.name == name {
                return Some(element);
            }
            if let Some(found) = element.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub public_id: Option<String>,
    pub system_id: Option<String>,
    pub root: XmlElement,
}

impl Document {
    pub fn new(root: XmlElement) -> Self {
        Self {
            public_id: None,
            system_id: None,
            root,
        }
    }

    /// MyBatis 3 mapper document with the given namespace
    pub fn mapper(namespace: impl Into<String>) -> Self {
        Self {
            public_id: Some(MYBATIS3_MAPPER_PUBLIC_ID.to_string()),
            system_id: Some(MYBATIS3_MAPPER_SYSTEM_ID.to_string()),
            root: XmlElement::new("mapper").with_attribute("namespace", namespace),
        }
    }

    /// Top-level statement or fragment with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&XmlElement> {
        self.root.elements().find(|e| e.id() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut XmlElement> {
        self.root.elements_mut().find(|e| e.id() == Some(id))
    }

    pub fn count_by_id(&self, id: &str) -> usize {
        self.root.elements().filter(|e| e.id() == Some(id)).count()
    }

    pub fn statement_ids(&self) -> Vec<&str> {
        self.root.elements().filter_map(|e| e.id()).collect()
    }
}
