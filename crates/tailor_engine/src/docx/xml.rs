//! Mutable XML tree for WordprocessingML parts.

use ego_tree::{NodeId, NodeRef, Tree};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml syntax: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("xml attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("xml is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("xml output is not utf-8: {0}")]
    OutputUtf8(#[from] std::string::FromUtf8Error),
    #[error("xml write: {0}")]
    Io(#[from] std::io::Error),
    #[error("unbalanced element nesting")]
    Unbalanced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Root,
    Element(XmlElement),
    Text(String),
    CData(String),
    /// Raw, still-escaped comment body.
    Comment(String),
    ProcessingInstruction(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    version: String,
    encoding: Option<String>,
    standalone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct XmlTree {
    tree: Tree<XmlNode>,
    declaration: Option<Declaration>,
}

impl XmlTree {
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        let mut tree = Tree::new(XmlNode::Root);
        let mut open: Vec<NodeId> = vec![tree.root().id()];
        let mut declaration = None;

        loop {
            let parent = *open.last().ok_or(XmlError::Unbalanced)?;
            match reader.read_event()? {
                Event::Decl(decl) => declaration = Some(read_declaration(&decl)?),
                Event::Start(start) => {
                    let id = append(&mut tree, parent, XmlNode::Element(read_element(&start)?))?;
                    open.push(id);
                }
                Event::Empty(start) => {
                    append(&mut tree, parent, XmlNode::Element(read_element(&start)?))?;
                }
                Event::End(_) => {
                    if open.len() <= 1 {
                        return Err(XmlError::Unbalanced);
                    }
                    open.pop();
                }
                Event::Text(text) => {
                    let value = text.unescape()?.into_owned();
                    append(&mut tree, parent, XmlNode::Text(value))?;
                }
                Event::CData(data) => {
                    let value = std::str::from_utf8(&data)?.to_owned();
                    append(&mut tree, parent, XmlNode::CData(value))?;
                }
                Event::Comment(comment) => {
                    let value = std::str::from_utf8(&comment)?.to_owned();
                    append(&mut tree, parent, XmlNode::Comment(value))?;
                }
                Event::PI(pi) => {
                    let value = std::str::from_utf8(&pi)?.to_owned();
                    append(&mut tree, parent, XmlNode::ProcessingInstruction(value))?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if open.len() != 1 {
            return Err(XmlError::Unbalanced);
        }
        Ok(Self { tree, declaration })
    }

    pub fn to_xml(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());
        if let Some(decl) = &self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))?;
        }
        for child in self.tree.root().children() {
            write_node(&mut writer, child)?;
        }
        Ok(String::from_utf8(writer.into_inner())?)
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, XmlNode>> {
        self.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&XmlElement> {
        match self.tree.get(id)?.value() {
            XmlNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn edit_element(&mut self, id: NodeId, edit: impl FnOnce(&mut XmlElement)) -> bool {
        let Some(mut node) = self.tree.get_mut(id) else {
            return false;
        };
        match node.value() {
            XmlNode::Element(element) => {
                edit(element);
                true
            }
            _ => false,
        }
    }

    pub fn children_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        node.children()
            .filter(|child| matches!(child.value(), XmlNode::Element(el) if el.name == name))
            .map(|child| child.id())
            .collect()
    }

    pub fn first_child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.tree
            .get(id)?
            .children()
            .find(|child| matches!(child.value(), XmlNode::Element(el) if el.name == name))
            .map(|child| child.id())
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| match n.value() {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn append_child(&mut self, parent: NodeId, node: XmlNode) -> Option<NodeId> {
        Some(self.tree.get_mut(parent)?.append(node).id())
    }

    pub fn prepend_child(&mut self, parent: NodeId, node: XmlNode) -> Option<NodeId> {
        Some(self.tree.get_mut(parent)?.prepend(node).id())
    }

    pub fn insert_before(&mut self, sibling: NodeId, node: XmlNode) -> Option<NodeId> {
        Some(self.tree.get_mut(sibling)?.insert_before(node).id())
    }

    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn append(tree: &mut Tree<XmlNode>, parent: NodeId, node: XmlNode) -> Result<NodeId, XmlError> {
    let mut parent = tree.get_mut(parent).ok_or(XmlError::Unbalanced)?;
    Ok(parent.append(node).id())
}

fn read_element(start: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_owned();
    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn read_declaration(decl: &BytesDecl<'_>) -> Result<Declaration, XmlError> {
    let version = std::str::from_utf8(&decl.version()?)?.to_owned();
    let encoding = match decl.encoding() {
        Some(value) => Some(std::str::from_utf8(&value?)?.to_owned()),
        None => None,
    };
    let standalone = match decl.standalone() {
        Some(value) => Some(std::str::from_utf8(&value?)?.to_owned()),
        None => None,
    };
    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: NodeRef<'_, XmlNode>) -> Result<(), XmlError> {
    match node.value() {
        XmlNode::Root => {
            for child in node.children() {
                write_node(writer, child)?;
            }
        }
        XmlNode::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in &element.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }
            if node.has_children() {
                writer.write_event(Event::Start(start))?;
                for child in node.children() {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
            } else {
                writer.write_event(Event::Empty(start))?;
            }
        }
        XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        XmlNode::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
        XmlNode::Comment(raw) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(raw.as_str())))?
        }
        XmlNode::ProcessingInstruction(raw) => {
            writer.write_event(Event::PI(BytesPI::new(raw.as_str())))?
        }
    }
    Ok(())
}
