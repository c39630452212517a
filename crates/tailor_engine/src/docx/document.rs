use std::path::{Path, PathBuf};

use ego_tree::NodeId;

use super::package::Package;
use super::xml::{XmlElement, XmlNode, XmlTree};
use super::DocxError;
use crate::persist::AtomicFileWriter;

pub const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphId(NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunId(NodeId);

/// Formatting applied to paragraphs created from multi-line replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    pub font_size_pt: u32,
    /// Line height in 240ths of a line; 240 is single spacing.
    pub line: u32,
    pub space_before_twips: u32,
    pub space_after_twips: u32,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            font_size_pt: 10,
            line: 240,
            space_before_twips: 0,
            space_after_twips: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    package: Package,
    xml: XmlTree,
    body: NodeId,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self, DocxError> {
        Self::from_package(Package::open(path)?)
    }

    pub fn from_package(package: Package) -> Result<Self, DocxError> {
        let raw = package
            .part(DOCUMENT_PART)
            .ok_or(DocxError::MissingPart(DOCUMENT_PART))?;
        let xml = XmlTree::parse(std::str::from_utf8(raw)?)?;
        let body = xml
            .first_child_named(xml.root(), "w:document")
            .and_then(|document| xml.first_child_named(document, "w:body"))
            .ok_or(DocxError::MissingBody)?;
        Ok(Self { package, xml, body })
    }

    /// Wraps a bare `word/document.xml` into a minimal package.
    pub fn from_document_xml(document_xml: &str) -> Result<Self, DocxError> {
        let mut package = Package::default();
        package.set_part("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec());
        package.set_part("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec());
        package.set_part(DOCUMENT_PART, document_xml.as_bytes().to_vec());
        Self::from_package(package)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut package = self.package.clone();
        package.set_part(DOCUMENT_PART, self.xml.to_xml()?.into_bytes());
        package.to_bytes()
    }

    pub fn save(&self, path: &Path) -> Result<PathBuf, DocxError> {
        let bytes = self.to_bytes()?;
        let write_error = |source| DocxError::Write {
            path: path.to_path_buf(),
            source,
        };
        let (writer, filename) = AtomicFileWriter::for_path(path).map_err(write_error)?;
        writer.write(&filename, &bytes).map_err(write_error)
    }

    pub fn document_xml(&self) -> Result<String, DocxError> {
        Ok(self.xml.to_xml()?)
    }

    pub fn body_paragraphs(&self) -> Vec<ParagraphId> {
        self.xml
            .children_named(self.body, "w:p")
            .into_iter()
            .map(ParagraphId)
            .collect()
    }

    /// Paragraphs of every cell of every top-level table, in document order.
    pub fn table_paragraphs(&self) -> Vec<ParagraphId> {
        let mut paragraphs = Vec::new();
        for table in self.xml.children_named(self.body, "w:tbl") {
            for row in self.xml.children_named(table, "w:tr") {
                for cell in self.xml.children_named(row, "w:tc") {
                    paragraphs.extend(self.xml.children_named(cell, "w:p").into_iter().map(ParagraphId));
                }
            }
        }
        paragraphs
    }

    pub fn table_cell_texts(&self) -> Vec<Vec<Vec<String>>> {
        self.xml
            .children_named(self.body, "w:tbl")
            .into_iter()
            .map(|table| {
                self.xml
                    .children_named(table, "w:tr")
                    .into_iter()
                    .map(|row| {
                        self.xml
                            .children_named(row, "w:tc")
                            .into_iter()
                            .map(|cell| {
                                self.xml
                                    .children_named(cell, "w:p")
                                    .into_iter()
                                    .map(|p| self.paragraph_text(ParagraphId(p)))
                                    .collect::<Vec<_>>()
                                    .join("\n")
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    pub fn body_paragraph_texts(&self) -> Vec<String> {
        self.body_paragraphs()
            .into_iter()
            .map(|p| self.paragraph_text(p))
            .collect()
    }

    pub fn runs(&self, paragraph: ParagraphId) -> Vec<RunId> {
        self.xml
            .children_named(paragraph.0, "w:r")
            .into_iter()
            .map(RunId)
            .collect()
    }

    pub fn paragraph_text(&self, paragraph: ParagraphId) -> String {
        self.runs(paragraph)
            .into_iter()
            .map(|run| self.run_text(run))
            .collect()
    }

    /// Run text as a word processor shows it: `w:tab` is `\t`, breaks are `\n`.
    pub fn run_text(&self, run: RunId) -> String {
        let Some(node) = self.xml.node(run.0) else {
            return String::new();
        };
        let mut text = String::new();
        for child in node.children() {
            let XmlNode::Element(element) = child.value() else {
                continue;
            };
            match element.name.as_str() {
                "w:t" => text.push_str(&self.xml.text_content(child.id())),
                "w:tab" => text.push('\t'),
                "w:br" | "w:cr" => text.push('\n'),
                _ => {}
            }
        }
        text
    }

    pub fn set_run_text(&mut self, run: RunId, text: &str) {
        let stale: Vec<NodeId> = match self.xml.node(run.0) {
            Some(node) => node
                .children()
                .filter(|child| !matches!(child.value(), XmlNode::Element(el) if el.name == "w:rPr"))
                .map(|child| child.id())
                .collect(),
            None => return,
        };
        for id in stale {
            self.xml.detach(id);
        }
        self.append_run_content(run.0, text);
    }

    pub fn paragraph_style(&self, paragraph: ParagraphId) -> Option<String> {
        let properties = self.xml.first_child_named(paragraph.0, "w:pPr")?;
        let style = self.xml.first_child_named(properties, "w:pStyle")?;
        self.xml
            .element(style)?
            .attr("w:val")
            .map(ToOwned::to_owned)
    }

    pub fn set_paragraph_style(&mut self, paragraph: ParagraphId, style_id: &str) {
        let properties = match self.xml.first_child_named(paragraph.0, "w:pPr") {
            Some(id) => Some(id),
            None => self
                .xml
                .prepend_child(paragraph.0, XmlNode::Element(XmlElement::new("w:pPr"))),
        };
        let Some(properties) = properties else {
            return;
        };
        let style = match self.xml.first_child_named(properties, "w:pStyle") {
            Some(id) => Some(id),
            None => self
                .xml
                .prepend_child(properties, XmlNode::Element(XmlElement::new("w:pStyle"))),
        };
        if let Some(style) = style {
            self.xml
                .edit_element(style, |element| element.set_attr("w:val", style_id));
        }
    }

    /// Removes `paragraph` and puts one new paragraph per line in its place.
    /// New paragraphs keep the old style id but take `format` for spacing and
    /// font size. Returns the number of paragraphs written.
    pub fn replace_paragraph_with_lines<S: AsRef<str>>(
        &mut self,
        paragraph: ParagraphId,
        lines: &[S],
        format: &LineFormat,
    ) -> usize {
        let style = self.paragraph_style(paragraph);
        let half_points = (format.font_size_pt * 2).to_string();
        let mut written = 0;

        for line in lines {
            let Some(new_paragraph) = self
                .xml
                .insert_before(paragraph.0, XmlNode::Element(XmlElement::new("w:p")))
            else {
                break;
            };

            if let Some(properties) =
                self.xml
                    .append_child(new_paragraph, XmlNode::Element(XmlElement::new("w:pPr")))
            {
                if let Some(style) = &style {
                    self.xml.append_child(
                        properties,
                        XmlNode::Element(XmlElement::new("w:pStyle").with_attr("w:val", style)),
                    );
                }
                self.xml.append_child(
                    properties,
                    XmlNode::Element(
                        XmlElement::new("w:spacing")
                            .with_attr("w:before", format.space_before_twips.to_string())
                            .with_attr("w:after", format.space_after_twips.to_string())
                            .with_attr("w:line", format.line.to_string())
                            .with_attr("w:lineRule", "auto"),
                    ),
                );
            }

            if let Some(run) = self
                .xml
                .append_child(new_paragraph, XmlNode::Element(XmlElement::new("w:r")))
            {
                if let Some(run_properties) = self
                    .xml
                    .append_child(run, XmlNode::Element(XmlElement::new("w:rPr")))
                {
                    for name in ["w:sz", "w:szCs"] {
                        self.xml.append_child(
                            run_properties,
                            XmlNode::Element(XmlElement::new(name).with_attr("w:val", &half_points)),
                        );
                    }
                }
                self.append_run_content(run, line.as_ref());
            }
            written += 1;
        }

        self.xml.detach(paragraph.0);
        written
    }

    fn append_run_content(&mut self, run: NodeId, text: &str) {
        let mut pending = String::new();
        for ch in text.chars() {
            match ch {
                '\t' | '\n' | '\r' => {
                    self.flush_text(run, &mut pending);
                    let name = if ch == '\t' { "w:tab" } else { "w:br" };
                    self.xml
                        .append_child(run, XmlNode::Element(XmlElement::new(name)));
                }
                _ => pending.push(ch),
            }
        }
        self.flush_text(run, &mut pending);
    }

    fn flush_text(&mut self, run: NodeId, pending: &mut String) {
        if pending.is_empty() {
            return;
        }
        let mut element = XmlElement::new("w:t");
        if pending.starts_with(char::is_whitespace) || pending.ends_with(char::is_whitespace) {
            element.set_attr("xml:space", "preserve");
        }
        if let Some(text_element) = self.xml.append_child(run, XmlNode::Element(element)) {
            self.xml
                .append_child(text_element, XmlNode::Text(std::mem::take(pending)));
        }
    }
}
