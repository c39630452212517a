#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tailor_engine::docx::Document;
use tailor_engine::{EngineEvent, ProgressSink};

pub fn wrap_body(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
}

pub fn styled_paragraph(style: &str, text: &str) -> String {
    format!(r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#)
}

pub fn table_cell(text: &str) -> String {
    format!("<w:tbl><w:tr><w:tc>{}</w:tc></w:tr></w:tbl>", paragraph(text))
}

/// The resume template layout: skills in the body, experience in table cells.
pub fn resume_template_body() -> String {
    [
        styled_paragraph("Heading1", "Skills"),
        styled_paragraph("ListBullet", "{{SKILLS}}"),
        styled_paragraph("Heading1", "Experience"),
        table_cell("{{JDRF}}"),
        table_cell("{{DOORDASH}}"),
        table_cell("{{REV}}"),
        table_cell("{{CAMP}}"),
    ]
    .concat()
}

pub fn write_template(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    Document::from_document_xml(&wrap_body(body))
        .unwrap()
        .save(&path)
        .unwrap();
    path
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
