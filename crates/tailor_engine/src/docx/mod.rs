//! Minimal WordprocessingML (DOCX) support: enough to find paragraphs, runs
//! and table cells in `word/document.xml`, edit them and write the package back.
mod document;
mod package;
mod xml;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

pub use document::{Document, LineFormat, ParagraphId, RunId, DOCUMENT_PART};
pub use package::Package;
pub use xml::{XmlElement, XmlError, XmlNode, XmlTree};

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("cannot open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("not a valid docx package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("package has no {0} part")]
    MissingPart(&'static str),
    #[error("document part has no w:body element")]
    MissingBody,
    #[error("document part is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Xml(#[from] XmlError),
    #[error("cannot write {path:?}: {source}")]
    Write { path: PathBuf, source: PersistError },
}
