use std::fmt;
use std::path::PathBuf;

use crate::CompletionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub job_description: String,
    pub pdf_filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Requesting,
    Filling,
    Converting,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Stage(Stage),
    SectionStarted {
        key: String,
    },
    SectionCompleted {
        key: String,
        error: Option<CompletionError>,
    },
    Finished(Result<GenerationReport, GenerationFailure>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub docx_path: PathBuf,
    pub pdf: PdfStatus,
    /// Sections whose completion failed and were filled with empty text.
    pub empty_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfStatus {
    Written(PathBuf),
    Unavailable(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyJobDescription,
    TemplateUnreadable,
    OutputUnwritable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::EmptyJobDescription => write!(f, "empty job description"),
            FailureKind::TemplateUnreadable => write!(f, "template unreadable"),
            FailureKind::OutputUnwritable => write!(f, "output unwritable"),
        }
    }
}
