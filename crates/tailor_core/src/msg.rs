#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the job description input.
    JobDescriptionChanged(String),
    /// User edited the desired PDF filename input.
    PdfFilenameChanged(String),
    /// User pressed the generate trigger.
    GenerateClicked,
    /// Engine started the completion request for one section.
    SectionStarted { key: String },
    /// Engine finished one section; `error` is set when the completion failed
    /// and the section was filled with empty text.
    SectionCompleted { key: String, error: Option<String> },
    /// Engine finished the whole generation action.
    GenerationFinished(GenerationOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The document was written; the PDF step may still have been skipped.
    Completed { docx_path: String, pdf: PdfResult },
    /// The action aborted before the document could be written.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfResult {
    Written { pdf_path: String },
    Unavailable { reason: String },
    Failed { reason: String },
}
