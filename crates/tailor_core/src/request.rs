use thiserror::Error;

pub const DEFAULT_PDF_FILENAME: &str = "Resume.pdf";

/// Everything one generation action needs from the interface layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    job_description: String,
    pdf_filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Please enter the job description.")]
    EmptyJobDescription,
}

impl GenerationRequest {
    /// Builds a request from raw form input. The job description is trimmed
    /// and must not be empty; the filename is normalized.
    pub fn new(job_description: &str, pdf_filename: &str) -> Result<Self, RequestError> {
        let job_description = job_description.trim();
        if job_description.is_empty() {
            return Err(RequestError::EmptyJobDescription);
        }
        Ok(Self {
            job_description: job_description.to_string(),
            pdf_filename: normalize_pdf_filename(pdf_filename),
        })
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn pdf_filename(&self) -> &str {
        &self.pdf_filename
    }
}

/// Blank names fall back to [`DEFAULT_PDF_FILENAME`]; `.pdf` is appended
/// unless already present (case-insensitive).
pub fn normalize_pdf_filename(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_PDF_FILENAME.to_string();
    }
    if trimmed.to_ascii_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}
