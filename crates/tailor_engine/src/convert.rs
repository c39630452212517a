use std::path::Path;
use std::process::Stdio;

use tailor_logging::{tailor_debug, tailor_info, tailor_warn};
use tokio::process::Command;

use crate::config::ConverterSettings;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// No converter is installed or conversion is turned off.
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Failed(String),
    #[error("conversion timed out after {0} seconds")]
    Timeout(u64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
pub trait PdfConverter: Send + Sync {
    async fn convert(&self, docx: &Path, pdf: &Path) -> Result<(), ConvertError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledConverter;

#[async_trait::async_trait]
impl PdfConverter for DisabledConverter {
    async fn convert(&self, _docx: &Path, _pdf: &Path) -> Result<(), ConvertError> {
        Err(ConvertError::Unavailable(
            "PDF conversion is disabled. PDF conversion skipped.".to_string(),
        ))
    }
}

/// Runs an office suite headless (`soffice --convert-to pdf`).
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    settings: ConverterSettings,
}

impl OfficeConverter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    async fn is_available(&self) -> bool {
        let mut probe = Command::new(&self.settings.command);
        probe
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        match tokio::time::timeout(self.settings.timeout, probe.status()).await {
            Ok(status) => status.map(|s| s.success()).unwrap_or(false),
            Err(_) => {
                tailor_warn!(
                    "{} --version did not answer within {:?}",
                    self.settings.command,
                    self.settings.timeout
                );
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl PdfConverter for OfficeConverter {
    async fn convert(&self, docx: &Path, pdf: &Path) -> Result<(), ConvertError> {
        if !self.settings.enabled {
            return DisabledConverter.convert(docx, pdf).await;
        }
        if !self.is_available().await {
            return Err(ConvertError::Unavailable(format!(
                "{} not installed. PDF conversion skipped.",
                self.settings.command
            )));
        }

        // Output is named after the input; copy it to the requested name.
        let scratch = tempfile::TempDir::new()?;
        tailor_debug!(
            "Converting {:?} with {} into {:?}",
            docx,
            self.settings.command,
            scratch.path()
        );
        let child = Command::new(&self.settings.command)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(scratch.path())
            .arg(docx)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConvertError::Failed(format!("failed to start converter: {e}")))?;

        let output = tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
            .map_err(|_| ConvertError::Timeout(self.settings.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::Failed(format!(
                "converter exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stem = docx
            .file_stem()
            .ok_or_else(|| ConvertError::Failed(format!("{docx:?} has no file name")))?;
        let mut produced_name = stem.to_os_string();
        produced_name.push(".pdf");
        let produced = scratch.path().join(produced_name);
        if !produced.is_file() {
            return Err(ConvertError::Failed(format!(
                "converter produced no PDF for {docx:?}"
            )));
        }

        if let Some(parent) = pdf.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&produced, pdf)?;
        tailor_info!("PDF written to {:?}", pdf);
        Ok(())
    }
}
