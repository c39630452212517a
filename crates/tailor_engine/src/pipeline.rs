use std::path::PathBuf;
use std::sync::Arc;

use tailor_logging::{tailor_error, tailor_info, tailor_warn};
use thiserror::Error;

use crate::config::{EngineConfig, OutputPaths};
use crate::convert::{ConvertError, PdfConverter};
use crate::docx::{Document, DocxError};
use crate::fill::{PlaceholderMap, TemplateFiller};
use crate::filename::safe_pdf_filename;
use crate::prompts::{experience_prompt, skills_prompt, ExperienceEntry, EXPERIENCE_ENTRIES, SKILLS_KEY};
use crate::{
    CompletionClient, EngineEvent, FailureKind, GenerationFailure, GenerationJob, GenerationReport,
    PdfStatus, Stage,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("the job description is empty")]
    EmptyJobDescription,
    #[error("{0}")]
    Template(DocxError),
    #[error("{0}")]
    Output(DocxError),
}

impl GenerationError {
    pub fn to_failure(&self) -> GenerationFailure {
        let kind = match self {
            GenerationError::EmptyJobDescription => FailureKind::EmptyJobDescription,
            GenerationError::Template(_) => FailureKind::TemplateUnreadable,
            GenerationError::Output(_) => FailureKind::OutputUnwritable,
        };
        GenerationFailure::new(kind, self.to_string())
    }
}

pub struct ResumePipeline {
    completion: Arc<dyn CompletionClient>,
    converter: Arc<dyn PdfConverter>,
    filler: TemplateFiller,
    paths: OutputPaths,
    experience: Vec<ExperienceEntry>,
}

impl ResumePipeline {
    pub fn new(
        config: &EngineConfig,
        completion: Arc<dyn CompletionClient>,
        converter: Arc<dyn PdfConverter>,
    ) -> Self {
        Self {
            completion,
            converter,
            filler: TemplateFiller::new(config.fill.clone()),
            paths: config.paths.clone(),
            experience: EXPERIENCE_ENTRIES.to_vec(),
        }
    }

    pub fn pdf_path(&self, job: &GenerationJob) -> PathBuf {
        self.paths.pdf_dir.join(safe_pdf_filename(&job.pdf_filename))
    }

    pub async fn run(
        &self,
        job: &GenerationJob,
        sink: &dyn ProgressSink,
    ) -> Result<GenerationReport, GenerationError> {
        let job_description = job.job_description.trim();
        if job_description.is_empty() {
            return Err(GenerationError::EmptyJobDescription);
        }

        sink.emit(EngineEvent::Stage(Stage::Requesting));
        let mut map = PlaceholderMap::new();
        let mut empty_sections = Vec::new();

        let skills = self
            .complete_section(SKILLS_KEY, &skills_prompt(job_description), sink)
            .await;
        if skills.is_empty() {
            empty_sections.push(SKILLS_KEY.to_string());
        }
        map.insert(SKILLS_KEY, Some(skills));

        for entry in &self.experience {
            let prompt = experience_prompt(job_description, entry.role_name, entry.example_bullets);
            let text = self.complete_section(entry.key, &prompt, sink).await;
            if text.is_empty() {
                empty_sections.push(entry.key.to_string());
            }
            map.insert(entry.key, Some(text));
        }

        sink.emit(EngineEvent::Stage(Stage::Filling));
        let docx_path = self.fill(&map)?;

        sink.emit(EngineEvent::Stage(Stage::Converting));
        let pdf_path = self.pdf_path(job);
        let pdf = match self.converter.convert(&docx_path, &pdf_path).await {
            Ok(()) => PdfStatus::Written(pdf_path),
            Err(ConvertError::Unavailable(reason)) => {
                tailor_warn!("PDF step skipped: {}", reason);
                PdfStatus::Unavailable(reason)
            }
            Err(err) => {
                tailor_error!("PDF conversion failed: {}", err);
                PdfStatus::Failed(err.to_string())
            }
        };

        sink.emit(EngineEvent::Stage(Stage::Done));
        Ok(GenerationReport {
            docx_path,
            pdf,
            empty_sections,
        })
    }

    /// Failed completions become empty text; the run carries on.
    async fn complete_section(&self, key: &str, prompt: &str, sink: &dyn ProgressSink) -> String {
        sink.emit(EngineEvent::SectionStarted {
            key: key.to_string(),
        });
        let (text, error) = match self.completion.complete(prompt).await {
            Ok(text) => (text, None),
            Err(err) => {
                tailor_warn!("Completion for {} failed: {}", key, err);
                (String::new(), Some(err))
            }
        };
        sink.emit(EngineEvent::SectionCompleted {
            key: key.to_string(),
            error,
        });
        text
    }

    fn fill(&self, map: &PlaceholderMap) -> Result<PathBuf, GenerationError> {
        let document = Document::open(&self.paths.template).map_err(GenerationError::Template)?;
        let report = self
            .filler
            .fill_and_save(document, &self.paths.docx, map)
            .map_err(GenerationError::Output)?;
        tailor_info!(
            "Resume written to {:?} ({} inline substitutions, {:?} skill lines)",
            self.paths.docx,
            report.inline_replacements,
            report.multiline_paragraphs
        );
        Ok(self.paths.docx.clone())
    }
}
