use tailor_core::{Effect, GenerationOutcome, GenerationRequest, Msg, PdfResult};
use tailor_engine::{EngineEvent, EngineHandle, GenerationJob, GenerationReport, PdfStatus};
use tailor_logging::{tailor_info, tailor_warn};

use super::ui::dialogs;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGeneration(request) => {
                    tailor_info!(
                        "StartGeneration job_chars={} pdf={}",
                        request.job_description().chars().count(),
                        request.pdf_filename()
                    );
                    self.engine.generate(job_from_request(&request));
                }
                Effect::Notify(notification) => dialogs::show(&notification),
            }
        }
    }

    /// Blocks until the engine produces something the state machine cares
    /// about. `None` means the engine thread has gone away.
    pub fn next_msg(&self) -> Option<Msg> {
        loop {
            let event = self.engine.recv()?;
            if let Some(msg) = msg_from_event(event) {
                return Some(msg);
            }
        }
    }
}

pub(crate) fn job_from_request(request: &GenerationRequest) -> GenerationJob {
    GenerationJob {
        job_description: request.job_description().to_string(),
        pdf_filename: request.pdf_filename().to_string(),
    }
}

pub(crate) fn msg_from_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Stage(stage) => {
            tailor_info!("Stage {:?}", stage);
            None
        }
        EngineEvent::SectionStarted { key } => Some(Msg::SectionStarted { key }),
        EngineEvent::SectionCompleted { key, error } => Some(Msg::SectionCompleted {
            key,
            error: error.map(|err| err.to_string()),
        }),
        EngineEvent::Finished(Ok(report)) => {
            Some(Msg::GenerationFinished(outcome_from_report(report)))
        }
        EngineEvent::Finished(Err(failure)) => {
            tailor_warn!("Generation failed ({}): {}", failure.kind, failure.message);
            Some(Msg::GenerationFinished(GenerationOutcome::Failed {
                message: failure.message,
            }))
        }
    }
}

fn outcome_from_report(report: GenerationReport) -> GenerationOutcome {
    if !report.empty_sections.is_empty() {
        tailor_warn!("Sections left empty: {}", report.empty_sections.join(", "));
    }
    let pdf = match report.pdf {
        PdfStatus::Written(path) => PdfResult::Written {
            pdf_path: path.display().to_string(),
        },
        PdfStatus::Unavailable(reason) => PdfResult::Unavailable { reason },
        PdfStatus::Failed(reason) => PdfResult::Failed { reason },
    };
    GenerationOutcome::Completed {
        docx_path: report.docx_path.display().to_string(),
        pdf,
    }
}
