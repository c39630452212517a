use crate::{
    AppState, Effect, GenerationOutcome, GenerationRequest, Msg, Notification, PdfResult, Phase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::PdfFilenameChanged(name) => {
            state.set_pdf_filename(name);
            Vec::new()
        }
        Msg::GenerateClicked => {
            // The trigger is disabled while generating; a stray click is dropped.
            if state.phase() == Phase::Generating {
                return (state, Vec::new());
            }
            match GenerationRequest::new(state.job_description(), state.pdf_filename()) {
                Ok(request) => {
                    state.begin_generation();
                    vec![Effect::StartGeneration(request)]
                }
                Err(err) => notify(&mut state, Notification::error("Missing Info", err.to_string())),
            }
        }
        Msg::SectionStarted { key } => {
            if state.phase() != Phase::Generating {
                return (state, Vec::new());
            }
            state.section_started(key);
            Vec::new()
        }
        Msg::SectionCompleted { key, error } => {
            if state.phase() != Phase::Generating {
                return (state, Vec::new());
            }
            state.section_completed(key, error.is_some());
            match error {
                Some(message) => notify(&mut state, Notification::error("Completion Error", message)),
                None => Vec::new(),
            }
        }
        Msg::GenerationFinished(outcome) => {
            if state.phase() != Phase::Generating {
                return (state, Vec::new());
            }
            state.finish_generation();
            let notices = outcome_notices(outcome);
            let mut effects = Vec::with_capacity(notices.len());
            for notice in notices {
                effects.extend(notify(&mut state, notice));
            }
            effects
        }
    };

    (state, effects)
}

fn notify(state: &mut AppState, notice: Notification) -> Vec<Effect> {
    state.record_notice(&notice);
    vec![Effect::Notify(notice)]
}

fn outcome_notices(outcome: GenerationOutcome) -> Vec<Notification> {
    match outcome {
        GenerationOutcome::Completed { docx_path, pdf } => {
            let mut notices = Vec::with_capacity(2);
            let mut message = format!("Resume generated as '{docx_path}'.");
            match pdf {
                PdfResult::Written { pdf_path } => {
                    message.push_str(&format!("\nAlso saved as '{pdf_path}'."));
                }
                PdfResult::Unavailable { reason } => {
                    notices.push(Notification::warning("Conversion Warning", reason));
                    message.push_str("\nPDF conversion was skipped or failed.");
                }
                PdfResult::Failed { reason } => {
                    notices.push(Notification::error(
                        "PDF Conversion Error",
                        format!("Failed to convert DOCX to PDF:\n{reason}"),
                    ));
                    message.push_str("\nPDF conversion was skipped or failed.");
                }
            }
            notices.push(Notification::info("Success", message));
            notices
        }
        GenerationOutcome::Failed { message } => vec![Notification::error(
            "Error",
            format!("Failed to generate resume: {message}"),
        )],
    }
}
