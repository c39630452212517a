use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tailor_core::{
    update, AppState, GenerationOutcome, Msg, NoticeLevel, Notification, Phase,
};
use tailor_engine::{
    DisabledConverter, EngineConfig, EngineHandle, OfficeConverter, OpenAiCompletionClient,
    PdfConverter, ResumePipeline,
};
use tailor_logging::{tailor_error, tailor_info};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::settings::load_settings;
use super::ui::{dialogs, input, render};

pub fn run_app() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);
    tailor_info!("resume_tailor {} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tailor_error!("{:#}", err);
            dialogs::show(&Notification::error("Error", format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            dialogs::show(&Notification::error("API Key Error", err.to_string()));
            return Ok(ExitCode::FAILURE);
        }
    };
    let settings = load_settings(&cli.config);
    settings.apply(&mut config);
    cli.apply(&mut config);
    tailor_info!(
        "Template {:?}, output {:?}, PDF dir {:?}, conversion {}",
        config.paths.template,
        config.paths.docx,
        config.paths.pdf_dir,
        if config.converter.enabled { "on" } else { "off" }
    );

    let completion = OpenAiCompletionClient::new(config.completion.clone())
        .context("Failed to set up the completion client")?;
    let converter: Arc<dyn PdfConverter> = if config.converter.enabled {
        Arc::new(OfficeConverter::new(config.converter.clone()))
    } else {
        Arc::new(DisabledConverter)
    };
    let pipeline = ResumePipeline::new(&config, Arc::new(completion), converter);
    let engine = EngineHandle::new(pipeline)?;

    let interactive = io::stdin().is_terminal();
    let pdf_name = cli.pdf_name.clone().or_else(|| settings.pdf_name.clone());
    let mut app = App::new(EffectRunner::new(engine));

    loop {
        let Some(form) = input::read_form(cli.job_file.as_deref(), pdf_name.as_deref(), interactive)?
        else {
            tailor_info!("Input cancelled");
            break;
        };
        app.dispatch(Msg::JobDescriptionChanged(form.job_description));
        app.dispatch(Msg::PdfFilenameChanged(form.pdf_filename));
        app.dispatch(Msg::GenerateClicked);
        app.wait_until_idle();

        if !interactive || cli.job_file.is_some() || !input::confirm_another()? {
            break;
        }
    }

    Ok(app.exit_code())
}

/// Owns the state and feeds every message through `update`.
struct App {
    state: AppState,
    effects: EffectRunner,
    last_line: Option<String>,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
            last_line: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let line = render::render(&state.view());
            if line.is_some() && line != self.last_line {
                if let Some(text) = &line {
                    println!("{text}");
                }
                self.last_line = line;
            }
        }
        self.state = state;
        self.effects.run(effects);
    }

    fn wait_until_idle(&mut self) {
        while self.state.phase() == Phase::Generating {
            match self.effects.next_msg() {
                Some(msg) => self.dispatch(msg),
                None => {
                    tailor_error!("Engine stopped during generation");
                    self.dispatch(Msg::GenerationFinished(GenerationOutcome::Failed {
                        message: "the engine stopped unexpectedly".to_string(),
                    }));
                }
            }
        }
    }

    /// Failure when the last action ended with an error notice.
    fn exit_code(&self) -> ExitCode {
        match self.state.view().last_notice {
            Some(notice) if notice.level == NoticeLevel::Error => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    }
}
