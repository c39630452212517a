mod common;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{resume_template_body, write_template, TestSink};
use pretty_assertions::assert_eq;
use tailor_engine::docx::Document;
use tailor_engine::{
    ApiKey, CompletionClient, CompletionError, CompletionFailure, ConvertError, EngineConfig,
    EngineEvent, EngineHandle, FailureKind, GenerationError, GenerationJob, PdfConverter,
    PdfStatus, ResumePipeline, Stage,
};
use tempfile::TempDir;

/// Answers each prompt with a fixed text derived from the role it mentions.
#[derive(Default)]
struct ScriptedClient {
    prompts: Mutex<Vec<String>>,
    fail_when_contains: Option<&'static str>,
}

impl ScriptedClient {
    fn failing_on(needle: &'static str) -> Self {
        Self {
            fail_when_contains: Some(needle),
            ..Self::default()
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail_when_contains.is_some_and(|needle| prompt.contains(needle)) {
            return Err(CompletionError {
                kind: CompletionFailure::HttpStatus(500),
                message: "upstream failure".to_string(),
            });
        }
        let text = if prompt.contains("SKILLS section") {
            "Languages: Rust, Python\nTools: Git"
        } else if prompt.contains("Software Engineer Co-op") {
            "• Built services"
        } else if prompt.contains("DoorDash Delivery Driver") {
            "• Delivered orders"
        } else if prompt.contains("Rev Captionist") {
            "• Captioned media"
        } else {
            "• Led activities"
        };
        Ok(text.to_string())
    }
}

enum ConverterBehaviour {
    Write,
    Unavailable,
    Fail,
}

struct FakeConverter {
    behaviour: ConverterBehaviour,
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeConverter {
    fn new(behaviour: ConverterBehaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PdfConverter for FakeConverter {
    async fn convert(&self, docx: &Path, pdf: &Path) -> Result<(), ConvertError> {
        self.calls
            .lock()
            .unwrap()
            .push((docx.to_path_buf(), pdf.to_path_buf()));
        match self.behaviour {
            ConverterBehaviour::Write => {
                std::fs::write(pdf, b"%PDF-1.4")?;
                Ok(())
            }
            ConverterBehaviour::Unavailable => Err(ConvertError::Unavailable(
                "soffice not installed. PDF conversion skipped.".to_string(),
            )),
            ConverterBehaviour::Fail => Err(ConvertError::Failed("converter crashed".to_string())),
        }
    }
}

struct Fixture {
    temp: TempDir,
    config: EngineConfig,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let mut config = EngineConfig::new(ApiKey::new("sk-test").unwrap());
        config.paths.template =
            write_template(temp.path(), "resume_template.docx", &resume_template_body());
        config.paths.docx = temp.path().join("output_resume.docx");
        config.paths.pdf_dir = temp.path().join("pdf");
        Self { temp, config }
    }

    fn pipeline(
        &self,
        client: Arc<dyn CompletionClient>,
        converter: Arc<dyn PdfConverter>,
    ) -> ResumePipeline {
        ResumePipeline::new(&self.config, client, converter)
    }
}

fn job(description: &str, pdf: &str) -> GenerationJob {
    GenerationJob {
        job_description: description.to_string(),
        pdf_filename: pdf.to_string(),
    }
}

#[tokio::test]
async fn full_run_fills_every_section_and_writes_pdf() {
    let fixture = Fixture::new();
    std::fs::create_dir_all(&fixture.config.paths.pdf_dir).unwrap();
    let client = Arc::new(ScriptedClient::default());
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Write));
    let pipeline = fixture.pipeline(client.clone(), converter.clone());
    let sink = TestSink::new();

    let report = pipeline
        .run(&job("  Backend engineer, Rust  ", "Jane_Resume.pdf"), &sink)
        .await
        .unwrap();

    let expected_pdf = fixture.config.paths.pdf_dir.join("Jane_Resume.pdf");
    assert_eq!(report.docx_path, fixture.config.paths.docx);
    assert_eq!(report.pdf, PdfStatus::Written(expected_pdf.clone()));
    assert!(report.empty_sections.is_empty());
    assert!(expected_pdf.is_file());

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 5);
    assert!(prompts[0].contains("SKILLS section"));
    assert!(prompts.iter().all(|p| p.contains("Backend engineer, Rust")));
    assert!(prompts.iter().all(|p| !p.contains("  Backend engineer, Rust  ")));

    let doc = Document::open(&fixture.config.paths.docx).unwrap();
    assert_eq!(
        doc.body_paragraph_texts(),
        ["Skills", "Languages: Rust, Python", "Tools: Git", "Experience"]
    );
    let cells: Vec<String> = doc.table_cell_texts().into_iter().flatten().flatten().collect();
    assert_eq!(
        cells,
        ["• Built services", "• Delivered orders", "• Captioned media", "• Led activities"]
    );

    let stages: Vec<Stage> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::Stage(stage) => Some(stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        stages,
        [Stage::Requesting, Stage::Filling, Stage::Converting, Stage::Done]
    );
}

#[tokio::test]
async fn blank_job_description_makes_no_calls() {
    let fixture = Fixture::new();
    let client = Arc::new(ScriptedClient::default());
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Write));
    let pipeline = fixture.pipeline(client.clone(), converter.clone());
    let sink = TestSink::new();

    let err = pipeline.run(&job(" \n\t ", "Resume.pdf"), &sink).await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyJobDescription));
    assert_eq!(err.to_failure().kind, FailureKind::EmptyJobDescription);
    assert!(client.prompts().is_empty());
    assert!(converter.calls.lock().unwrap().is_empty());
    assert!(sink.take().is_empty());
    assert!(!fixture.config.paths.docx.exists());
}

#[tokio::test]
async fn failed_section_is_left_empty_and_the_run_continues() {
    let fixture = Fixture::new();
    let client = Arc::new(ScriptedClient::failing_on("Rev Captionist"));
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Unavailable));
    let pipeline = fixture.pipeline(client.clone(), converter);
    let sink = TestSink::new();

    let report = pipeline.run(&job("Data analyst", "cv"), &sink).await.unwrap();

    assert_eq!(report.empty_sections, ["REV"]);
    assert_eq!(client.prompts().len(), 5);
    let doc = Document::open(&report.docx_path).unwrap();
    let cells: Vec<String> = doc.table_cell_texts().into_iter().flatten().flatten().collect();
    assert_eq!(cells[2], "");
    assert!(!doc.document_xml().unwrap().contains("{{REV}}"));

    let failed: Vec<String> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::SectionCompleted {
                key,
                error: Some(_),
            } => Some(key),
            _ => None,
        })
        .collect();
    assert_eq!(failed, ["REV"]);
}

#[tokio::test]
async fn unavailable_converter_still_keeps_the_document() {
    let fixture = Fixture::new();
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Unavailable));
    let pipeline = fixture.pipeline(Arc::new(ScriptedClient::default()), converter.clone());

    let report = pipeline
        .run(&job("Role", "My Resume"), &TestSink::new())
        .await
        .unwrap();

    assert!(report.docx_path.is_file());
    assert_eq!(
        report.pdf,
        PdfStatus::Unavailable("soffice not installed. PDF conversion skipped.".to_string())
    );
    let calls = converter.calls.lock().unwrap();
    assert_eq!(calls[0].0, fixture.config.paths.docx);
    assert_eq!(calls[0].1, fixture.config.paths.pdf_dir.join("My Resume.pdf"));
}

#[tokio::test]
async fn converter_failure_is_reported_not_fatal() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(
        Arc::new(ScriptedClient::default()),
        Arc::new(FakeConverter::new(ConverterBehaviour::Fail)),
    );

    let report = pipeline.run(&job("Role", ""), &TestSink::new()).await.unwrap();

    assert!(report.docx_path.is_file());
    assert_eq!(report.pdf, PdfStatus::Failed("converter crashed".to_string()));
}

#[tokio::test]
async fn missing_template_fails_after_completions() {
    let mut fixture = Fixture::new();
    fixture.config.paths.template = fixture.temp.path().join("nope.docx");
    let client = Arc::new(ScriptedClient::default());
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Write));
    let pipeline = fixture.pipeline(client.clone(), converter.clone());

    let err = pipeline.run(&job("Role", "x.pdf"), &TestSink::new()).await.unwrap_err();

    assert_eq!(err.to_failure().kind, FailureKind::TemplateUnreadable);
    assert!(converter.calls.lock().unwrap().is_empty());
    assert!(!fixture.config.paths.docx.exists());
}

#[test]
fn engine_handle_reports_finished_outcome() {
    let fixture = Fixture::new();
    let pipeline = fixture.pipeline(
        Arc::new(ScriptedClient::default()),
        Arc::new(FakeConverter::new(ConverterBehaviour::Unavailable)),
    );
    let engine = EngineHandle::new(pipeline).unwrap();

    engine.generate(job("Role", "Resume.pdf"));

    let mut started = Vec::new();
    let outcome = loop {
        match engine.recv().expect("engine alive") {
            EngineEvent::SectionStarted { key } => started.push(key),
            EngineEvent::Finished(result) => break result,
            _ => {}
        }
    };
    assert_eq!(started, ["SKILLS", "JDRF", "DOORDASH", "REV", "CAMP"]);
    let report = outcome.unwrap();
    assert!(matches!(report.pdf, PdfStatus::Unavailable(_)));
}

#[tokio::test]
async fn unwritable_output_aborts_before_conversion() {
    let mut fixture = Fixture::new();
    let blocked = fixture.temp.path().join("taken");
    std::fs::create_dir(&blocked).unwrap();
    fixture.config.paths.docx = blocked.clone();
    let converter = Arc::new(FakeConverter::new(ConverterBehaviour::Write));
    let pipeline = fixture.pipeline(Arc::new(ScriptedClient::default()), converter.clone());
    let sink = TestSink::new();

    let err = pipeline.run(&job("Role", "x.pdf"), &sink).await.unwrap_err();

    assert!(matches!(err, GenerationError::Output(_)));
    assert_eq!(err.to_failure().kind, FailureKind::OutputUnwritable);
    assert!(blocked.is_dir());
    assert!(converter.calls.lock().unwrap().is_empty());
    let reached_conversion = sink
        .take()
        .into_iter()
        .any(|event| matches!(event, EngineEvent::Stage(Stage::Converting)));
    assert!(!reached_conversion);
}
