//! Resume engine: completions, template filling, PDF conversion and the
//! background thread that runs them.
mod completion;
mod config;
mod convert;
pub mod docx;
mod engine;
mod filename;
mod fill;
mod persist;
mod pipeline;
mod prompts;
mod types;

pub use completion::{CompletionClient, CompletionError, CompletionFailure, OpenAiCompletionClient};
pub use config::{
    ApiKey, CompletionSettings, ConfigError, ConverterSettings, EngineConfig, OutputPaths,
    API_KEY_ENV,
};
pub use convert::{ConvertError, DisabledConverter, OfficeConverter, PdfConverter};
pub use engine::{EngineError, EngineHandle};
pub use filename::safe_pdf_filename;
pub use fill::{placeholder_token, FillOptions, FillReport, PlaceholderMap, TemplateFiller};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{ChannelProgressSink, GenerationError, ProgressSink, ResumePipeline};
pub use prompts::{
    experience_prompt, skills_prompt, ExperienceEntry, EXPERIENCE_ENTRIES, SKILLS_KEY,
};
pub use types::{
    EngineEvent, FailureKind, GenerationFailure, GenerationJob, GenerationReport, PdfStatus, Stage,
};
