use std::path::PathBuf;

use clap::Parser;
use tailor_engine::EngineConfig;

use super::logging::LogDestination;

pub const DEFAULT_SETTINGS_FILE: &str = "resume_tailor.ron";

#[derive(Debug, Parser)]
#[command(name = "resume_tailor")]
#[command(version)]
#[command(
    about = "Tailor a DOCX resume template to a job description",
    long_about = None
)]
pub struct Cli {
    /// Resume template containing the {{SKILLS}} and experience placeholders
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,
    /// Where the filled DOCX is written (overwritten on every run)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
    /// Directory the PDF copy is written into
    #[arg(long, value_name = "DIR")]
    pub pdf_dir: Option<PathBuf>,
    /// Settings file; a missing file means defaults
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,
    /// Read the job description from a file, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub job_file: Option<PathBuf>,
    /// Desired PDF file name
    #[arg(long, value_name = "NAME")]
    pub pdf_name: Option<String>,
    /// Skip the PDF conversion step
    #[arg(long)]
    pub no_pdf: bool,
    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags win over the settings file.
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(template) = &self.template {
            config.paths.template = template.clone();
        }
        if let Some(output) = &self.output {
            config.paths.docx = output.clone();
        }
        if let Some(pdf_dir) = &self.pdf_dir {
            config.paths.pdf_dir = pdf_dir.clone();
        }
        if self.no_pdf {
            config.converter.enabled = false;
        }
    }
}
