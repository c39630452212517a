use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::{Confirm, Editor, Error as DialoguerError, Input};
use tailor_core::DEFAULT_PDF_FILENAME;
use tailor_logging::tailor_debug;

/// What the user typed into the two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub job_description: String,
    pub pdf_filename: String,
}

/// Collects the form. `Ok(None)` means the user cancelled.
pub fn read_form(
    job_file: Option<&Path>,
    pdf_name: Option<&str>,
    interactive: bool,
) -> Result<Option<Form>> {
    let job_description = match job_file {
        Some(path) if path == Path::new("-") => read_stdin()?,
        Some(path) => fs::read_to_string(path).with_context(|| {
            format!("Failed to read job description from {}", path.display())
        })?,
        None if interactive => match prompt_job_description()? {
            Some(text) => text,
            None => return Ok(None),
        },
        None => read_stdin()?,
    };

    let pdf_filename = match pdf_name {
        Some(name) => name.to_string(),
        None if interactive => match prompt_pdf_filename()? {
            Some(name) => name,
            None => return Ok(None),
        },
        None => String::new(),
    };

    Ok(Some(Form {
        job_description,
        pdf_filename,
    }))
}

pub fn confirm_another() -> Result<bool> {
    match Confirm::new()
        .with_prompt("Generate another resume?")
        .default(false)
        .interact_opt()
    {
        Ok(answer) => Ok(answer.unwrap_or(false)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(false),
        Err(err) => Err(err).context("Failed to read answer"),
    }
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read job description from stdin")?;
    Ok(text)
}

/// Opens `$EDITOR`; without one, falls back to reading lines until a lone `.`.
fn prompt_job_description() -> Result<Option<String>> {
    match Editor::new().extension(".txt").edit("") {
        Ok(Some(text)) => return Ok(Some(text)),
        Ok(None) => return Ok(None),
        Err(err) => tailor_debug!("Editor unavailable ({}); reading from terminal", err),
    }

    eprintln!("Paste the job description. Finish with a line containing only '.'");
    let mut text = String::new();
    for line in io::stdin().lines() {
        let line = line.context("Failed to read job description")?;
        if line.trim() == "." {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(Some(text))
}

fn prompt_pdf_filename() -> Result<Option<String>> {
    match Input::<String>::new()
        .with_prompt("Desired PDF filename")
        .default(DEFAULT_PDF_FILENAME.to_string())
        .allow_empty(true)
        .interact_text()
    {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(err).context("Failed to read PDF filename"),
    }
}
