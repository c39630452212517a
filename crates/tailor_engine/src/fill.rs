use std::path::Path;

use tailor_logging::{tailor_debug, tailor_warn};

use crate::docx::{Document, DocxError, LineFormat, ParagraphId};
use crate::prompts::SKILLS_KEY;

/// Insertion-ordered replacement texts keyed by placeholder name (no braces).
/// `None` means the key was skipped and its token is replaced by nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, Option<String>)>,
}

impl PlaceholderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for PlaceholderMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

pub fn placeholder_token(key: &str) -> String {
    format!("{{{{{key}}}}}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    /// The key whose replacement becomes one paragraph per line.
    pub multiline_key: String,
    pub normalized_style: Option<String>,
    pub line_format: LineFormat,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            multiline_key: SKILLS_KEY.to_string(),
            normalized_style: Some("Normal".to_string()),
            line_format: LineFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub inline_replacements: usize,
    pub multiline_paragraphs: Option<usize>,
    /// Further paragraphs holding the multi-line token that were left as-is.
    pub multiline_left_unfilled: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateFiller {
    options: FillOptions,
}

impl TemplateFiller {
    pub fn new(options: FillOptions) -> Self {
        Self { options }
    }

    pub fn fill_and_save(
        &self,
        mut document: Document,
        output: &Path,
        map: &PlaceholderMap,
    ) -> Result<FillReport, DocxError> {
        let report = self.apply(&mut document, map);
        document.save(output)?;
        Ok(report)
    }

    pub fn apply(&self, document: &mut Document, map: &PlaceholderMap) -> FillReport {
        let mut report = FillReport::default();
        for (key, value) in map.iter() {
            let token = placeholder_token(key);
            let value = value.unwrap_or("");
            if key == self.options.multiline_key {
                self.fill_multiline(document, &token, value, &mut report);
            } else {
                report.inline_replacements += self.fill_inline(document, &token, value);
            }
        }
        report
    }

    fn fill_inline(&self, document: &mut Document, token: &str, value: &str) -> usize {
        let mut replaced = 0;
        let paragraphs: Vec<ParagraphId> = document
            .body_paragraphs()
            .into_iter()
            .chain(document.table_paragraphs())
            .collect();

        for paragraph in paragraphs {
            if !document.paragraph_text(paragraph).contains(token) {
                continue;
            }
            let mut touched = false;
            for run in document.runs(paragraph) {
                let text = document.run_text(run);
                if text.contains(token) {
                    document.set_run_text(run, &text.replace(token, value));
                    touched = true;
                    replaced += 1;
                }
            }
            if !touched {
                tailor_debug!("{} is split across runs; left in place", token);
                continue;
            }
            if let Some(style) = &self.options.normalized_style {
                document.set_paragraph_style(paragraph, style);
            }
        }

        if replaced == 0 {
            tailor_debug!("{} not substituted anywhere", token);
        }
        replaced
    }

    fn fill_multiline(
        &self,
        document: &mut Document,
        token: &str,
        value: &str,
        report: &mut FillReport,
    ) {
        let lines: Vec<&str> = value
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let matches: Vec<ParagraphId> = document
            .body_paragraphs()
            .into_iter()
            .filter(|p| document.paragraph_text(*p).contains(token))
            .collect();
        let Some((first, rest)) = matches.split_first() else {
            tailor_debug!("{} not found in document body", token);
            return;
        };

        if !rest.is_empty() {
            tailor_warn!(
                "{} appears in {} paragraphs; only the first is replaced",
                token,
                matches.len()
            );
        }
        let written =
            document.replace_paragraph_with_lines(*first, &lines, &self.options.line_format);
        report.multiline_paragraphs = Some(written);
        report.multiline_left_unfilled += rest.len();
    }
}
