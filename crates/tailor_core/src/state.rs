use crate::view_model::{AppViewModel, SectionRowView};
use crate::Notification;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Generating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Requesting,
    Filled,
    /// The completion failed; the section is filled with empty text.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionRow {
    key: String,
    status: SectionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    job_description: String,
    pdf_filename: String,
    phase: Phase,
    sections: Vec<SectionRow>,
    last_notice: Option<Notification>,
    runs_started: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            generate_enabled: self.phase == Phase::Idle,
            pdf_filename: self.pdf_filename.clone(),
            sections: self
                .sections
                .iter()
                .map(|row| SectionRowView {
                    key: row.key.clone(),
                    status: row.status,
                })
                .collect(),
            last_notice: self.last_notice.clone(),
            runs_started: self.runs_started,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn pdf_filename(&self) -> &str {
        &self.pdf_filename
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_pdf_filename(&mut self, name: String) {
        if self.pdf_filename != name {
            self.pdf_filename = name;
            self.dirty = true;
        }
    }

    pub(crate) fn begin_generation(&mut self) {
        self.phase = Phase::Generating;
        self.sections.clear();
        self.last_notice = None;
        self.runs_started += 1;
        self.dirty = true;
    }

    pub(crate) fn finish_generation(&mut self) {
        self.phase = Phase::Idle;
        self.dirty = true;
    }

    pub(crate) fn section_started(&mut self, key: String) {
        match self.sections.iter_mut().find(|row| row.key == key) {
            Some(row) => row.status = SectionStatus::Requesting,
            None => self.sections.push(SectionRow {
                key,
                status: SectionStatus::Requesting,
            }),
        }
        self.dirty = true;
    }

    pub(crate) fn section_completed(&mut self, key: String, failed: bool) {
        let status = if failed {
            SectionStatus::Empty
        } else {
            SectionStatus::Filled
        };
        match self.sections.iter_mut().find(|row| row.key == key) {
            Some(row) => row.status = status,
            None => self.sections.push(SectionRow { key, status }),
        }
        self.dirty = true;
    }

    pub(crate) fn record_notice(&mut self, notice: &Notification) {
        self.last_notice = Some(notice.clone());
        self.dirty = true;
    }
}
