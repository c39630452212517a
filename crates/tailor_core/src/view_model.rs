use crate::{Notification, Phase, SectionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// The generate trigger is disabled while an action is in flight.
    pub generate_enabled: bool,
    pub pdf_filename: String,
    pub sections: Vec<SectionRowView>,
    pub last_notice: Option<Notification>,
    pub runs_started: u64,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRowView {
    pub key: String,
    pub status: SectionStatus,
}
