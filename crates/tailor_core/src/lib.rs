//! Resume tailor core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, NoticeLevel, Notification};
pub use msg::{GenerationOutcome, Msg, PdfResult};
pub use request::{normalize_pdf_filename, GenerationRequest, RequestError, DEFAULT_PDF_FILENAME};
pub use state::{AppState, Phase, SectionStatus};
pub use update::update;
pub use view_model::{AppViewModel, SectionRowView};
