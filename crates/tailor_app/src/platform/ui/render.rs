use tailor_core::{AppViewModel, NoticeLevel, Notification, Phase, SectionStatus};

/// One status line for the current view, or `None` before the first run.
pub fn render(view: &AppViewModel) -> Option<String> {
    if view.sections.is_empty() {
        return match view.phase {
            Phase::Generating => Some("Generating...".to_string()),
            Phase::Idle => None,
        };
    }

    let sections = view
        .sections
        .iter()
        .map(|row| format!("{} {}", row.key, section_label(row.status)))
        .collect::<Vec<_>>()
        .join(" | ");

    let line = match view.phase {
        Phase::Generating => format!("Generating: {sections}"),
        Phase::Idle => format!("Run {} finished: {sections}", view.runs_started),
    };
    Some(line)
}

fn section_label(status: SectionStatus) -> &'static str {
    match status {
        SectionStatus::Requesting => "...",
        SectionStatus::Filled => "ok",
        SectionStatus::Empty => "empty",
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let level = match notification.level {
        NoticeLevel::Info => "INFO",
        NoticeLevel::Warning => "WARNING",
        NoticeLevel::Error => "ERROR",
    };
    let mut text = format!("[{level}] {}", notification.title);
    for line in notification.message.lines() {
        text.push_str("\n    ");
        text.push_str(line);
    }
    text
}
