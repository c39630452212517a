use std::io::{self, IsTerminal};

use dialoguer::Input;
use tailor_core::{NoticeLevel, Notification};
use tailor_logging::{tailor_error, tailor_info, tailor_warn};

use super::render::format_notification;

/// Shows a notification. On a terminal, warnings and errors wait for Enter
/// so they are not scrolled away by later output.
pub fn show(notification: &Notification) {
    match notification.level {
        NoticeLevel::Info => tailor_info!("{}: {}", notification.title, notification.message),
        NoticeLevel::Warning => tailor_warn!("{}: {}", notification.title, notification.message),
        NoticeLevel::Error => tailor_error!("{}: {}", notification.title, notification.message),
    }

    let text = format_notification(notification);
    if notification.level == NoticeLevel::Info {
        println!("{text}");
        return;
    }
    eprintln!("{text}");
    if io::stdin().is_terminal() && io::stderr().is_terminal() {
        let _ = Input::<String>::new()
            .with_prompt("Press Enter to continue")
            .allow_empty(true)
            .report(false)
            .interact_text();
    }
}
