use std::sync::Mutex;

use tracing::{debug, error};

use crate::ui::{StatusDisplay, View};

/// Prints the session to the terminal.
#[derive(Debug, Default)]
pub struct TerminalView {
    last_status: Mutex<Option<String>>,
}

impl View for TerminalView {
    fn render_status(&self, status: &StatusDisplay) {
        let Ok(mut last) = self.last_status.lock() else {
            return;
        };
        if last.as_deref() == Some(status.status_text.as_str()) {
            return;
        }
        *last = Some(status.status_text.clone());

        debug!("Status: {:?}", status);
        if !status.status_text.is_empty() {
            println!("[{}]", status.status_text);
        }
    }

    fn show_preview(&self, url: Option<&str>) {
        if let Some(url) = url {
            println!("Uploaded: {}", url);
        }
    }

    fn show_result(&self, url: Option<&str>) {
        if let Some(url) = url {
            println!("Result: {}", url);
        }
    }

    fn show_error(&self, message: &str) {
        error!("{}", message);
        eprintln!("Error: {}", message);
    }

    fn clear_error(&self) {
        debug!("Error cleared");
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}
