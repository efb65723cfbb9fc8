mod terminal;

pub use terminal::TerminalView;

use vz_core::Effect;

use crate::state::UiState;

/// What the controls show for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub status_text: String,
    pub generate_label: String,
    pub generate_enabled: bool,
    pub loading: bool,
    pub download_enabled: bool,
}

impl StatusDisplay {
    pub fn for_state(state: &UiState, has_asset: bool, effect: Effect) -> Self {
        let idle_label = effect.action_label().to_string();

        match state {
            UiState::Idle => Self::settled("", idle_label, true),
            UiState::Uploading => Self::busy("UPLOADING..."),
            UiState::Ready => Self::settled("READY", idle_label, true),
            UiState::Submitting => Self::busy("SUBMITTING JOB..."),
            UiState::Polling { attempt: 0 } => Self::busy("JOB QUEUED..."),
            UiState::Polling { attempt } => Self::busy(&format!("PROCESSING... ({})", attempt)),
            UiState::Complete => Self {
                download_enabled: true,
                ..Self::settled("COMPLETE", "Generate Again".to_string(), true)
            },
            UiState::Error { .. } => Self::settled("ERROR", idle_label, has_asset),
        }
    }

    fn busy(text: &str) -> Self {
        Self {
            status_text: text.to_string(),
            generate_label: text.to_string(),
            generate_enabled: false,
            loading: true,
            download_enabled: false,
        }
    }

    fn settled(text: &str, label: String, enabled: bool) -> Self {
        Self {
            status_text: text.to_string(),
            generate_label: label,
            generate_enabled: enabled,
            loading: false,
            download_enabled: false,
        }
    }
}

/// Display surface driven by the orchestrator.
pub trait View: Send + Sync {
    fn render_status(&self, display: &StatusDisplay);

    /// Show the uploaded image, or hide the preview with `None`.
    fn show_preview(&self, url: Option<&str>);

    /// Show the finished asset without any placeholder styling, or hide it with `None`.
    fn show_result(&self, url: Option<&str>);

    fn show_error(&self, message: &str);

    /// Remove an error shown by `show_error`.
    fn clear_error(&self);

    /// One-off message to the user.
    fn notify(&self, message: &str);
}
