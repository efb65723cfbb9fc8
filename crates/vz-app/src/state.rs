use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use chrono::Utc;
use reqwest::Url;
use tracing::{debug, error, info, warn};
use vz_core::Effect;
use vz_core::ids::{nano_id, DOWNLOAD_ID_LEN};

use crate::error::AppError;
use crate::file::SelectedFile;
use crate::generator::{ImageGenApi, PollProgress};
use crate::job::{GenerationJob, UploadedAsset};
use crate::ui::{StatusDisplay, View};

pub const NOT_AN_IMAGE: &str = "Please upload an image file";

const DEFAULT_DOWNLOAD_EXTENSION: &str = "png";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Uploading,
    Ready,
    Submitting,
    /// `attempt` is 0 right after submission, then the number of polls
    /// that found the job still running.
    Polling { attempt: u32 },
    Complete,
    Error { message: String },
}

impl UiState {
    /// A network flow is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Uploading | Self::Submitting | Self::Polling { .. })
    }
}

#[derive(Debug, Default)]
struct Session {
    state: UiState,
    asset: Option<UploadedAsset>,
    job: Option<GenerationJob>,
    result_url: Option<String>,
    /// Bumped by every new flow and by reset. A flow only touches the
    /// session while its own token is still current.
    generation: u64,
}

impl Session {
    fn clear(&mut self) {
        self.asset = None;
        self.job = None;
        self.result_url = None;
    }
}

/// Drives upload → submit → poll → result for one user session.
///
/// All methods take `&self`, so a reset may interleave with a suspended flow.
/// The session lock is never held across an await.
pub struct Orchestrator<A, V> {
    api: A,
    view: V,
    user_id: String,
    effect: Effect,
    session: Mutex<Session>,
}

impl<A, V> Orchestrator<A, V>
where
    A: ImageGenApi,
    V: View,
{
    pub fn new(api: A, view: V, user_id: impl Into<String>, effect: Effect) -> Self {
        Self {
            api,
            view,
            user_id: user_id.into(),
            effect,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> UiState {
        self.session().state.clone()
    }

    pub fn current_asset(&self) -> Option<UploadedAsset> {
        self.session().asset.clone()
    }

    pub fn current_job(&self) -> Option<GenerationJob> {
        self.session().job.clone()
    }

    pub fn result_url(&self) -> Option<String> {
        self.session().result_url.clone()
    }

    pub fn display(&self) -> StatusDisplay {
        self.display_for(&self.session())
    }

    pub async fn handle_file_select(&self, file: SelectedFile) {
        if !file.is_image() {
            warn!("Rejected {} ({})", file.name, file.content_type);
            self.view.notify(NOT_AN_IMAGE);
            return;
        }

        let token = {
            let mut session = self.session();
            session.generation += 1;
            session.clear();
            session.state = UiState::Uploading;
            self.view.clear_error();
            self.view.show_preview(None);
            self.view.show_result(None);
            self.render(&session);
            session.generation
        };

        info!("Uploading {} ({}, {} bytes)", file.name, file.content_type, file.bytes.len());

        match self.api.upload_file(&file).await {
            Ok(asset) => {
                self.apply(token, |session, view| {
                    view.show_preview(Some(&asset.url));
                    session.asset = Some(asset);
                    session.state = UiState::Ready;
                });
            }
            Err(e) => self.fail(token, e),
        }
    }

    pub async fn handle_generate(&self) {
        let Some((token, asset)) = self.begin_generate() else {
            return;
        };

        let job = match self.api.submit_job(&asset.url, &self.user_id).await {
            Ok(job) => job,
            Err(e) => return self.fail(token, e),
        };
        info!("Submitted job {} for {}", job.job_id, asset.url);

        let queued = self.apply(token, |session, _| {
            session.job = Some(job.clone());
            session.state = UiState::Polling { attempt: 0 };
        });
        if !queued {
            return;
        }

        let on_progress = |progress: PollProgress| {
            let current = match progress {
                PollProgress::Running { attempt } => self.apply(token, |session, _| {
                    session.state = UiState::Polling { attempt };
                }),
                PollProgress::Resuming { .. } => self.is_current(token),
            };
            if current {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        };

        let report = match self.api.poll_job_status(&job, &self.user_id, &on_progress).await {
            Ok(report) => report,
            Err(e) => return self.fail(token, e),
        };

        let Some(url) = report.result_url().map(str::to_string) else {
            return self.fail(token, AppError::MissingResult);
        };

        info!(
            "Job {} complete after {}s: {}",
            job.job_id,
            (Utc::now() - job.submitted_at).num_seconds(),
            url
        );

        self.apply(token, |session, view| {
            view.show_result(Some(&url));
            session.result_url = Some(url);
            session.job = None;
            session.state = UiState::Complete;
        });
    }

    pub fn reset(&self) {
        let mut session = self.session();
        session.generation += 1;
        session.clear();
        session.state = UiState::Idle;

        self.view.clear_error();
        self.view.show_preview(None);
        self.view.show_result(None);
        self.render(&session);
        debug!("Session reset (generation {})", session.generation);
    }

    /// Save the current result into `out_dir`.
    ///
    /// Failures are reported to the user with a manual-save hint and yield `None`.
    pub async fn download(&self, out_dir: &Path) -> Option<PathBuf> {
        let url = self.result_url()?;
        self.view.notify("Downloading...");

        match self.save_result(&url, out_dir).await {
            Ok(path) => {
                self.view.notify(&format!("Saved {}", path.display()));
                Some(path)
            }
            Err(e) => {
                warn!("Download of {} failed: {:#}", url, e);
                self.view.notify(&format!(
                    "Download failed. Open {} in a browser and save the image manually.",
                    url
                ));
                None
            }
        }
    }

    async fn save_result(&self, url: &str, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let bytes = self.api.fetch_asset_bytes(url).await?;

        tokio::fs::create_dir_all(out_dir)
            .await
            .with_context(|| format!("Failed to create {}", out_dir.display()))?;

        let path = out_dir.join(download_file_name(self.effect, url));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }

    fn begin_generate(&self) -> Option<(u64, UploadedAsset)> {
        let mut session = self.session();
        let asset = session.asset.clone()?;
        if session.state.is_busy() {
            debug!("Generate ignored while {:?}", session.state);
            return None;
        }

        session.generation += 1;
        session.result_url = None;
        session.state = UiState::Submitting;
        self.view.clear_error();
        self.render(&session);
        Some((session.generation, asset))
    }

    /// Run `update` and redraw, unless a newer flow or a reset took over.
    fn apply(&self, token: u64, update: impl FnOnce(&mut Session, &V)) -> bool {
        let mut session = self.session();
        if session.generation != token {
            warn!("Dropping stale result (flow {}, current {})", token, session.generation);
            return false;
        }

        update(&mut session, &self.view);
        self.render(&session);
        true
    }

    fn is_current(&self, token: u64) -> bool {
        let current = self.session().generation == token;
        if !current {
            debug!("Flow {} superseded", token);
        }
        current
    }

    fn fail(&self, token: u64, e: AppError) {
        if e == AppError::Cancelled {
            debug!("Flow {} abandoned", token);
            return;
        }

        let message = e.to_string();
        self.apply(token, |session, view| {
            error!("Flow failed: {}", message);
            session.job = None;
            session.state = UiState::Error { message: message.clone() };
            view.show_error(&message);
        });
    }

    fn render(&self, session: &Session) {
        self.view.render_status(&self.display_for(session));
    }

    fn display_for(&self, session: &Session) -> StatusDisplay {
        StatusDisplay::for_state(&session.state, session.asset.is_some(), self.effect)
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `<prefix>_<random>.<ext>`, taking the extension from the result URL.
pub fn download_file_name(effect: Effect, url: &str) -> String {
    format!(
        "{}_{}.{}",
        effect.download_prefix(),
        nano_id(DOWNLOAD_ID_LEN),
        url_extension(url).unwrap_or_else(|| DEFAULT_DOWNLOAD_EXTENSION.to_string())
    )
}

/// Lowercased extension of the last path segment of `url`, if it looks like one.
fn url_extension(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let last = url.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;

    let plausible = !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plausible.then(|| ext.to_ascii_lowercase())
}
