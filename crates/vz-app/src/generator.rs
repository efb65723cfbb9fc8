use std::ops::ControlFlow;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info, warn};
use vz_core::ids::{nano_id, DEFAULT_ID_LEN};

use crate::error::AppError;
use crate::file::SelectedFile;
use crate::job::{GenerationJob, JobStatusReport, UploadedAsset};

pub mod backend;

pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const MAX_POLLS: u32 = 60;

const DEFAULT_FAILURE: &str = "Job processing failed";

/// How often and how long a job is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between the end of one poll and the start of the next
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            max_polls: MAX_POLLS,
        }
    }
}

/// Reported to the caller of [`ImageGenApi::poll_job_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollProgress {
    /// Poll `attempt` (1-based) found the job still running.
    Running { attempt: u32 },
    /// The interval elapsed; poll `attempt` is about to be sent.
    Resuming { attempt: u32 },
}

/// Remote image-generation service.
///
/// Implementors supply the single-request operations; uploading, polling and
/// the two-strategy download are composed from them.
#[async_trait]
pub trait ImageGenApi: Send + Sync {
    /// Signed URL that accepts a `PUT` of `file_name`.
    async fn get_upload_target(&self, file_name: &str) -> Result<String, AppError>;

    async fn put_file(&self, signed_url: &str, body: Bytes, content_type: &str) -> Result<(), AppError>;

    /// Address a stored file is served from. Not checked for reachability.
    fn public_url(&self, file_name: &str) -> String;

    async fn submit_job(&self, image_url: &str, user_id: &str) -> Result<GenerationJob, AppError>;

    async fn fetch_job_status(&self, job_id: &str, user_id: &str) -> Result<JobStatusReport, AppError>;

    /// Fetch through the server-side proxy, avoiding cross-origin limits of the asset host.
    async fn proxy_download(&self, url: &str) -> Result<Bytes, AppError>;

    async fn direct_download(&self, url: &str) -> Result<Bytes, AppError>;

    fn poll_policy(&self) -> PollPolicy {
        PollPolicy::default()
    }

    async fn upload_file(&self, file: &SelectedFile) -> Result<UploadedAsset, AppError> {
        let file_name = format!("{}.{}", nano_id(DEFAULT_ID_LEN), file.extension());

        let signed_url = self.get_upload_target(&file_name).await?;
        self.put_file(&signed_url, file.bytes.clone(), &file.content_type).await?;

        let url = self.public_url(&file_name);
        info!("Uploaded {} as {}", file.name, url);
        Ok(UploadedAsset { url })
    }

    /// Poll until the job completes, fails, or the poll budget runs out.
    ///
    /// Only "still running" answers are retried; a failed request ends the
    /// loop at once. `on_progress` hears about each still-running answer and
    /// about each wake-up before the next request; returning `Break` from
    /// either abandons the loop without sending anything further.
    async fn poll_job_status(
        &self,
        job: &GenerationJob,
        user_id: &str,
        on_progress: &(dyn Fn(PollProgress) -> ControlFlow<()> + Send + Sync),
    ) -> Result<JobStatusReport, AppError> {
        let policy = self.poll_policy();

        for attempt in 1..=policy.max_polls {
            if attempt > 1 {
                tokio::time::sleep(policy.interval).await;
                if on_progress(PollProgress::Resuming { attempt }).is_break() {
                    return Err(AppError::Cancelled);
                }
            }

            let report = self.fetch_job_status(&job.job_id, user_id).await?;
            debug!("Poll {} - Status: {:?}", attempt, report.status);

            if report.status.is_complete() {
                return Ok(report);
            }

            if report.status.is_failure() {
                let message = report
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
                return Err(AppError::JobFailed(message));
            }

            if on_progress(PollProgress::Running { attempt }).is_break() {
                return Err(AppError::Cancelled);
            }
        }

        Err(AppError::JobTimeout)
    }

    /// Proxy first, then the asset host directly.
    async fn fetch_asset_bytes(&self, url: &str) -> Result<Bytes, AppError> {
        match self.proxy_download(url).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => warn!("Proxy download failed, trying direct: {}", e),
        }

        self.direct_download(url)
            .await
            .map_err(|e| AppError::Download(e.to_string()))
    }
}
