use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publicly reachable address of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub url: String,
}

/// A submitted job, alive for one polling sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub job_id: String,
    pub submitted_at: DateTime<Utc>,
}

impl GenerationJob {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
    Error,
    #[serde(other)]
    Other,
}

impl JobStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultItem {
    #[serde(rename = "mediaUrl", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl ResultItem {
    /// First non-empty of `mediaUrl`, `image`, `video`.
    pub fn asset_url(&self) -> Option<&str> {
        [&self.media_url, &self.image, &self.video]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .find(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ResultPayload {
    Many(Vec<ResultItem>),
    One(ResultItem),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobStatusReport {
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatusReport {
    pub fn with_status(status: JobStatus) -> Self {
        Self {
            status,
            result: None,
            error: None,
        }
    }

    /// Address of the finished asset, if the report carries one
    pub fn result_url(&self) -> Option<&str> {
        let item = match self.result.as_ref()? {
            ResultPayload::Many(items) => items.first()?,
            ResultPayload::One(item) => item,
            ResultPayload::Other(_) => return None,
        };
        item.asset_url()
    }
}
