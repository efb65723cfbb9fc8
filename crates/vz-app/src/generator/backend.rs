pub mod routes;
pub mod schemas;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use vz_core::Effect;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::generator::backend::schemas::{JobCreateResponse, JobSubmitRequest};
use crate::generator::{ImageGenApi, PollPolicy};
use crate::job::{GenerationJob, JobStatusReport};

const JSON_ACCEPT: &str = "application/json, text/plain, */*";

/// `reqwest` client for the image-generation API and its content host.
#[derive(Debug, Clone)]
pub struct ChromaClient {
    http: Client,
    api_base: String,
    content_base: String,
    effect: Effect,
    policy: PollPolicy,
}

impl ChromaClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            content_base: config.content_base.clone(),
            effect: config.effect,
            policy: PollPolicy {
                interval: config.poll_interval,
                max_polls: config.max_polls,
            },
        })
    }

    async fn get_bytes(&self, request: reqwest::RequestBuilder, step: &str) -> Result<Bytes, AppError> {
        let response = ensure_success(request.send().await?, step)?;
        Ok(response.bytes().await?)
    }
}

fn ensure_success(response: Response, step: &str) -> Result<Response, AppError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::network(step, status));
    }
    Ok(response)
}

#[async_trait]
impl ImageGenApi for ChromaClient {
    async fn get_upload_target(&self, file_name: &str) -> Result<String, AppError> {
        let response = self
            .http
            .get(routes::upload_url(&self.api_base))
            .query(&[("fileName", file_name)])
            .send()
            .await?;

        let response = ensure_success(response, "Failed to get signed URL")?;
        Ok(response.text().await?.trim().to_string())
    }

    async fn put_file(&self, signed_url: &str, body: Bytes, content_type: &str) -> Result<(), AppError> {
        let response = self
            .http
            .put(signed_url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        ensure_success(response, "Failed to upload file")?;
        Ok(())
    }

    fn public_url(&self, file_name: &str) -> String {
        routes::content_url(&self.content_base, file_name)
    }

    async fn submit_job(&self, image_url: &str, user_id: &str) -> Result<GenerationJob, AppError> {
        let request_body = JobSubmitRequest::new(self.effect, image_url, user_id);

        let response = self
            .http
            .post(routes::image_gen_url(&self.api_base))
            .header(ACCEPT, JSON_ACCEPT)
            .json(&request_body)
            .send()
            .await?;

        let response = ensure_success(response, "Failed to submit job")?;
        let created: JobCreateResponse = response.json().await?;
        Ok(GenerationJob::new(created.job_id))
    }

    async fn fetch_job_status(&self, job_id: &str, user_id: &str) -> Result<JobStatusReport, AppError> {
        let response = self
            .http
            .get(routes::job_status_url(&self.api_base, user_id, job_id))
            .send()
            .await?;

        let response = ensure_success(response, "Failed to check status")?;
        Ok(response.json().await?)
    }

    async fn proxy_download(&self, url: &str) -> Result<Bytes, AppError> {
        let request = self
            .http
            .get(routes::download_proxy_url(&self.api_base))
            .query(&[("url", url)]);
        self.get_bytes(request, "Proxy failed").await
    }

    async fn direct_download(&self, url: &str) -> Result<Bytes, AppError> {
        self.get_bytes(self.http.get(url), "Direct fetch failed").await
    }

    fn poll_policy(&self) -> PollPolicy {
        self.policy
    }
}
