use serde::{Deserialize, Serialize};
use vz_core::Effect;

/// Body of `POST /image-gen`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmitRequest {
    pub model: String,
    pub tool_type: String,
    pub effect_id: String,
    pub image_url: String,
    pub user_id: String,
    pub remove_watermark: bool,
    pub is_private: bool,
}

impl JobSubmitRequest {
    pub fn new(effect: Effect, image_url: &str, user_id: &str) -> Self {
        Self {
            model: effect.model().to_string(),
            tool_type: effect.tool_type().to_string(),
            effect_id: effect.id().to_string(),
            image_url: image_url.to_string(),
            user_id: user_id.to_string(),
            remove_watermark: true,
            is_private: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobCreateResponse {
    pub job_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
