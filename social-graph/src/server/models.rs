// Request and response bodies for the HTTP API
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub status: &'static str,
}
