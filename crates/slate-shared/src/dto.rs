//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to schedule a new post.
///
/// The optional image travels inline as base64; the server stores it and
/// keeps only the resulting path on the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub text_content: String,
    pub platforms: Vec<String>,
    /// RFC 3339 timestamp; normalized to UTC on the server.
    pub scheduled_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    /// Original filename, used only for its extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
}

/// A scheduled post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub text_content: String,
    pub image_path: Option<String>,
    pub platforms: Vec<String>,
    /// ISO-8601 UTC string.
    pub scheduled_time: String,
    pub status: String,
    pub created_at: String,
}

/// Dashboard counts by status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub posts_published: u64,
    pub posts_scheduled: u64,
    pub posts_failed: u64,
}

/// Where an AI-assist answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistSource {
    Gemini,
    Mock,
}

/// Request for hashtag suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagRequest {
    /// Per-request provider key, overriding the server configuration.
    #[serde(default)]
    pub gemini_key: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagResponse {
    pub suggestions: Vec<String>,
    pub source: AssistSource,
}

/// Request to rewrite post text in a given tone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolishRequest {
    #[serde(default)]
    pub gemini_key: Option<String>,
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolishResponse {
    pub polished_text: String,
    pub source: AssistSource,
}

/// Scheduling statistics driving an insight request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCounts {
    #[serde(default)]
    pub published: u64,
    #[serde(default)]
    pub scheduled: u64,
    #[serde(default)]
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub gemini_key: Option<String>,
    pub post_counts: PostCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResponse {
    pub insight: String,
    pub source: AssistSource,
}

/// Request for (placeholder) image analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysisRequest {
    #[serde(default)]
    pub gemini_key: Option<String>,
    pub image_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysisResponse {
    pub caption: String,
    pub source: AssistSource,
}
