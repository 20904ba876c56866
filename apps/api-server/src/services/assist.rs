//! Generative-AI assist client with deterministic mock fallback.
//!
//! Every operation first tries the Gemini `generateContent` REST endpoint
//! (when a key is available) and answers from a mock otherwise, so the API
//! works out of the box without credentials. Responses always say which
//! source produced them.

use serde::Deserialize;
use thiserror::Error;

use slate_shared::dto::{
    AssistSource, HashtagResponse, ImageAnalysisResponse, InsightResponse, PolishResponse,
    PostCounts,
};

const MODEL_NAME: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
enum AssistError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    Provider(reqwest::StatusCode),

    #[error("provider returned no text candidates")]
    Empty,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Stateless client for the AI-assist endpoints.
pub struct AssistClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl AssistClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Per-request key wins over the configured one; empty strings count as
    /// absent.
    fn resolve_key<'a>(&'a self, override_key: Option<&'a str>) -> Option<&'a str> {
        override_key
            .filter(|k| !k.is_empty())
            .or(self.api_key.as_deref())
    }

    /// Run `prompt` against Gemini; `None` means "use the mock".
    async fn generate(&self, override_key: Option<&str>, prompt: &str) -> Option<String> {
        let key = self.resolve_key(override_key)?;

        match self.call_gemini(key, prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "Gemini call failed, executing mock fallback");
                None
            }
        }
    }

    async fn call_gemini(&self, key: &str, prompt: &str) -> Result<String, AssistError> {
        let url = format!("{API_BASE}/{MODEL_NAME}:generateContent");
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistError::Provider(response.status()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.text)
            .map(|t| t.trim().to_string())
            .ok_or(AssistError::Empty)
    }

    /// Suggest hashtags for a post text.
    pub async fn suggest_hashtags(&self, key: Option<&str>, text: &str) -> HashtagResponse {
        let prompt = format!(
            "Suggest 5 highly-relevant, trending hashtags for the following \
             social-media post. Return only the hashtags, separated by spaces, \
             no extra text.\n\nPost: {text}"
        );

        match self.generate(key, &prompt).await {
            Some(answer) => HashtagResponse {
                suggestions: answer.split_whitespace().map(str::to_string).collect(),
                source: AssistSource::Gemini,
            },
            None => HashtagResponse {
                suggestions: mock_hashtags(text),
                source: AssistSource::Mock,
            },
        }
    }

    /// Rewrite post text in the requested tone.
    pub async fn polish_content(
        &self,
        key: Option<&str>,
        text: &str,
        tone: Option<&str>,
    ) -> PolishResponse {
        let tone = tone.unwrap_or("neutral");
        let prompt = format!(
            "Rewrite the following social media post text in a single paragraph \
             using a {tone} tone. The original text is: '{text}'"
        );

        match self.generate(key, &prompt).await {
            Some(answer) => PolishResponse {
                polished_text: answer,
                source: AssistSource::Gemini,
            },
            None => PolishResponse {
                polished_text: mock_polish(text, tone),
                source: AssistSource::Mock,
            },
        }
    }

    /// Produce one actionable recommendation from scheduling stats.
    pub async fn dynamic_insight(&self, key: Option<&str>, counts: &PostCounts) -> InsightResponse {
        let prompt = format!(
            "Analyze these social media scheduling statistics (Published: {}, \
             Scheduled: {}, Failed: {}) and provide one actionable, high-value \
             recommendation for the user. Be concise and bold the most \
             important part.",
            counts.published, counts.scheduled, counts.failed
        );

        match self.generate(key, &prompt).await {
            Some(answer) => InsightResponse {
                insight: answer,
                source: AssistSource::Gemini,
            },
            None => InsightResponse {
                insight: mock_insight(counts),
                source: AssistSource::Mock,
            },
        }
    }

    /// Vision placeholder - always answers from the mock, no file I/O here.
    pub fn analyze_image(&self, _image_path: &str) -> ImageAnalysisResponse {
        ImageAnalysisResponse {
            caption: "Mock Vision Result: This is a placeholder for a multi-modal \
                      analysis. The image appears to be a promotional asset."
                .to_string(),
            source: AssistSource::Mock,
        }
    }
}

fn mock_hashtags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    if lower.contains("coffee") || lower.contains("morning") {
        tags.extend(["#MorningCoffee", "#CoffeeTime", "#Brew"].map(String::from));
    }
    if lower.contains("coding") || lower.contains("rust") {
        tags.extend(["#CodingLife", "#RustLang", "#WebDev"].map(String::from));
    }
    if tags.is_empty() {
        tags.extend(["#SocialMedia", "#Scheduled"].map(String::from));
    }

    tags.truncate(5);
    tags
}

fn mock_polish(text: &str, tone: &str) -> String {
    match tone {
        "professional" => {
            format!("Mock Result: Deployed the latest update. Fully operational. ({text})")
        }
        "humorous" => format!(
            "Mock Result: Update dropped. Everything should work unless the cat interfered. ({text})"
        ),
        _ => format!("Mock Result: Update deployed: System live. ({text})"),
    }
}

fn mock_insight(counts: &PostCounts) -> String {
    if counts.failed > 0 {
        format!(
            "Mock Insight: **URGENT:** You have {} failed posts. Check social tokens immediately!",
            counts.failed
        )
    } else {
        "Mock Insight: Data is still accumulating. Schedule more posts for advanced insights."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_client() -> AssistClient {
        AssistClient::new(None)
    }

    #[tokio::test]
    async fn hashtags_fall_back_to_mock_without_key() {
        let response = keyless_client()
            .suggest_hashtags(None, "Morning coffee and coding")
            .await;

        assert_eq!(response.source, AssistSource::Mock);
        assert!(response.suggestions.contains(&"#MorningCoffee".to_string()));
        assert!(response.suggestions.contains(&"#CodingLife".to_string()));
        assert!(response.suggestions.len() <= 5);
    }

    #[tokio::test]
    async fn polish_is_tone_directed() {
        let client = keyless_client();

        let pro = client
            .polish_content(None, "update shipped", Some("professional"))
            .await;
        assert_eq!(pro.source, AssistSource::Mock);
        assert!(pro.polished_text.contains("Fully operational"));

        let fun = client
            .polish_content(None, "update shipped", Some("humorous"))
            .await;
        assert!(fun.polished_text.contains("cat"));
    }

    #[tokio::test]
    async fn insight_flags_failed_posts() {
        let client = keyless_client();

        let urgent = client
            .dynamic_insight(
                None,
                &PostCounts {
                    published: 10,
                    scheduled: 2,
                    failed: 3,
                },
            )
            .await;
        assert!(urgent.insight.contains("URGENT"));

        let calm = client.dynamic_insight(None, &PostCounts::default()).await;
        assert!(!calm.insight.contains("URGENT"));
    }

    #[test]
    fn empty_override_key_does_not_shadow_config() {
        let client = AssistClient::new(Some("configured".to_string()));
        assert_eq!(client.resolve_key(Some("")), Some("configured"));
        assert_eq!(client.resolve_key(Some("per-request")), Some("per-request"));
        assert_eq!(keyless_client().resolve_key(None), None);
    }
}
