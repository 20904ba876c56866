//! Dashboard stats and AI-assist endpoints.
//!
//! The AI endpoints are a stateless proxy: each tries the configured
//! generative provider and falls back to a deterministic mock, reporting
//! which one answered.

use actix_web::{HttpResponse, web};

use slate_core::domain::PostStatus;
use slate_core::ports::PostRepository;
use slate_shared::dto::{
    HashtagRequest, ImageAnalysisRequest, InsightRequest, PolishRequest, StatsResponse,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/analytics/stats
pub async fn post_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let published = state.posts.count_by_status(PostStatus::Published).await?;
    let pending = state.posts.count_by_status(PostStatus::Pending).await?;
    let failed = state.posts.count_by_status(PostStatus::Failed).await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        posts_published: published,
        posts_scheduled: pending,
        posts_failed: failed,
    }))
}

/// POST /api/analytics/ai/suggest_hashtags
pub async fn suggest_hashtags(
    state: web::Data<AppState>,
    body: web::Json<HashtagRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = state
        .assist
        .suggest_hashtags(req.gemini_key.as_deref(), &req.text)
        .await;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/analytics/ai/polish_content
pub async fn polish_content(
    state: web::Data<AppState>,
    body: web::Json<PolishRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = state
        .assist
        .polish_content(req.gemini_key.as_deref(), &req.text, req.tone.as_deref())
        .await;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/analytics/ai/dynamic_insight
pub async fn dynamic_insight(
    state: web::Data<AppState>,
    body: web::Json<InsightRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = state
        .assist
        .dynamic_insight(req.gemini_key.as_deref(), &req.post_counts)
        .await;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/analytics/ai/analyze_image
pub async fn analyze_image(
    state: web::Data<AppState>,
    body: web::Json<ImageAnalysisRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = state.assist.analyze_image(&req.image_path);
    Ok(HttpResponse::Ok().json(response))
}
