//! Scheduled post endpoints.

use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use uuid::Uuid;

use slate_core::domain::Post;
use slate_core::ports::{BaseRepository, PostRepository};
use slate_shared::dto::{CreatePostRequest, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// POST /api/posts
///
/// Creates a post in `pending` state; the background scheduler picks it up
/// once its scheduled time has passed.
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if req.text_content.trim().is_empty() {
        return Err(AppError::BadRequest("Post text must not be empty".to_string()));
    }
    let platforms: Vec<String> = req
        .platforms
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    if platforms.is_empty() {
        return Err(AppError::BadRequest(
            "At least one target platform is required".to_string(),
        ));
    }

    let image_path = match &req.image_base64 {
        Some(data) => Some(store_image(&state.media_dir, data, req.image_filename.as_deref()).await?),
        None => None,
    };

    // `scheduled_time` arrived RFC 3339 and is already UTC-normalized here;
    // the store strips the offset at the entity boundary.
    let post = Post::new(req.text_content, image_path, platforms, req.scheduled_time);
    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, scheduled_time = %saved.scheduled_time, "Post scheduled");
    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        text_content: post.text_content,
        image_path: post.image_path,
        platforms: post.platforms,
        scheduled_time: post.scheduled_time.to_rfc3339(),
        status: post.status.to_string(),
        created_at: post.created_at.to_rfc3339(),
    }
}

/// Decode an inline base64 image and write it under a unique name.
async fn store_image(
    media_dir: &str,
    data: &str,
    filename: Option<&str>,
) -> Result<String, AppError> {
    let extension = filename
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "png".to_string());

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::BadRequest(
            "Only JPEG, PNG, or WebP images are allowed".to_string(),
        ));
    }

    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 image payload: {e}")))?;

    tokio::fs::create_dir_all(media_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Cannot create media dir: {e}")))?;

    // Unique name to prevent overwrites
    let path = format!("{}/{}.{}", media_dir.trim_end_matches('/'), Uuid::new_v4(), extension);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Cannot write image: {e}")))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use slate_core::domain::PostStatus;

    #[test]
    fn response_serializes_utc_iso8601() {
        let post = Post::new(
            "hello".to_string(),
            Some("static/posts/img.png".to_string()),
            vec!["twitter".to_string()],
            Utc::now(),
        );
        let response = to_response(post.clone());

        assert_eq!(response.id, post.id.to_string());
        assert_eq!(response.status, PostStatus::Pending.to_string());
        assert!(response.scheduled_time.ends_with("+00:00"));
    }

    #[tokio::test]
    async fn store_image_rejects_unknown_extension() {
        let result = store_image("/tmp/slate-test-media", "aGVsbG8=", Some("photo.gif")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn store_image_rejects_bad_base64() {
        let result = store_image("/tmp/slate-test-media", "not-base64!!!", Some("photo.png")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn store_image_writes_unique_file() {
        let dir = "/tmp/slate-test-media";
        let path = store_image(dir, "aGVsbG8=", Some("photo.png")).await.unwrap();
        assert!(path.starts_with(dir));
        assert!(path.ends_with(".png"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");
        tokio::fs::remove_file(&path).await.ok();
    }
}
