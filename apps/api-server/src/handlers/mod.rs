//! HTTP handlers and route configuration.

mod analytics;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Scheduled posts
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts)),
            )
            // Dashboard stats and AI assistance
            .service(
                web::scope("/analytics")
                    .route("/stats", web::get().to(analytics::post_stats))
                    .route(
                        "/ai/suggest_hashtags",
                        web::post().to(analytics::suggest_hashtags),
                    )
                    .route(
                        "/ai/polish_content",
                        web::post().to(analytics::polish_content),
                    )
                    .route(
                        "/ai/dynamic_insight",
                        web::post().to(analytics::dynamic_insight),
                    )
                    .route("/ai/analyze_image", web::post().to(analytics::analyze_image)),
            ),
    );
}
