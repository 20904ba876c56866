//! Scheduled post entity for SeaORM.
//!
//! `scheduled_time` is persisted as a naive timestamp that is always UTC;
//! the offset is attached/stripped only in the conversions below, so the
//! due-query comparison stays exact regardless of server timezone.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use slate_core::domain::PostStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scheduled_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text_content: String,
    pub image_path: Option<String>,
    /// Comma-joined platform names; split back into a list at the boundary.
    pub platforms: String,
    /// Naive UTC timestamp.
    pub scheduled_time: DateTime,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn split_platforms(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for slate_core::domain::Post {
    fn from(model: Model) -> Self {
        let status = model.status.parse::<PostStatus>().unwrap_or_else(|e| {
            tracing::warn!(post_id = %model.id, error = %e, "Unknown stored status, treating as pending");
            PostStatus::Pending
        });

        Self {
            id: model.id,
            text_content: model.text_content,
            image_path: model.image_path,
            platforms: split_platforms(&model.platforms),
            scheduled_time: model.scheduled_time.and_utc(),
            status,
            created_at: model.created_at.and_utc(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<slate_core::domain::Post> for ActiveModel {
    fn from(post: slate_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            text_content: Set(post.text_content),
            image_path: Set(post.image_path),
            platforms: Set(post.platforms.join(", ")),
            scheduled_time: Set(post.scheduled_time.naive_utc()),
            status: Set(post.status.as_str().to_string()),
            created_at: Set(post.created_at.naive_utc()),
        }
    }
}
