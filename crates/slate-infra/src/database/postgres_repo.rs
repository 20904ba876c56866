//! PostgreSQL repository implementation for scheduled posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use slate_core::domain::{Post, PostStatus};
use slate_core::error::RepoError;
use slate_core::ports::{PostRepository, StatusWrite};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        // Stored timestamps are naive UTC, so compare against the naive form
        // of `now` - never against a zone-shifted value.
        let result = PostEntity::find()
            .filter(post::Column::Status.eq(PostStatus::Pending.as_str()))
            .filter(post::Column::ScheduledTime.lte(now.naive_utc()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_status(&self, status: PostStatus) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn update_status(&self, id: Uuid, status: PostStatus) -> Result<StatusWrite, RepoError> {
        // Single conditional UPDATE: the `status = pending` filter is the
        // row-level guard against a concurrent transition.
        let result = PostEntity::update_many()
            .col_expr(post::Column::Status, Expr::value(status.as_str()))
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::Status.eq(PostStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            Ok(StatusWrite::Conflict)
        } else {
            Ok(StatusWrite::Updated)
        }
    }
}
