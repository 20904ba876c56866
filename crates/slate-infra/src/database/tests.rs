#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use slate_core::domain::{Post, PostStatus};
    use slate_core::ports::{BaseRepository, PostRepository, StatusWrite};

    fn pending_model(id: uuid::Uuid) -> post::Model {
        let now = Utc::now().naive_utc();
        post::Model {
            id,
            text_content: "Launch day!".to_owned(),
            image_path: Some("static/posts/launch.png".to_owned()),
            platforms: "twitter, instagram".to_owned(),
            scheduled_time: now - Duration::minutes(1),
            status: "pending".to_owned(),
            created_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pending_model(post_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, post_id);
        assert_eq!(found.status, PostStatus::Pending);
        // Comma-joined column comes back as a list.
        assert_eq!(found.platforms, vec!["twitter", "instagram"]);
    }

    #[tokio::test]
    async fn test_find_due_maps_rows() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![pending_model(post_id)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let due = repo.find_due(Utc::now()).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, post_id);
        assert!(due[0].is_eligible(Utc::now()));
    }

    #[tokio::test]
    async fn test_update_status_reports_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update_status(uuid::Uuid::new_v4(), PostStatus::Published)
            .await
            .unwrap();
        assert_eq!(result, StatusWrite::Updated);
    }

    #[tokio::test]
    async fn test_update_status_reports_conflict_when_row_gone() {
        // rows_affected = 0 means the `status = pending` guard filtered the
        // row out - a concurrent job already transitioned it.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update_status(uuid::Uuid::new_v4(), PostStatus::Failed)
            .await
            .unwrap();
        assert_eq!(result, StatusWrite::Conflict);
    }
}
