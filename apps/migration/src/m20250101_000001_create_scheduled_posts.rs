use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScheduledPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledPosts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledPosts::TextContent).text().not_null())
                    .col(ColumnDef::new(ScheduledPosts::ImagePath).string())
                    .col(ColumnDef::new(ScheduledPosts::Platforms).string().not_null())
                    // Naive UTC timestamp; the application layer owns the
                    // normalization.
                    .col(
                        ColumnDef::new(ScheduledPosts::ScheduledTime)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPosts::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ScheduledPosts::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The due-post scan filters on status and scheduled_time every tick.
        manager
            .create_index(
                Index::create()
                    .name("idx-scheduled_posts-status")
                    .table(ScheduledPosts::Table)
                    .col(ScheduledPosts::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-scheduled_posts-scheduled_time")
                    .table(ScheduledPosts::Table)
                    .col(ScheduledPosts::ScheduledTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScheduledPosts {
    Table,
    Id,
    TextContent,
    ImagePath,
    Platforms,
    ScheduledTime,
    Status,
    CreatedAt,
}
