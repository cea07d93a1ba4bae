use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebhookSubscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebhookSubscriptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WebhookSubscriptions::EndpointUrl)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebhookSubscriptions::Secret).text())
                    .col(
                        ColumnDef::new(WebhookSubscriptions::Topic)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WebhookSubscriptions::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(WebhookSubscriptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WebhookSubscriptions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Subscriber resolution filters on (topic, enabled).
        manager
            .create_index(
                Index::create()
                    .table(WebhookSubscriptions::Table)
                    .col(WebhookSubscriptions::Topic)
                    .col(WebhookSubscriptions::Enabled)
                    .name("idx_webhook_subscriptions_topic_enabled")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebhookSubscriptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WebhookSubscriptions {
    Table,
    Id,
    EndpointUrl,
    Secret,
    Topic,
    Enabled,
    CreatedAt,
    UpdatedAt,
}
