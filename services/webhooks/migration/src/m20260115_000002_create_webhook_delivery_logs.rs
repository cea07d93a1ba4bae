use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WebhookDeliveryLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::SubscriptionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::Success)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebhookDeliveryLogs::StatusCode).integer())
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::RequestBody)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WebhookDeliveryLogs::ResponseBody).text())
                    .col(ColumnDef::new(WebhookDeliveryLogs::ErrorMessage).text())
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::AttemptNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(WebhookDeliveryLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                WebhookDeliveryLogs::Table,
                                WebhookDeliveryLogs::SubscriptionId,
                            )
                            .to(WebhookSubscriptions::Table, WebhookSubscriptions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(WebhookDeliveryLogs::Table)
                    .col(WebhookDeliveryLogs::SubscriptionId)
                    .col(WebhookDeliveryLogs::CreatedAt)
                    .name("idx_webhook_delivery_logs_subscription_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebhookDeliveryLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum WebhookDeliveryLogs {
    Table,
    Id,
    SubscriptionId,
    Success,
    StatusCode,
    RequestBody,
    ResponseBody,
    ErrorMessage,
    AttemptNumber,
    CreatedAt,
}

#[derive(Iden)]
enum WebhookSubscriptions {
    Table,
    Id,
}
