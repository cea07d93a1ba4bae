use sea_orm_migration::prelude::*;

mod m20260115_000001_create_webhook_subscriptions;
mod m20260115_000002_create_webhook_delivery_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_webhook_subscriptions::Migration),
            Box::new(m20260115_000002_create_webhook_delivery_logs::Migration),
        ]
    }
}
