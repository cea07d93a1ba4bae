use sea_orm_migration::prelude::*;

use franquia_webhooks_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
