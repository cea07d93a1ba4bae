use sea_orm::entity::prelude::*;

/// A registered destination for dispatched events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "webhook_subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub endpoint_url: String,
    /// Shared secret used to sign outbound payloads. `NULL` disables signing.
    pub secret: Option<String>,
    /// Event topic, or `generic` to receive every topic.
    pub topic: String,
    pub enabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::webhook_delivery_logs::Entity")]
    DeliveryLogs,
}

impl Related<super::webhook_delivery_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
