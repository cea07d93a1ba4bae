use sea_orm::DatabaseConnection;

use crate::domain::signing::SignatureScheme;
use crate::infra::db::{DbDeliveryLogRepository, DbSubscriptionRepository};
use crate::infra::http::ReqwestWebhookSender;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sender: ReqwestWebhookSender,
    pub signature_scheme: SignatureScheme,
}

impl AppState {
    pub fn subscription_repo(&self) -> DbSubscriptionRepository {
        DbSubscriptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn delivery_log_repo(&self) -> DbDeliveryLogRepository {
        DbDeliveryLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn webhook_sender(&self) -> ReqwestWebhookSender {
        self.sender.clone()
    }
}
