use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::{DeliveryLogRepository, SubscriptionRepository};
use crate::domain::types::DeliveryAttempt;
use crate::error::WebhooksServiceError;

pub struct ListDeliveriesUseCase<S: SubscriptionRepository, L: DeliveryLogRepository> {
    pub subscriptions: S,
    pub logs: L,
}

impl<S: SubscriptionRepository, L: DeliveryLogRepository> ListDeliveriesUseCase<S, L> {
    pub async fn execute(
        &self,
        subscription_id: Uuid,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<DeliveryAttempt>, WebhooksServiceError> {
        if self.subscriptions.find_by_id(subscription_id).await?.is_none() {
            return Err(WebhooksServiceError::SubscriptionNotFound);
        }
        self.logs
            .list_by_subscription(subscription_id, sort, page.clamped())
            .await
    }
}
