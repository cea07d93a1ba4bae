use serde_json::json;
use uuid::Uuid;

use franquia_domain::pagination::{PageRequest, Sort};
use franquia_webhooks::domain::types::{DeliveryAttempt, GENERIC_TOPIC, WebhookResponse};
use franquia_webhooks::error::WebhooksServiceError;
use franquia_webhooks::usecase::delivery::ListDeliveriesUseCase;

use crate::helpers::{MockDeliveryLogRepo, MockSubscriptionRepo, test_subscription};

fn attempt(subscription_id: Uuid, status: u16) -> DeliveryAttempt {
    let outcome = Ok(WebhookResponse {
        status,
        body: String::new(),
    });
    DeliveryAttempt::settled(subscription_id, json!({"status": status}), &outcome)
}

#[tokio::test]
async fn should_list_newest_deliveries_first() {
    let subscription = test_subscription("https://a.example/hook", GENERIC_TOPIC);
    let logs = MockDeliveryLogRepo::new();
    {
        let mut attempts = logs.attempts.lock().unwrap();
        attempts.push(attempt(subscription.id, 500));
        attempts.push(attempt(subscription.id, 200));
        attempts.push(attempt(Uuid::now_v7(), 200));
    }
    let uc = ListDeliveriesUseCase {
        subscriptions: MockSubscriptionRepo::new(vec![subscription.clone()]),
        logs,
    };

    let rows = uc
        .execute(subscription.id, Sort::Desc, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].status_code, Some(200));
    assert_eq!(rows[1].status_code, Some(500));
}

#[tokio::test]
async fn should_page_deliveries() {
    let subscription = test_subscription("https://a.example/hook", GENERIC_TOPIC);
    let logs = MockDeliveryLogRepo::new();
    {
        let mut attempts = logs.attempts.lock().unwrap();
        for status in [200, 201, 202] {
            attempts.push(attempt(subscription.id, status));
        }
    }
    let uc = ListDeliveriesUseCase {
        subscriptions: MockSubscriptionRepo::new(vec![subscription.clone()]),
        logs,
    };

    let rows = uc
        .execute(
            subscription.id,
            Sort::Asc,
            PageRequest {
                per_page: 2,
                page: 2,
            },
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status_code, Some(202));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_subscription() {
    let uc = ListDeliveriesUseCase {
        subscriptions: MockSubscriptionRepo::new(vec![]),
        logs: MockDeliveryLogRepo::new(),
    };

    let result = uc
        .execute(Uuid::now_v7(), Sort::Desc, PageRequest::default())
        .await;

    assert!(matches!(
        result,
        Err(WebhooksServiceError::SubscriptionNotFound)
    ));
}
