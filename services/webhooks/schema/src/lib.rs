pub mod webhook_delivery_logs;
pub mod webhook_subscriptions;
