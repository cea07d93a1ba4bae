pub mod delivery;
pub mod dispatch;
pub mod health;
pub mod subscription;
