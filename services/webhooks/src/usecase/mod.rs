pub mod delivery;
pub mod dispatch;
pub mod subscription;
