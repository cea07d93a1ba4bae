pub mod repository;
pub mod signing;
pub mod types;
