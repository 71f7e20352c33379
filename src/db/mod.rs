pub mod activity_repository;
pub mod board_repository;
pub mod category_repository;
pub mod models;
pub mod repository;
pub mod settings_repository;

#[cfg(feature = "ssr")]
pub mod memory;
