//! Service layer for Notemark.

pub mod composer;
pub mod notion_client;
pub mod settings_repository;
pub mod sync_engine;
pub mod tab_probe;
