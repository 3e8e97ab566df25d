//! Outbound integrations: catalog API client, loader and runtime config.

pub mod api;
pub mod config;
pub mod fallback;
pub mod loader;
