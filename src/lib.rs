//! Incremental scraper for Danish vehicle listings, synced to a
//! Supabase-style store keyed by listing identity.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod scrapers;
pub mod server;
pub mod store;
