//! "On this day" history of an Instagram account
//!
//! - Feed sync (full backfill and latest page) in `sync/`
//! - PostgreSQL models and queries in `db/`
//! - HTTP routes in `endpoints/`, HTML page in `render`
//! - Requires DATABASE_URL and API_TOKEN env vars

pub mod config;
pub mod db;
pub mod endpoints;
pub mod history;
pub mod render;
pub mod state;
pub mod sync;
