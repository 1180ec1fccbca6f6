//! Sheetfeed API Server module
//!
//! Publishes the snapshot feed over HTTP.
//! Run with `sheetfeed-server`.

pub mod handlers;
pub mod server;

pub use server::{create_router, run_api_server, AppState};
