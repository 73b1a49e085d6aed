//! HTTP request handlers for the web server.

mod api;
mod pages;
mod static_files;

// Re-export handlers for use by the router
pub use api::{api_day, api_days, api_entry, api_reload, api_search, health};
pub use pages::{day_page, home};
pub use static_files::{serve_css, serve_js};
