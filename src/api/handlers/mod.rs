//! HTTP request handlers.

pub mod import_handler;

pub use import_handler::import_routes;
