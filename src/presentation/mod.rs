// Presentation layer - HTTP routing, extractors and handlers
pub mod app_state;
pub mod extract;
pub mod handlers;
pub mod router;
