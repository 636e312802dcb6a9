// Application layer - Store port, repository and use cases
pub mod chart_data_binding;
pub mod chart_editor;
pub mod chart_service;
pub mod dashboard_service;
pub mod error;
pub mod reorder;
pub mod repository;
pub mod session;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod test_support;
