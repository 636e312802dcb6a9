// Domain layer - Entities and pure rules, no I/O
pub mod chart;
pub mod chart_data;
pub mod dashboard;
pub mod endpoint;
pub mod ids;
