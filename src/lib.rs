// Chart dashboard service - dashboards, charts and their data over a JSON collection store
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
