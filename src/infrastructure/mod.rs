// Infrastructure layer - Store adapters, configuration and response envelopes
pub mod collections;
pub mod config;
pub mod http_response;
pub mod json_file_store;
pub mod json_server_store;
pub mod memory_store;
pub mod seed;
