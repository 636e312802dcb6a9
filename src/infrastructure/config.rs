use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    File,
    JsonServer,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// db.json location for the file backend.
    pub path: PathBuf,
    /// Base URL for the json-server backend.
    pub url: String,
    /// Fill an empty store with the sample dashboards on startup.
    pub seed: bool,
}

impl AppConfig {
    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }
}

/// Load `config/app` (any format the config crate knows), then `CHARTS__*`
/// environment overrides, e.g. `CHARTS__STORE__BACKEND=memory`.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    build_config(config::File::with_name("config/app").required(false))
}

fn build_config<S>(file: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("store.backend", "file")?
        .set_default("store.path", "db.json")?
        .set_default("store.url", "http://localhost:3001")?
        .set_default("store.seed", true)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("CHARTS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
