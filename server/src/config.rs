use crate::assets::AssetStore;
use crate::db::VideoStore;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,
    #[serde(default = "default_max_request_body")]
    pub max_request_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8091
}

fn default_assets_root() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_max_request_body() -> usize {
    32 << 20 // 32 MiB, room for a full thumbnail plus multipart framing
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok(); // Load .env file if present
        envy::from_env::<Config>()
    }

    pub fn server_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }
}

/// Dependencies shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub videos: Arc<dyn VideoStore>,
    pub assets: AssetStore,
}

impl AppState {
    pub fn new(config: Config, videos: Arc<dyn VideoStore>) -> Self {
        let assets = AssetStore::new(config.assets_root.clone());
        AppState {
            config: Arc::new(config),
            videos,
            assets,
        }
    }
}
