//! Platform-appropriate client construction.
//!
//! - **Web** (WASM + `web` feature): token in `localStorage` via [`store::LocalStorageTokenStore`]
//! - **Desktop / Mobile** (native): token file under the data dir via [`store::FileTokenStore`]
//!
//! Configuration comes from `waypoint.toml` in the platform config dir on native
//! builds. A `WAYPOINT_API_URL` set at compile time overrides the backend URL on
//! every platform.

use api::{Client, HttpClient};
use dioxus::prelude::*;
use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformTokens = store::LocalStorageTokenStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformTokens = store::MemoryTokenStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformTokens = store::FileTokenStore;

/// The client every view talks through.
pub type AppClient = Client<HttpClient, PlatformTokens>;

pub fn make_client(config: &ClientConfig) -> AppClient {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    let tokens = store::LocalStorageTokenStore::new();
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    let tokens = store::MemoryTokenStore::new();
    #[cfg(not(target_arch = "wasm32"))]
    let tokens = store::FileTokenStore::default_location();

    Client::new(HttpClient::from_config(config), tokens)
}

/// Load the client configuration, falling back to defaults.
pub fn load_config() -> ClientConfig {
    let mut config = read_config_file().unwrap_or_default();
    if let Some(url) = option_env!("WAYPOINT_API_URL") {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    tracing::info!(base_url = %config.api.base_url, "Using backend");
    config
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> Option<ClientConfig> {
    let path = dirs::config_dir()?
        .join("waypoint")
        .join(ClientConfig::filename());
    let content = std::fs::read_to_string(&path).ok()?;
    match ClientConfig::from_toml(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!("Ignoring invalid {}: {e}", path.display());
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_file() -> Option<ClientConfig> {
    None
}

pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// Sleep on the platform's timer.
pub async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
