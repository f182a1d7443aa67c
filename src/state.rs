use std::sync::Arc;

use crate::config::{AppConfig, ConfigError};
use crate::db::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> Result<Self, ConfigError> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Store::new(&config);
        Ok(Self { store, config })
    }
}
