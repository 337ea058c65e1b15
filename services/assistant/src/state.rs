use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::provider::FineTuneGateway;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub gateway: Arc<dyn FineTuneGateway>,
    /// Held for a whole preprocess run; the dataset file has a single location.
    pub scan_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn FineTuneGateway>) -> Self {
        Self {
            config,
            gateway,
            scan_lock: Mutex::new(()),
        }
    }
}
