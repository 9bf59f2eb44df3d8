use std::path::PathBuf;

pub use spendwise_config::{Config, ConfigError, ConfigManager, DashboardRange};

use crate::utils::paths::app_data_dir;

pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(app_data_dir())
}

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}
