use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".spendwise";

/// Application directory holding `config/config.json`; `SPENDWISE_HOME` overrides `~/.spendwise`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SPENDWISE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
