use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::amount::Amount;

pub const CONFIG_FILE: &str = "roulette_config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigData {
    pub default_start_balance: Amount,
    pub ledger_file: PathBuf,
    pub log_channel: Option<u64>,
}

impl Default for ConfigData {
    fn default() -> Self {
        ConfigData {
            default_start_balance: Amount::from_units(100),
            ledger_file: PathBuf::from("roulette_ledger.json"),
            log_channel: None,
        }
    }
}

/// `ROULETTE_CONFIG` overrides the config file location.
pub fn config_path() -> PathBuf {
    std::env::var_os("ROULETTE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

impl ConfigData {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(ConfigData::default())
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigData::load(dir.path().join("nope.json")).await.unwrap();
        assert_eq!(config, ConfigData::default());
        assert_eq!(config.default_start_balance, Amount::from_units(100));
    }

    #[tokio::test]
    async fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_start_balance": 25000 }"#).await.unwrap();

        let config = ConfigData::load(&path).await.unwrap();
        assert_eq!(config.default_start_balance, Amount::from_units(250));
        assert_eq!(config.ledger_file, PathBuf::from("roulette_ledger.json"));
    }

    #[tokio::test]
    async fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = ConfigData {
            log_channel: Some(42),
            ..ConfigData::default()
        };
        config.save(&path).await.unwrap();
        assert_eq!(ConfigData::load(&path).await.unwrap(), config);
    }
}
