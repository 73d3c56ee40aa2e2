use crate::error::{FinderError, Result};
use opportunity_common::location::{LocationKeys, GEOCODE_URL};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "opportunity-finder";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub collection: String,
    pub geocode_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub coords_key: String,
    pub label_key: String,
}

impl Default for Config {
    fn default() -> Self {
        let keys = LocationKeys::default();
        Self {
            project_id: None,
            api_key: None,
            collection: "opportunities".into(),
            geocode_url: GEOCODE_URL.into(),
            // Nominatimの利用規約でUser-Agentが必須
            user_agent: concat!("opportunity-finder/", env!("CARGO_PKG_VERSION")).into(),
            timeout_seconds: 30,
            coords_key: keys.coords,
            label_key: keys.label,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FinderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join(APP_DIR))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 現在地の保存先
    pub fn location_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("location.json"))
    }

    /// 環境変数を優先
    pub fn project_id(&self) -> Result<String> {
        if let Ok(project) = std::env::var("OPPORTUNITY_FIRESTORE_PROJECT") {
            if !project.trim().is_empty() {
                return Ok(project.trim().to_string());
            }
        }

        self.project_id
            .clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or(FinderError::MissingProject)
    }

    pub fn api_key(&self) -> Option<String> {
        std::env::var("OPPORTUNITY_FIRESTORE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn location_keys(&self) -> LocationKeys {
        LocationKeys {
            coords: self.coords_key.clone(),
            label: self.label_key.clone(),
        }
    }
}
