//! User settings for the widgets
//!
//! Stored as JSON in `<config_dir>/repopulse/settings.json`. A missing file
//! means defaults; a broken file is an error the widget logs and then
//! ignores.

use crate::error::{CoreError, Result};
use crate::i18n::DEFAULT_LOCALE;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

/// Widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Message catalog locale (e.g. "en", "zh_CN")
    pub locale: String,
    /// Theme override; `None` follows the host page
    pub theme: Option<Theme>,
    pub star_popup_enabled: bool,
    pub influence_chart_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            theme: None,
            star_popup_enabled: true,
            influence_chart_enabled: true,
        }
    }
}

/// Source of [`Settings`]
pub trait SettingsSource: Send + Sync + 'static {
    fn load_settings(&self) -> impl Future<Output = Result<Settings>> + Send;
}

/// Settings backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/repopulse/settings.json`, if the platform has a config dir
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("repopulse").join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist settings, creating parent directories
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(settings).map_err(|source| {
            CoreError::SettingsParse {
                path: self.path.clone(),
                source,
            }
        })?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

impl SettingsSource for FileSettings {
    async fn load_settings(&self) -> Result<Settings> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(CoreError::SettingsRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| CoreError::SettingsParse {
            path: self.path.clone(),
            source,
        })
    }
}

/// Fixed settings, for callers that already resolved them
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub Settings);

impl SettingsSource for StaticSettings {
    async fn load_settings(&self) -> Result<Settings> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let source = FileSettings::new(dir.path().join("absent.json"));
        let settings = source.load_settings().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"locale": "zh_CN", "theme": "dark"}"#).unwrap();

        let settings = FileSettings::new(&path).load_settings().await.unwrap();
        assert_eq!(settings.locale, "zh_CN");
        assert_eq!(settings.theme, Some(Theme::Dark));
        assert!(settings.star_popup_enabled);
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ locale: ").unwrap();

        let result = FileSettings::new(&path).load_settings().await;
        assert!(matches!(result, Err(CoreError::SettingsParse { .. })));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let source = FileSettings::new(dir.path().join("nested").join(SETTINGS_FILE));
        let settings = Settings {
            locale: "zh_CN".to_string(),
            theme: Some(Theme::Light),
            star_popup_enabled: false,
            influence_chart_enabled: true,
        };

        source.save(&settings).await.unwrap();
        assert_eq!(source.load_settings().await.unwrap(), settings);
    }
}
