//! 应用配置持久化

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{kiki_dir, load_toml, save_toml};
use crate::api::DEFAULT_BASE_URL;
use crate::error::KikiError;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// 远程服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 单次请求超时（秒），不设置则不超时
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 主题配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Dark".to_string(),
        }
    }
}

/// 界面配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Toast 显示时长（秒）
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

fn default_toast_secs() -> u64 {
    2
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_secs: default_toast_secs(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    kiki_dir().join("config.toml")
}

/// 加载配置（不存在时返回默认值，无法解析时返回错误）
pub fn load_config() -> crate::error::Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> crate::error::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    load_toml(path)
}

/// Base URL precedence: flag > `KIKI_API_URL` > config file > default.
/// Blank values are skipped; the winner must be an http(s) URL.
pub fn resolve_base_url(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
) -> crate::error::Result<String> {
    let url = [flag, env, Some(config.api.base_url.as_str())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(KikiError::config(format!(
            "base URL must start with http:// or https://, got {:?}",
            url
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.theme.name, "Dark");
        assert_eq!(config.ui.toast_secs, 2);
        assert!(config.api.timeout().is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.theme.name, "Dark");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[[").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(KikiError::TomlParse(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.theme.name = "Nord".to_string();
        config.api.base_url = "https://todo.example.com/api".to_string();
        save_toml(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_resolve_base_url_precedence() {
        let mut config = Config::default();
        config.api.base_url = "http://from-config".to_string();

        let resolve = |flag, env| resolve_base_url(flag, env, &config).unwrap();
        assert_eq!(resolve(Some("http://flag"), Some("http://env")), "http://flag");
        assert_eq!(resolve(None, Some("http://env")), "http://env");
        assert_eq!(resolve(Some(""), Some("http://env")), "http://env");
        assert_eq!(resolve(None, None), "http://from-config");
        assert_eq!(resolve(None, Some("  ")), "http://from-config");
    }

    #[test]
    fn test_resolve_base_url_blank_config_uses_default() {
        let mut config = Config::default();
        config.api.base_url = "  ".to_string();
        assert_eq!(
            resolve_base_url(None, None, &config).unwrap(),
            DEFAULT_BASE_URL
        );
        assert_eq!(
            resolve_base_url(Some(""), Some(""), &config).unwrap(),
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_resolve_base_url_rejects_bad_scheme() {
        let config = Config::default();
        let err = resolve_base_url(Some("localhost:8000"), None, &config).unwrap_err();
        assert!(matches!(err, KikiError::Config(_)));
    }
}
