//! 程序配置
//!
//! 配置只在启动时加载一次，之后以只读方式传入各个组件。
//! API 密钥优先取环境变量，其次取 secrets 文件（`[api]` 段的 `GEMINI_API_KEY`）。

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// secrets 文件路径
    pub secrets_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("llm_api_key", &"***")
            .field("llm_api_base_url", &self.llm_api_base_url)
            .field("llm_model_name", &self.llm_model_name)
            .field("secrets_file", &self.secrets_file)
            .field("verbose_logging", &self.verbose_logging)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-pro".to_string(),
            secrets_file: ".streamlit/secrets.toml".to_string(),
            verbose_logging: false,
        }
    }
}

/// secrets 文件结构
#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    api: ApiSecrets,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSecrets {
    #[serde(rename = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

impl Config {
    /// 从环境变量读取配置（API 密钥可能仍为空，需要再调用 [`Config::resolve_api_key`]）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 使用自定义的变量查找函数读取配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default = Self::default();
        let verbose_logging = match lookup("VERBOSE_LOGGING") {
            Some(value) => parse_bool("VERBOSE_LOGGING", &value)?,
            None => default.verbose_logging,
        };

        Ok(Self {
            llm_api_key: lookup("GEMINI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .or_else(|| lookup("LLM_API_KEY"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            secrets_file: lookup("SECRETS_FILE").unwrap_or(default.secrets_file),
            verbose_logging,
        })
    }

    /// 确保 API 密钥可用
    ///
    /// 环境变量中没有密钥时读取 secrets 文件；文件不存在视为没有密钥，
    /// 文件存在但无法解析则直接报错。
    pub fn resolve_api_key(mut self) -> Result<Self, ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            if let Some(key) = read_secrets_key(Path::new(&self.secrets_file))? {
                debug!("从 secrets 文件加载 API 密钥: {}", self.secrets_file);
                self.llm_api_key = key;
            }
        }

        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                secrets_file: self.secrets_file,
            });
        }

        Ok(self)
    }
}

fn read_secrets_key(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let path_str = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::secrets_file(&path_str, e))?;
    let secrets: SecretsFile =
        toml::from_str(&content).map_err(|e| ConfigError::secrets_file(&path_str, e))?;

    Ok(secrets
        .api
        .gemini_api_key
        .filter(|key| !key.trim().is_empty()))
}

fn parse_bool(var_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: "bool".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.llm_model_name, "gemini-1.5-pro");
        assert_eq!(config.secrets_file, ".streamlit/secrets.toml");
        assert!(config.llm_api_key.is_empty());
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "env-key"),
            ("LLM_MODEL_NAME", "gemini-2.0-flash"),
            ("VERBOSE_LOGGING", "true"),
        ]))
        .unwrap();
        assert_eq!(config.llm_api_key, "env-key");
        assert_eq!(config.llm_model_name, "gemini-2.0-flash");
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_empty_gemini_key_falls_back_to_llm_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", ""),
            ("LLM_API_KEY", "fallback-key"),
        ]))
        .unwrap();
        assert_eq!(config.llm_api_key, "fallback-key");

        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "  "),
            ("LLM_API_KEY", "fallback-key"),
        ]))
        .unwrap();
        assert_eq!(config.llm_api_key, "fallback-key");
    }

    #[test]
    fn test_bad_bool_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("VERBOSE_LOGGING", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { .. }));
    }

    #[test]
    fn test_key_from_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nGEMINI_API_KEY = \"file-key\"").unwrap();

        let config = Config {
            secrets_file: file.path().display().to_string(),
            ..Config::default()
        }
        .resolve_api_key()
        .unwrap();

        assert_eq!(config.llm_api_key, "file-key");
    }

    #[test]
    fn test_env_key_wins_over_secrets_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nGEMINI_API_KEY = \"file-key\"").unwrap();

        let config = Config {
            llm_api_key: "env-key".to_string(),
            secrets_file: file.path().display().to_string(),
            ..Config::default()
        }
        .resolve_api_key()
        .unwrap();

        assert_eq!(config.llm_api_key, "env-key");
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let config = Config {
            secrets_file: "/nonexistent/secrets.toml".to_string(),
            ..Config::default()
        };
        let err = config.resolve_api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey { .. }));
    }

    #[test]
    fn test_malformed_secrets_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nGEMINI_API_KEY = ").unwrap();

        let config = Config {
            secrets_file: file.path().display().to_string(),
            ..Config::default()
        };
        let err = config.resolve_api_key().unwrap_err();
        assert!(matches!(err, ConfigError::SecretsFile { .. }));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = Config {
            llm_api_key: "super-secret".to_string(),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
