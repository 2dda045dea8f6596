use crate::core::message::{TemplateBank, REQUIRED_PLACEHOLDERS};
use crate::domain::model::{Category, Platform};
use crate::utils::error::{NegotiationError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_placeholders, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_POOL_KEY: &str = "default";
pub const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub defaults: Option<DefaultsConfig>,
    pub templates: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub platform: Option<String>,
    pub delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NegotiationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NegotiationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SELLER_NAME})；只處理大寫名稱，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| {
            NegotiationError::ConfigError {
                message: format!("Invalid substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(defaults) = &self.defaults {
            if let Some(platform) = &defaults.platform {
                validate_non_empty_string("defaults.platform", platform)?;
            }
            if let Some(delay) = defaults.delay_ms {
                validate_range("defaults.delay_ms", delay, 0, MAX_DELAY_MS)?;
            }
        }

        for (key, pool) in self.templates.iter().flatten() {
            if key != DEFAULT_POOL_KEY && Category::parse(key).is_none() {
                return Err(NegotiationError::InvalidValue {
                    field: "templates".to_string(),
                    value: key.clone(),
                    reason: "Pool must be 'default', 'real-estate', 'cars', 'electronics' or 'furniture'"
                        .to_string(),
                });
            }
            for (index, template) in pool.iter().enumerate() {
                validate_placeholders(
                    &format!("templates.{}[{}]", key, index),
                    template,
                    &REQUIRED_PLACEHOLDERS,
                )?;
            }
        }

        Ok(())
    }

    pub fn default_platform(&self) -> Option<Platform> {
        self.defaults
            .as_ref()
            .and_then(|d| d.platform.as_deref())
            .map(Platform::from)
    }

    pub fn delay_ms(&self) -> u64 {
        self.defaults.as_ref().and_then(|d| d.delay_ms).unwrap_or(0)
    }

    /// 以內建模板為基礎，套用設定檔中的覆寫
    pub fn template_bank(&self) -> Result<TemplateBank> {
        self.validate_config()?;

        let mut bank = TemplateBank::default();
        for (key, pool) in self.templates.iter().flatten() {
            let category = Category::parse(key);
            tracing::debug!("Overriding '{}' template pool with {} templates", key, pool.len());
            bank = bank.with_pool(category, pool.clone());
        }
        Ok(bank)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[defaults]
platform = "Craigslist"
delay_ms = 1500

[templates]
cars = ["Would you take ${offer} for the {title}?"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.default_platform(), Some(Platform::Craigslist));
        assert_eq!(config.delay_ms(), 1500);
        assert!(config.validate().is_ok());

        let bank = config.template_bank().unwrap();
        assert_eq!(bank.pool_for(Some("cars")).len(), 1);
        assert_eq!(bank.default_pool().len(), 3);
    }

    #[test]
    fn test_empty_config_uses_builtin_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_platform(), None);
        assert_eq!(config.delay_ms(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LOWBAL_TEST_PLATFORM", "Zillow");

        let toml_content = r#"
[defaults]
platform = "${LOWBAL_TEST_PLATFORM}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.default_platform(), Some(Platform::Zillow));

        std::env::remove_var("LOWBAL_TEST_PLATFORM");
    }

    #[test]
    fn test_template_placeholders_are_not_env_vars() {
        // 小寫名稱（例如 offer）不會被當成環境變數
        std::env::set_var("offer", "EVIL");
        let config = TomlConfig::from_toml_str(
            r#"
[templates]
default = ["Hi! Would you consider ${offer} for your {title}?"]
"#,
        )
        .unwrap();
        std::env::remove_var("offer");

        let pool = &config.templates.as_ref().unwrap()["default"];
        assert_eq!(pool[0], "Hi! Would you consider ${offer} for your {title}?");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let missing_offer = TomlConfig::from_toml_str(
            r#"
[templates]
default = ["Hi! I like your {title}."]
"#,
        )
        .unwrap();
        assert!(missing_offer.validate().is_err());

        let unknown_pool = TomlConfig::from_toml_str(
            r#"
[templates]
boats = ["{title} for {offer}?"]
"#,
        )
        .unwrap();
        assert!(unknown_pool.validate().is_err());

        let slow = TomlConfig::from_toml_str(
            r#"
[defaults]
delay_ms = 60000
"#,
        )
        .unwrap();
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[defaults]
platform = "eBay"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_platform(), Some(Platform::Ebay));
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = TomlConfig::from_file("/nonexistent/lowbal.toml").unwrap_err();
        assert!(matches!(err, NegotiationError::IoError(_)));
    }
}
