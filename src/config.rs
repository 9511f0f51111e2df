use std::{env, path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::error::Result;

/// 服务配置
///
/// 先读取 `ARTICLE_DASH_CONFIG` 指向的 TOML 文件（可选），
/// 再用环境变量 `ARTICLE_DASH_ADDR`、`ARTICLE_DASH_SEED` 覆盖。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub listen_addr: String,
    /// 文章 JSON 文件，缺省时使用模拟数据
    pub seed_path: Option<PathBuf>,
    /// 模拟文章数量
    pub mock_count: usize,
    pub login_delay_ms: u64,
    pub search_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            seed_path: None,
            mock_count: crate::content::mock::DEFAULT_COUNT,
            login_delay_ms: 800,
            search_debounce_ms: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("ARTICLE_DASH_CONFIG") {
            Ok(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = env::var("ARTICLE_DASH_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(seed) = env::var("ARTICLE_DASH_SEED") {
            config.seed_path = Some(seed.into());
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            listen_addr = "127.0.0.1:8080"
            login_delay_ms = 0
            "#,
        )
        .expect("解析失败");

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.login_delay(), Duration::ZERO);
        assert_eq!(config.search_delay(), Duration::from_millis(300));
        assert_eq!(config.mock_count, 50);
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("listen_addr = 3").is_err());
    }
}
