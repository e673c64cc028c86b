use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Insights 服务基础地址
    pub api_base_url: String,
    /// PDF 报告下载目录
    pub download_dir: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 周报摘要不可用时的占位文案
    pub weekly_summary_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://datasage-api.onrender.com".to_string(),
            download_dir: ".".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            weekly_summary_placeholder: "本周摘要暂不可用".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置（缺省值见 Default）
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("DATASAGE_API_BASE").unwrap_or(default.api_base_url),
            download_dir: std::env::var("DATASAGE_DOWNLOAD_DIR").unwrap_or(default.download_dir),
            request_timeout_secs: std::env::var("DATASAGE_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("DATASAGE_VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            weekly_summary_placeholder: std::env::var("DATASAGE_WEEKLY_PLACEHOLDER").unwrap_or(default.weekly_summary_placeholder),
        }
    }

    /// 从 TOML 配置文件加载配置
    ///
    /// # 参数
    /// - `path`: 配置文件路径（如 datasage.toml）
    pub async fn from_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::File(crate::error::FileError::ReadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })?;

        Ok(config)
    }

    /// 加载配置：存在 datasage.toml 则以文件为基底，再用环境变量覆盖
    ///
    /// 环境变量在启动时一次性生效，之后配置不再变化
    pub async fn load() -> Self {
        let base = match Self::from_file(Path::new("datasage.toml")).await {
            Ok(config) => {
                tracing::info!("已加载配置文件 datasage.toml");
                config
            }
            Err(_) => Self::default(),
        };
        Self::overlay_env(base)
    }

    /// 用环境变量覆盖已有配置
    fn overlay_env(base: Self) -> Self {
        Self {
            api_base_url: std::env::var("DATASAGE_API_BASE").unwrap_or(base.api_base_url),
            download_dir: std::env::var("DATASAGE_DOWNLOAD_DIR").unwrap_or(base.download_dir),
            request_timeout_secs: std::env::var("DATASAGE_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.request_timeout_secs),
            verbose_logging: std::env::var("DATASAGE_VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            weekly_summary_placeholder: std::env::var("DATASAGE_WEEKLY_PLACEHOLDER").unwrap_or(base.weekly_summary_placeholder),
        }
    }
}
