//! 客户端配置
//!
//! 凭证和 HTTP 会话在整个进程生命周期内只创建一次，
//! 通过 `ClientConfig` 显式传递给需要它的组件，没有全局实例。

use crate::discord::error::{Result, SuperuserError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use tracing::{debug, info};

/// 凭证所在的环境变量
pub const TOKEN_ENV: &str = "TOKEN";
/// 覆盖 API 地址的环境变量（可选）
pub const API_BASE_ENV: &str = "DISCORD_API_BASE";

pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v9";

/// 通用浏览器 UA
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/102.0.5005.61 Safari/537.36";

/// 客户端配置
#[derive(Clone)]
pub struct ClientConfig {
    /// 用户凭证（原样放入 authorization 头）
    pub token: String,
    /// API 基础 URL
    pub api_base_url: String,
    pub user_agent: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// 使用默认 API 地址创建配置
    pub fn new(token: String) -> Self {
        Self {
            token,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// 指定 API 地址
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 从进程环境读取配置，凭证缺失时立即失败
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置（便于测试，不依赖真实环境变量）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SuperuserError::MissingCredential {
                var: TOKEN_ENV.to_string(),
            })?;

        let mut config = Self::new(token);
        if let Some(base) = lookup(API_BASE_ENV).filter(|b| !b.trim().is_empty()) {
            debug!("[Config] 使用自定义 API 地址: {}", base);
            config = config.with_api_base_url(base.trim());
        }
        info!("[Config] ✅ 配置加载完成，API 地址: {}", config.api_base_url);
        Ok(config)
    }

    /// 创建带认证头的 HTTP 客户端（token 通过 default_headers 自动添加）
    pub fn build_http_client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&self.token)
            .map_err(|e| SuperuserError::InvalidCredential(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|e| SuperuserError::InvalidCredential(e.to_string()))?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()?;
        Ok(client)
    }
}
