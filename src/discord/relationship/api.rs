//! 关系 HTTP API 客户端
//!
//! 负责所有关系相关的 HTTP 请求

use crate::discord::client::ClientConfig;
use crate::discord::error::{Result, SuperuserError};
use crate::discord::relationship::models::{RelationshipCollection, RelationshipRecord};
use crate::discord::relationship::types::RelationshipPayload;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use tracing::{debug, error, info, warn};

/// 单次关系请求的结果
///
/// 发送请求从不返回错误，由调用方决定如何记录结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// 服务器返回 2xx
    Accepted(StatusCode),
    /// 服务器返回非 2xx
    Rejected(StatusCode),
    /// 请求没有拿到响应（连接失败、超时等）
    Failed(String),
}

impl SendOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SendOutcome::Accepted(_))
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendOutcome::Accepted(status) => write!(f, "accepted ({})", status),
            SendOutcome::Rejected(status) => write!(f, "rejected ({})", status),
            SendOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// 远端关系接口
#[async_trait]
pub trait RelationshipApi: Send + Sync {
    /// 拉取当前账号的全部关系；非 OK 响应返回降级的空集合而不是错误
    async fn fetch_relationships(&self) -> Result<RelationshipCollection>;

    /// 向目标账号发送一次关系请求
    async fn send_relationship_request(&self, target_id: u64) -> SendOutcome;
}

/// 基于 reqwest 的关系 API 实现
pub struct HttpRelationshipApi {
    client: reqwest::Client,
    api_base_url: String,
}

impl HttpRelationshipApi {
    /// 创建新的关系 API 客户端
    ///
    /// `client` 应该已经在外部配置好认证头
    pub fn new(client: reqwest::Client, api_base_url: String) -> Self {
        Self {
            client,
            api_base_url,
        }
    }

    /// 根据配置创建带认证头的客户端
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        Ok(Self::new(client, config.api_base_url.clone()))
    }

    fn relationships_url(&self) -> String {
        format!("{}/users/@me/relationships", self.api_base_url)
    }

    fn relationship_url(&self, target_id: u64) -> String {
        format!("{}/{}", self.relationships_url(), target_id)
    }
}

#[async_trait]
impl RelationshipApi for HttpRelationshipApi {
    async fn fetch_relationships(&self) -> Result<RelationshipCollection> {
        let url = self.relationships_url();
        info!("[RelationshipAPI] 📡 请求关系列表");
        debug!("[RelationshipAPI]   请求URL: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body_bytes = response.bytes().await?;

        collection_from_response(status, &body_bytes)
    }

    async fn send_relationship_request(&self, target_id: u64) -> SendOutcome {
        let url = self.relationship_url(target_id);
        debug!("[RelationshipAPI]   PUT {}", url);

        match self
            .client
            .put(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                SendOutcome::Accepted(response.status())
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                debug!(
                    "[RelationshipAPI] 关系请求被拒绝，目标: {}, HTTP状态: {}, 响应: {}",
                    target_id, status, body
                );
                SendOutcome::Rejected(status)
            }
            Err(e) => SendOutcome::Failed(e.to_string()),
        }
    }
}

/// 把关系列表响应转换成集合
///
/// 只有 200 OK 才解析 body；其他状态码返回降级的空集合并打印警告。
/// 任意一条记录缺少必需字段，整次拉取失败，不产生部分结果。
pub fn collection_from_response(
    status: StatusCode,
    body: &[u8],
) -> Result<RelationshipCollection> {
    if status != StatusCode::OK {
        warn!(
            "[RelationshipAPI] ⚠️ 关系列表请求失败，HTTP状态: {}，按空列表处理（这不代表没有任何关系）",
            status
        );
        debug!(
            "[RelationshipAPI]   响应: {}",
            String::from_utf8_lossy(body)
        );
        return Ok(RelationshipCollection::degraded(status));
    }

    let payloads: Vec<RelationshipPayload> = serde_json::from_slice(body).map_err(|e| {
        error!(
            "[RelationshipAPI] 关系列表反序列化失败: {:?}\n原始响应: {}",
            e,
            String::from_utf8_lossy(body)
        );
        SuperuserError::MalformedRelationship(e)
    })?;

    let total = payloads.len();
    let collection: RelationshipCollection =
        payloads.into_iter().map(RelationshipRecord::from).collect();
    if collection.len() != total {
        warn!(
            "[RelationshipAPI] 关系列表中有 {} 条重复 ID，已按后者覆盖",
            total - collection.len()
        );
    }

    info!(
        "[RelationshipAPI] ✅ 关系列表响应，条目数: {}",
        collection.len()
    );
    Ok(collection)
}
