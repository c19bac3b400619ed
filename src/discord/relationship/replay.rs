//! 导入回放
//!
//! 按文件顺序对每一条备份记录发送一次关系请求。严格串行：
//! 上一条请求返回之前不会开始下一条；单条失败只记录，不会中断后续条目。

use crate::discord::error::Result;
use crate::discord::relationship::api::{RelationshipApi, SendOutcome};
use crate::discord::relationship::backup::BackupStore;
use crate::discord::relationship::types::BackupEntry;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 回放监听器回调接口
#[async_trait]
pub trait ReplayListener: Send + Sync {
    /// 即将向 `entry` 发送请求
    async fn on_request_start(&self, index: usize, total: usize, entry: &BackupEntry);

    /// 请求已返回
    async fn on_request_finished(&self, index: usize, entry: &BackupEntry, outcome: &SendOutcome);
}

/// 默认监听器：把每条请求写进日志
pub struct LoggingReplayListener;

#[async_trait]
impl ReplayListener for LoggingReplayListener {
    async fn on_request_start(&self, index: usize, total: usize, entry: &BackupEntry) {
        info!(
            "[Replay] 📤 ({}/{}) 发送关系请求 -> {} ({})",
            index + 1,
            total,
            entry.full_name,
            entry.id
        );
    }

    async fn on_request_finished(&self, _index: usize, entry: &BackupEntry, outcome: &SendOutcome) {
        if outcome.is_accepted() {
            info!("[Replay]   ✅ {} ({}): {}", entry.full_name, entry.id, outcome);
        } else {
            warn!("[Replay]   ❌ {} ({}): {}", entry.full_name, entry.id, outcome);
        }
    }
}

/// 回放选项
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// 相邻两次请求之间的等待时间
    pub delay: Duration,
}

/// 回放结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: &SendOutcome) {
        match outcome {
            SendOutcome::Accepted(_) => self.accepted += 1,
            SendOutcome::Rejected(_) => self.rejected += 1,
            SendOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// 导入回放器
pub struct ImportReplayer {
    listener: Arc<dyn ReplayListener>,
    options: ReplayOptions,
}

impl Default for ImportReplayer {
    fn default() -> Self {
        Self::new(ReplayOptions::default())
    }
}

impl ImportReplayer {
    /// 使用默认日志监听器
    pub fn new(options: ReplayOptions) -> Self {
        Self::with_listener(options, Arc::new(LoggingReplayListener))
    }

    pub fn with_listener(options: ReplayOptions, listener: Arc<dyn ReplayListener>) -> Self {
        Self { listener, options }
    }

    /// 读取备份文件并回放
    ///
    /// 文件不存在或无法解析时直接返回错误，此时不会发出任何请求。
    pub async fn replay(&self, path: &Path, api: &dyn RelationshipApi) -> Result<ReplaySummary> {
        let entries = BackupStore::read(path)?;
        info!(
            "[Replay] 🔄 从 {} 导入 {} 条关系",
            path.display(),
            entries.len()
        );
        Ok(self.replay_entries(&entries, api).await)
    }

    /// 回放已读取的条目
    pub async fn replay_entries(
        &self,
        entries: &[BackupEntry],
        api: &dyn RelationshipApi,
    ) -> ReplaySummary {
        let total = entries.len();
        let mut summary = ReplaySummary {
            total,
            ..ReplaySummary::default()
        };

        for (index, entry) in entries.iter().enumerate() {
            if index > 0 && !self.options.delay.is_zero() {
                tokio::time::sleep(self.options.delay).await;
            }

            self.listener.on_request_start(index, total, entry).await;
            let outcome = api.send_relationship_request(entry.id).await;
            self.listener
                .on_request_finished(index, entry, &outcome)
                .await;
            summary.record(&outcome);
        }

        info!(
            "[Replay] 回放完成 - 总数: {}, 成功: {}, 拒绝: {}, 失败: {}",
            summary.total, summary.accepted, summary.rejected, summary.failed
        );
        summary
    }
}
