//! 命令调度
//!
//! 启动时解析一次参数，然后按 backup → import → mute-guilds → list 的顺序
//! 依次执行被请求的命令，所有命令共用同一个关系 API 实例。

use crate::discord::error::{Result, SuperuserError};
use crate::discord::relationship::api::RelationshipApi;
use crate::discord::relationship::backup::BackupStore;
use crate::discord::relationship::listing::list_relationships;
use crate::discord::relationship::replay::{ImportReplayer, ReplayOptions, ReplaySummary};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

/// Discord superuser 命令和工具
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "discord-superuser")]
#[command(about = "Discord superuser commands and tools", long_about = None)]
pub struct SuperuserArgs {
    /// 把当前账号的关系备份到 JSON 文件（文件已存在时拒绝覆盖）
    #[arg(long, value_name = "filename.json")]
    pub backup: Option<PathBuf>,

    /// 从备份文件导入关系（对每一条记录发送关系请求）
    #[arg(long = "import", value_name = "filename.json")]
    pub import_from_backup: Option<PathBuf>,

    /// 屏蔽账号所在的全部服务器（当前版本未实现）
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "true|false")]
    pub mute_guilds: Option<bool>,

    /// 列出当前账号的全部关系
    #[arg(long)]
    pub list_relationships: bool,

    /// 导入时相邻两次请求之间的等待时间（毫秒）
    #[arg(long, default_value = "0")]
    pub delay_ms: u64,

    /// 日志级别（默认: info,discord_superuser=debug）
    #[arg(long, default_value = "info,discord_superuser=debug")]
    pub log_level: String,
}

impl SuperuserArgs {
    /// 是否请求了任何命令
    pub fn has_command(&self) -> bool {
        self.backup.is_some()
            || self.import_from_backup.is_some()
            || self.mute_guilds == Some(true)
            || self.list_relationships
    }
}

/// 单个命令的执行结果
#[derive(Debug)]
pub enum CommandReport {
    BackedUp {
        path: PathBuf,
        count: usize,
        /// 拉取降级时写出的是空备份
        degraded: bool,
    },
    Imported {
        path: PathBuf,
        summary: ReplaySummary,
    },
    /// 拒绝执行（区别于“执行了但什么都没做”）
    Unsupported(SuperuserError),
    /// 该命令失败，但不影响其他命令
    Failed(SuperuserError),
    Listed {
        count: usize,
    },
}

impl CommandReport {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CommandReport::Unsupported(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CommandReport::Failed(_))
    }
}

/// 命令级错误记为 `Failed`，其他错误继续向上返回
fn scoped(result: Result<CommandReport>) -> Result<CommandReport> {
    match result {
        Err(e) if e.is_command_scoped() => {
            error!("[CLI] ❌ {}", e);
            Ok(CommandReport::Failed(e))
        }
        other => other,
    }
}

/// 命令调度器
pub struct Superuser<'a> {
    args: SuperuserArgs,
    api: &'a dyn RelationshipApi,
    replayer: ImportReplayer,
}

impl<'a> Superuser<'a> {
    pub fn new(args: SuperuserArgs, api: &'a dyn RelationshipApi) -> Self {
        let replayer = ImportReplayer::new(ReplayOptions {
            delay: Duration::from_millis(args.delay_ms),
        });
        Self {
            args,
            api,
            replayer,
        }
    }

    /// 按固定顺序执行全部被请求的命令
    ///
    /// 备份目标已存在、导入源缺失只让对应命令失败（记为 `Failed`），
    /// 未实现的命令记为 `Unsupported`，两者都不影响后续命令。
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Vec<CommandReport>> {
        let mut reports = Vec::new();

        if let Some(path) = &self.args.backup {
            reports.push(scoped(self.backup_relationships(path).await)?);
        }

        if let Some(path) = &self.args.import_from_backup {
            reports.push(scoped(self.import_from_backup(path).await)?);
        }

        if self.args.mute_guilds == Some(true) {
            let e = self.mute_guilds();
            warn!("[CLI] ⚠️ {}", e);
            reports.push(CommandReport::Unsupported(e));
        }

        if self.args.list_relationships {
            let count = list_relationships(self.api, out).await?;
            reports.push(CommandReport::Listed { count });
        }

        Ok(reports)
    }

    /// 备份当前关系到 `path`
    pub async fn backup_relationships(&self, path: &Path) -> Result<CommandReport> {
        // 先检查目标，避免白白请求一次网络
        if path.exists() {
            return Err(SuperuserError::DestinationExists {
                path: path.to_path_buf(),
            });
        }

        info!("[CLI] 💾 开始备份关系到 {}", path.display());
        let collection = self.api.fetch_relationships().await?;
        let degraded = collection.is_degraded();
        if let Some(status) = collection.degraded_status() {
            warn!(
                "[CLI] ⚠️ 关系列表拉取失败（HTTP {}），备份文件 {} 将为空",
                status,
                path.display()
            );
        }

        let count = BackupStore::write(path, &collection)?;
        Ok(CommandReport::BackedUp {
            path: path.to_path_buf(),
            count,
            degraded,
        })
    }

    /// 从备份文件导入关系
    pub async fn import_from_backup(&self, path: &Path) -> Result<CommandReport> {
        warn!(
            "[CLI] ⚠️⚠️ 即将对 {} 中的每一条记录发送关系请求。对已存在的关系或大量目标重复请求，可能触发平台的反滥用保护并导致账号被限制！",
            path.display()
        );
        let summary = self.replayer.replay(path, self.api).await?;
        Ok(CommandReport::Imported {
            path: path.to_path_buf(),
            summary,
        })
    }

    /// 屏蔽服务器：当前版本未实现，总是返回 `Unsupported`
    pub fn mute_guilds(&self) -> SuperuserError {
        SuperuserError::Unsupported("mute-guilds")
    }
}
