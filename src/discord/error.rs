//! 错误类型
//!
//! 配置和文件系统错误是致命的，直接返回给调用方；
//! 网络层的局部失败（拉取降级、单条请求失败）不走这里，而是降级为结果数据。

use std::path::PathBuf;
use thiserror::Error;

/// 关系同步相关操作的结果类型
pub type Result<T> = std::result::Result<T, SuperuserError>;

#[derive(Error, Debug)]
pub enum SuperuserError {
    /// 环境变量中没有凭证
    #[error("环境变量 {var} 未设置，无法运行")]
    MissingCredential { var: String },

    /// 凭证无法作为 HTTP 头发送
    #[error("无效的凭证: {0}")]
    InvalidCredential(String),

    /// 备份目标已存在，拒绝覆盖
    #[error("备份文件 ({}) 已存在，请先删除后再继续", path.display())]
    DestinationExists { path: PathBuf },

    /// 导入源文件不存在
    #[error("要导入的备份文件 ({}) 不存在", path.display())]
    SourceNotFound { path: PathBuf },

    /// 备份文件无法解析
    #[error("备份文件 ({}) 解析失败: {source}", path.display())]
    MalformedBackup {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 服务器返回的关系条目缺少必要字段
    #[error("关系列表反序列化失败: {0}")]
    MalformedRelationship(#[source] serde_json::Error),

    /// 当前版本不支持的操作
    #[error("当前版本不支持该操作: {0}")]
    Unsupported(&'static str),

    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuperuserError {
    /// 只对当前命令致命的错误（备份目标已存在、导入源缺失或无法解析），
    /// 其余已请求的命令仍然继续执行
    pub fn is_command_scoped(&self) -> bool {
        matches!(
            self,
            SuperuserError::DestinationExists { .. }
                | SuperuserError::SourceNotFound { .. }
                | SuperuserError::MalformedBackup { .. }
        )
    }
}
