//! 关系模块
//!
//! 关系的拉取、备份、导入回放和列表输出

pub mod api;
pub mod backup;
pub mod listing;
pub mod models;
pub mod replay;
pub mod types;

// 重新导出主要类型和函数
pub use api::{HttpRelationshipApi, RelationshipApi, SendOutcome};
pub use backup::BackupStore;
pub use listing::list_relationships;
pub use models::{RelationshipCollection, RelationshipKind, RelationshipRecord};
pub use replay::{ImportReplayer, LoggingReplayListener, ReplayListener, ReplayOptions, ReplaySummary};
pub use types::{BackupEntry, RelationshipPayload, UserPayload};
