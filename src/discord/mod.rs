pub mod client;
pub mod commands;
pub mod error;
pub mod relationship;
pub mod serialization;

// 重新导出关系同步相关类型
pub use relationship::{
    BackupEntry, BackupStore, ImportReplayer, RelationshipApi, RelationshipCollection,
    RelationshipKind, RelationshipRecord, SendOutcome,
};
