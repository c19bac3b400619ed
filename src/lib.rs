pub mod discord;

// 重新导出常用类型和函数，方便外部使用
pub use discord::{
    client::ClientConfig,
    commands::{CommandReport, Superuser, SuperuserArgs},
    error::{Result, SuperuserError},
    relationship::{
        BackupStore, HttpRelationshipApi, ImportReplayer, RelationshipApi,
        RelationshipCollection, RelationshipRecord,
    },
};
