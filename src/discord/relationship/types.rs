//! 关系 DTO（服务器响应结构体和备份文件结构体）

use crate::discord::relationship::models::RelationshipRecord;
use crate::discord::serialization::{
    deserialize_snowflake, deserialize_string_or_null, deserialize_u64_or_null,
};
use serde::{Deserialize, Serialize};

/// 服务器返回的单条关系
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipPayload {
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: i32,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub nickname: Option<String>,
    pub user: UserPayload,
}

/// 关系里嵌套的用户信息
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub discriminator: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "deserialize_u64_or_null")]
    pub public_flags: u64,
}

impl From<RelationshipPayload> for RelationshipRecord {
    fn from(payload: RelationshipPayload) -> Self {
        RelationshipRecord {
            id: payload.id,
            kind: payload.kind,
            nickname: payload.nickname,
            username: payload.user.username,
            discriminator: payload.user.discriminator,
            avatar: payload.user.avatar,
            flags: payload.user.public_flags,
        }
    }
}

/// 备份文件中的一条记录：`{id, type, fullname}`
///
/// 只有 `id` 是必需的，另外两个字段缺失时取默认值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupEntry {
    #[serde(deserialize_with = "deserialize_snowflake")]
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(rename = "fullname", default)]
    pub full_name: String,
}

impl From<&RelationshipRecord> for BackupEntry {
    fn from(record: &RelationshipRecord) -> Self {
        BackupEntry {
            id: record.id,
            kind: record.kind,
            full_name: record.full_name(),
        }
    }
}
