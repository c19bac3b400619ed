//! 关系本地模型定义

use reqwest::StatusCode;
use std::collections::HashMap;
use std::fmt;

/// 单条关系记录
///
/// 只有 `id` 对导入回放有意义；用户名、标签等都是拉取时的快照，可能已经过期。
#[derive(Debug, Clone)]
pub struct RelationshipRecord {
    /// 对方账号 ID
    pub id: u64,
    /// 关系类型代码（平台定义，原样保存）
    pub kind: i32,
    /// 本地备注名
    pub nickname: Option<String>,
    pub username: String,
    pub discriminator: String,
    pub avatar: Option<String>,
    /// 公开账号标记位
    pub flags: u64,
}

impl RelationshipRecord {
    /// 展示用全名：`username#discriminator`
    pub fn full_name(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    pub fn relationship_kind(&self) -> RelationshipKind {
        RelationshipKind::from_code(self.kind)
    }
}

// 相等性只看 id
impl PartialEq for RelationshipRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RelationshipRecord {}

impl std::hash::Hash for RelationshipRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for RelationshipRecord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RelationshipRecord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

/// 已知的关系类型，仅用于展示；未知代码原样保留
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Friend,
    Blocked,
    PendingIncoming,
    PendingOutgoing,
    Unknown(i32),
}

impl RelationshipKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => RelationshipKind::Friend,
            2 => RelationshipKind::Blocked,
            3 => RelationshipKind::PendingIncoming,
            4 => RelationshipKind::PendingOutgoing,
            other => RelationshipKind::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RelationshipKind::Friend => 1,
            RelationshipKind::Blocked => 2,
            RelationshipKind::PendingIncoming => 3,
            RelationshipKind::PendingOutgoing => 4,
            RelationshipKind::Unknown(code) => code,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Friend => write!(f, "friend"),
            RelationshipKind::Blocked => write!(f, "blocked"),
            RelationshipKind::PendingIncoming => write!(f, "pending-incoming"),
            RelationshipKind::PendingOutgoing => write!(f, "pending-outgoing"),
            RelationshipKind::Unknown(code) => write!(f, "unknown({})", code),
        }
    }
}

/// 一次拉取得到的关系集合
///
/// 按 id 去重：重复 id 时后到的记录覆盖先前的内容，但保留第一次出现的位置，
/// 因此迭代顺序仍然是服务器返回的顺序。
#[derive(Debug, Clone, Default)]
pub struct RelationshipCollection {
    records: Vec<RelationshipRecord>,
    index: HashMap<u64, usize>,
    /// 拉取失败时服务器返回的状态码
    degraded: Option<StatusCode>,
}

impl RelationshipCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 拉取失败时的空集合，与“确实没有任何关系”区分开
    pub fn degraded(status: StatusCode) -> Self {
        Self {
            degraded: Some(status),
            ..Self::default()
        }
    }

    /// 插入记录，返回被覆盖的旧记录（若 id 已存在）
    pub fn insert(&mut self, record: RelationshipRecord) -> Option<RelationshipRecord> {
        match self.index.get(&record.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(record.id, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&RelationshipRecord> {
        self.index.get(&id).map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelationshipRecord> {
        self.records.iter()
    }

    /// 拉取是否降级（非 OK 响应）
    pub fn degraded_status(&self) -> Option<StatusCode> {
        self.degraded
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

impl FromIterator<RelationshipRecord> for RelationshipCollection {
    fn from_iter<I: IntoIterator<Item = RelationshipRecord>>(iter: I) -> Self {
        let mut collection = Self::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a RelationshipCollection {
    type Item = &'a RelationshipRecord;
    type IntoIter = std::slice::Iter<'a, RelationshipRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RelationshipCollection {
    type Item = RelationshipRecord;
    type IntoIter = std::vec::IntoIter<RelationshipRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
pub(crate) fn record(id: u64, kind: i32, username: &str, discriminator: &str) -> RelationshipRecord {
    RelationshipRecord {
        id,
        kind,
        nickname: None,
        username: username.to_string(),
        discriminator: discriminator.to_string(),
        avatar: None,
        flags: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_username_and_discriminator() {
        assert_eq!(record(100, 1, "Alice", "0001").full_name(), "Alice#0001");
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = record(7, 1, "Alice", "0001");
        let mut b = record(7, 2, "Renamed", "9999");
        b.nickname = Some("x".to_string());
        assert_eq!(a, b);
        assert_ne!(a, record(8, 1, "Alice", "0001"));
        assert!(record(1, 1, "z", "0") < record(2, 1, "a", "0"));
    }

    // 重复 id：后写覆盖，位置不变
    #[test]
    fn duplicate_ids_overwrite_in_place() {
        let mut collection = RelationshipCollection::new();
        assert!(collection.insert(record(100, 1, "Alice", "0001")).is_none());
        assert!(collection.insert(record(200, 2, "Bob", "0002")).is_none());
        let replaced = collection.insert(record(100, 3, "Alice2", "0003"));

        assert_eq!(replaced.map(|r| r.username), Some("Alice".to_string()));
        assert_eq!(collection.len(), 2);
        let ids: Vec<u64> = collection.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![100, 200]);
        let alice = collection.get(100).unwrap();
        assert_eq!(alice.kind, 3);
        assert_eq!(alice.full_name(), "Alice2#0003");
    }

    #[test]
    fn degraded_collection_is_empty_but_distinguishable() {
        let degraded = RelationshipCollection::degraded(StatusCode::UNAUTHORIZED);
        assert!(degraded.is_empty());
        assert!(degraded.is_degraded());
        assert_eq!(degraded.degraded_status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!RelationshipCollection::new().is_degraded());
    }

    #[test]
    fn kind_codes_round_trip() {
        for code in [1, 2, 3, 4, 0, 5, -1] {
            assert_eq!(RelationshipKind::from_code(code).code(), code);
        }
        assert_eq!(RelationshipKind::from_code(1).to_string(), "friend");
        assert_eq!(RelationshipKind::from_code(9).to_string(), "unknown(9)");
    }
}
