//! 备份文件读写
//!
//! 备份是一次性的产物：写入时绝不覆盖已有文件。

use crate::discord::error::{Result, SuperuserError};
use crate::discord::relationship::models::RelationshipRecord;
use crate::discord::relationship::types::BackupEntry;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// 备份文件缩进（4 个空格）
const INDENT: &[u8] = b"    ";

/// 备份存储
pub struct BackupStore;

impl BackupStore {
    /// 把关系投影为 `{id, type, fullname}` 写入 `path`，保持迭代顺序
    ///
    /// 目标已存在时返回 `DestinationExists`，不做任何写入。
    pub fn write<'a, I>(path: &Path, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a RelationshipRecord>,
    {
        let entries: Vec<BackupEntry> = records.into_iter().map(BackupEntry::from).collect();
        Self::write_entries(path, &entries)?;
        Ok(entries.len())
    }

    /// 写入已投影好的条目
    pub fn write_entries(path: &Path, entries: &[BackupEntry]) -> Result<()> {
        if path.exists() {
            return Err(SuperuserError::DestinationExists {
                path: path.to_path_buf(),
            });
        }

        // 先在内存中序列化，避免序列化失败时留下半个文件
        let body = to_pretty_json(entries)?;

        // create_new 保证检查和创建之间不会被别人抢先写入
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => SuperuserError::DestinationExists {
                    path: path.to_path_buf(),
                },
                _ => SuperuserError::Io(e),
            })?;
        file.write_all(&body)?;
        file.flush()?;

        info!(
            "[Backup] 💾 已写入 {} 条关系到 {}",
            entries.len(),
            path.display()
        );
        Ok(())
    }

    /// 读取备份文件，保持文件中的顺序
    pub fn read(path: &Path) -> Result<Vec<BackupEntry>> {
        let body = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SuperuserError::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => SuperuserError::Io(e),
        })?;

        let entries: Vec<BackupEntry> =
            serde_json::from_slice(&body).map_err(|source| SuperuserError::MalformedBackup {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "[Backup] 从 {} 读取到 {} 条关系",
            path.display(),
            entries.len()
        );
        Ok(entries)
    }
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::relationship::models::record;
    use tempfile::TempDir;

    fn sample() -> Vec<RelationshipRecord> {
        let mut bob = record(200, 2, "Bob", "0002");
        bob.nickname = Some("bobby".to_string());
        bob.avatar = Some("deadbeef".to_string());
        bob.flags = 256;
        vec![record(100, 1, "Alice", "0001"), bob, record(50, 4, "Zoë", "1234")]
    }

    #[test]
    fn round_trip_preserves_projection_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let records = sample();

        let written = BackupStore::write(&path, &records).unwrap();
        assert_eq!(written, 3);

        let entries = BackupStore::read(&path).unwrap();
        assert_eq!(entries.len(), records.len());
        for (entry, record) in entries.iter().zip(&records) {
            assert_eq!(entry.id, record.id);
            assert_eq!(entry.kind, record.kind);
            assert_eq!(entry.full_name, record.full_name());
        }
    }

    #[test]
    fn written_file_drops_cosmetic_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        BackupStore::write(&path, &sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for entry in raw.as_array().unwrap() {
            let mut keys: Vec<&str> = entry.as_object().unwrap().keys().map(|k| k.as_str()).collect();
            keys.sort();
            assert_eq!(keys, vec!["fullname", "id", "type"]);
        }
    }

    #[test]
    fn written_file_is_pretty_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        BackupStore::write(&path, &[record(1, 1, "Zoë", "0001")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let expected = "[\n    {\n        \"id\": 1,\n        \"type\": 1,\n        \"fullname\": \"Zoë#0001\"\n    }\n]";
        assert_eq!(text, expected);
    }

    #[test]
    fn second_write_is_refused_and_first_file_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        BackupStore::write(&path, &sample()).unwrap();
        let before = std::fs::read(&path).unwrap();

        let err = BackupStore::write(&path, &[record(9, 1, "Mallory", "6666")]).unwrap_err();
        assert!(matches!(err, SuperuserError::DestinationExists { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn empty_collection_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        BackupStore::write(&path, &Vec::<RelationshipRecord>::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(BackupStore::read(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = BackupStore::read(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SuperuserError::SourceNotFound { .. }));
    }

    #[test]
    fn malformed_backup_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"id":1},{"type":2}]"#).unwrap();
        let err = BackupStore::read(&path).unwrap_err();
        assert!(matches!(err, SuperuserError::MalformedBackup { .. }));
    }
}
