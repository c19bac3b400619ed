//! 关系列表输出（只读，不写文件）

use crate::discord::error::Result;
use crate::discord::relationship::api::RelationshipApi;
use crate::discord::relationship::models::RelationshipRecord;
use std::io::Write;
use tracing::{info, warn};

/// 单条关系的展示行
pub fn format_line(record: &RelationshipRecord) -> String {
    format!(
        "{}\t{}\t{}",
        record.id,
        record.full_name(),
        record.relationship_kind()
    )
}

/// 拉取当前关系并逐行写出，返回写出的行数
pub async fn list_relationships<W: Write>(api: &dyn RelationshipApi, out: &mut W) -> Result<usize> {
    let collection = api.fetch_relationships().await?;
    if let Some(status) = collection.degraded_status() {
        warn!(
            "[List] ⚠️ 关系列表拉取失败（HTTP {}），以下输出为空并不代表没有关系",
            status
        );
    }

    for record in &collection {
        writeln!(out, "{}", format_line(record))?;
    }
    out.flush()?;

    info!("[List] 👥 关系列表（共 {} 个）", collection.len());
    Ok(collection.len())
}
