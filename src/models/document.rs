use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 文档记录
///
/// 每次运行结束后写入存储，包含原文、合并后的摘要和标题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub publish_time: DateTime<Local>,
}

impl DocumentRecord {
    /// 从原始字节构造记录（非 UTF-8 内容按有损方式解码）
    pub fn from_bytes(id: u64, title: &str, source: &[u8], summary: &[u8]) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: String::from_utf8_lossy(source).into_owned(),
            summary: String::from_utf8_lossy(summary).into_owned(),
            publish_time: Local::now(),
        }
    }
}
