//! 文档存储 - 业务能力层
//!
//! 只负责"保存一条文档记录"能力。每次运行结束后调用一次。

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::StorageError;
use crate::models::DocumentRecord;

/// 文档存储能力
pub trait DocumentStore {
    /// 保存原文和摘要，返回新建的记录
    fn store(
        &self,
        source: &[u8],
        summary: &[u8],
        title: &str,
    ) -> impl Future<Output = Result<DocumentRecord, StorageError>> + Send;
}

/// 基于 JSON 文件的文档存储
///
/// 每条记录保存为 `<dir>/<id>.json`，id 从 1 开始自增。
/// 记录文件以独占方式创建，多个进程共用同一目录时不会互相覆盖。
pub struct JsonDocumentStore {
    dir: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 按 id 读取记录
    pub async fn fetch(&self, id: u64) -> Result<DocumentRecord, StorageError> {
        let path = self.record_path(id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound { id });
            }
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// 扫描目录，取已有记录的最大 id + 1
    async fn next_id(&self) -> Result<u64, StorageError> {
        let unavailable = |source: std::io::Error| StorageError::DirectoryUnavailable {
            path: self.dir.display().to_string(),
            source,
        };

        let mut max_id = 0;
        let mut entries = fs::read_dir(&self.dir).await.map_err(unavailable)?;
        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                max_id = max_id.max(id);
            }
        }

        Ok(max_id + 1)
    }
}

impl DocumentStore for JsonDocumentStore {
    async fn store(
        &self,
        source: &[u8],
        summary: &[u8],
        title: &str,
    ) -> Result<DocumentRecord, StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::DirectoryUnavailable {
                path: self.dir.display().to_string(),
                source,
            })?;

        let mut id = self.next_id().await?;
        loop {
            let record = DocumentRecord::from_bytes(id, title, source, summary);
            let json = serde_json::to_string_pretty(&record)?;

            let path = self.record_path(id);
            let write_failed = |source: std::io::Error| StorageError::WriteFailed {
                path: path.display().to_string(),
                source,
            };

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("记录 {} 已被占用，尝试下一个 id", id);
                    id += 1;
                    continue;
                }
                Err(e) => return Err(write_failed(e)),
            };

            debug!("保存文档记录: {} | 标题: {}", path.display(), title);
            file.write_all(json.as_bytes()).await.map_err(write_failed)?;
            file.flush().await.map_err(write_failed)?;

            return Ok(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_assigns_increasing_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path().join("documents"));

        let first = store.store(b"source one", b"summary one", "One").await.unwrap();
        let second = store.store(b"source two", b"summary two", "Two").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_fetch_returns_stored_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());

        let stored = store.store(b"1\nIntro\nBrief\n", b"summary", "Book").await.unwrap();
        let fetched = store.fetch(stored.id).await.unwrap();

        assert_eq!(fetched, stored);
        assert_eq!(fetched.content, "1\nIntro\nBrief\n");
        assert_eq!(fetched.summary, "summary");
    }

    #[tokio::test]
    async fn test_fetch_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());

        let err = store.fetch(42).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn test_store_skips_existing_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDocumentStore::new(dir.path());
        std::fs::write(dir.path().join("1.json"), "{}").unwrap();

        let record = store.store(b"source", b"summary", "Book").await.unwrap();

        assert_eq!(record.id, 2);
        assert_eq!(std::fs::read_to_string(dir.path().join("1.json")).unwrap(), "{}");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stores_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();

        for round in 0..20 {
            let round_dir = dir.path().join(format!("round-{}", round));
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let store = JsonDocumentStore::new(&round_dir);
                    tokio::spawn(async move {
                        let title = format!("Book {}", i);
                        store.store(title.as_bytes(), b"summary", &title).await
                    })
                })
                .collect();

            let mut ids = Vec::new();
            for handle in handles {
                let record = handle.await.unwrap().unwrap();
                let fetched = JsonDocumentStore::new(&round_dir)
                    .fetch(record.id)
                    .await
                    .unwrap();
                assert_eq!(fetched.title, record.title);
                ids.push(record.id);
            }

            ids.sort_unstable();
            assert_eq!(ids, vec![1, 2, 3, 4]);
        }
    }

    #[tokio::test]
    async fn test_store_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        let store = JsonDocumentStore::new(&blocker);
        let err = store.store(b"a", b"b", "t").await.unwrap_err();
        assert!(matches!(err, StorageError::DirectoryUnavailable { .. }));
    }
}
