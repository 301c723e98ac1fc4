//! 摘要写入服务 - 业务能力层
//!
//! 只负责"把最终摘要写到输出文件"能力，不关心流程

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 摘要写入服务
pub struct SummaryWriter {
    output_path: PathBuf,
}

impl SummaryWriter {
    /// 创建新的摘要写入服务
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 写入最终摘要（UTF-8），不存在的上级目录会被创建，已存在的文件会被覆盖
    pub async fn write(&self, summary: &str) -> AppResult<()> {
        let path_str = self.output_path.display().to_string();
        debug!("写入摘要: {} | 长度: {} 字节", path_str, summary.len());

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::file_write_failed(&path_str, e))?;
            }
        }

        fs::write(&self.output_path, summary.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(&path_str, e))?;

        Ok(())
    }
}
