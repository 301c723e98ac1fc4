//! 章节处理流程 - 流程层
//!
//! 核心职责：定义"一章"的完整处理流程
//!
//! 流程顺序：
//! 1. 调用摘要服务
//! 2. 成功 → 记录摘要；失败 → 记录错误并使用占位文本
//! 3. 可选的节流等待（默认关闭）

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::models::{Chapter, SummaryResult};
use crate::services::Summarizer;
use crate::utils::logging::truncate_text;
use crate::workflow::chapter_ctx::ChapterCtx;

/// 章节处理流程
///
/// - 只处理单个章节
/// - 不持有槽位，槽位由调度器在外层持有
/// - 摘要失败不会向上传播，而是写入 `SummaryResult::error`
pub struct ChapterFlow<S> {
    summarizer: Arc<S>,
    pacing: Option<Duration>,
}

impl<S> Clone for ChapterFlow<S> {
    fn clone(&self) -> Self {
        Self {
            summarizer: Arc::clone(&self.summarizer),
            pacing: self.pacing,
        }
    }
}

impl<S: Summarizer> ChapterFlow<S> {
    pub fn new(summarizer: Arc<S>, pacing: Option<Duration>) -> Self {
        Self { summarizer, pacing }
    }

    pub async fn run(&self, chapter: &Chapter, ctx: &ChapterCtx) -> SummaryResult {
        info!("{} ▶ 开始生成摘要", ctx);
        debug!("{} 简介: {}", ctx, truncate_text(&chapter.quick_brief, 60));

        let started = Instant::now();
        let result = match self.summarizer.summarize(chapter).await {
            Ok(text) => {
                info!(
                    "{} ✓ 摘要完成，耗时 {:.2?}，长度 {} 字符",
                    ctx,
                    started.elapsed(),
                    text.chars().count()
                );
                SummaryResult::success(chapter.number, text)
            }
            Err(e) => {
                error!("{} ❌ 摘要失败: {}", ctx, e);
                SummaryResult::failure(chapter.number, e)
            }
        };

        if let Some(pacing) = self.pacing {
            debug!("{} 节流等待 {:?}", ctx, pacing);
            tokio::time::sleep(pacing).await;
        }

        result
    }
}
