//! 有界并发调度器 - 编排层
//!
//! ## 职责
//!
//! 为每一章启动一个并发任务，任务在调用摘要服务前先获取槽位，
//! 调用结束（无论成功失败）后归还槽位。
//!
//! ## 保证
//!
//! - 同一时刻最多 `concurrency_limit` 个摘要调用在进行
//! - 返回结果与输入一一对应：`results[i]` 对应 `chapters[i]`
//! - 单章失败不影响其他章节，所有任务结束后才返回
//! - 结果按派发顺序返回，不按章节编号排序

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info};

use crate::error::{ConfigError, SummarizeError};
use crate::infrastructure::SlotPool;
use crate::models::{Chapter, SummaryResult};
use crate::services::Summarizer;
use crate::workflow::{ChapterCtx, ChapterFlow};

/// 有界并发调度器
#[derive(Debug, Clone)]
pub struct BoundedScheduler {
    concurrency_limit: usize,
    pacing: Option<Duration>,
}

impl BoundedScheduler {
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit,
            pacing: None,
        }
    }

    /// 每章完成后在槽位内额外等待（默认关闭）
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// 调度所有章节
    ///
    /// # 返回
    /// 与 `chapters` 等长、逐项对应的结果列表。
    /// 并发数非法时在派发任何任务之前返回 `ConfigError`。
    pub async fn run<S>(
        &self,
        chapters: Vec<Chapter>,
        summarizer: Arc<S>,
    ) -> Result<Vec<SummaryResult>, ConfigError>
    where
        S: Summarizer + Send + Sync + 'static,
    {
        let pool = SlotPool::new(self.concurrency_limit)?;

        if chapters.is_empty() {
            return Ok(Vec::new());
        }

        let total = chapters.len();
        let flow = ChapterFlow::new(summarizer, self.pacing);
        let mut numbers = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        for (index, chapter) in chapters.into_iter().enumerate() {
            let ctx = ChapterCtx::new(index + 1, total, &chapter);
            debug!("{} 加入调度", ctx);
            numbers.push(chapter.number);

            let pool = pool.clone();
            let flow = flow.clone();

            handles.push(tokio::spawn(async move {
                let _permit = match pool.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return SummaryResult::failure(
                            chapter.number,
                            SummarizeError::Aborted(e.to_string()),
                        );
                    }
                };
                flow.run(&chapter, &ctx).await
            }));
        }

        info!(
            "⏳ 已派发 {} 个章节任务，最大并发数 {}，等待全部完成...",
            total,
            pool.capacity()
        );

        // 按派发顺序收集，每个任务只写自己的那一项
        let results: Vec<SummaryResult> = join_all(handles)
            .await
            .into_iter()
            .zip(numbers)
            .map(|(joined, number)| match joined {
                Ok(result) => result,
                Err(e) => {
                    error!("[章节#{}] 任务执行失败: {}", number, e);
                    SummaryResult::failure(number, SummarizeError::Aborted(e.to_string()))
                }
            })
            .collect();

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!("✓ 所有章节任务完成: 成功 {}/{}", total - failed, total);

        Ok(results)
    }
}
