//! 摘要服务接口
//!
//! 调度器只依赖这个能力，不关心背后是哪家模型

use std::future::Future;

use crate::error::SummarizeError;
use crate::models::Chapter;

/// 摘要能力
///
/// 实现者只处理单个章节：
/// - 不出现 Vec<Chapter>
/// - 不关心并发和排序
/// - 失败时返回 `SummarizeError`，由调用方决定如何降级
pub trait Summarizer {
    /// 生成单章摘要
    fn summarize(
        &self,
        chapter: &Chapter,
    ) -> impl Future<Output = Result<String, SummarizeError>> + Send;
}
