//! 章节处理上下文
//!
//! 封装"我正在处理第几个派发单元、哪一章"这一信息，只用于日志

use std::fmt::Display;

use crate::models::Chapter;

/// 章节处理上下文
#[derive(Debug, Clone)]
pub struct ChapterCtx {
    /// 派发顺序（从1开始）
    pub dispatch_index: usize,

    /// 本次运行的章节总数
    pub total: usize,

    /// 章节编号
    pub number: u64,

    /// 章节标题
    pub title: String,
}

impl ChapterCtx {
    pub fn new(dispatch_index: usize, total: usize, chapter: &Chapter) -> Self {
        Self {
            dispatch_index,
            total,
            number: chapter.number,
            title: chapter.title.clone(),
        }
    }
}

impl Display for ChapterCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[任务 {}/{} 章节#{} {}]",
            self.dispatch_index, self.total, self.number, self.title
        )
    }
}
