use crate::error::SummarizeError;

/// 章节
///
/// 由章节解析器从原文中构造，构造后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 文档中声明的章节编号（不一定连续，也不一定从 1 开始）
    pub number: u64,
    pub title: String,
    /// 一行简介，作为上下文传给摘要服务
    pub quick_brief: String,
    /// 正文，可以为空
    pub body: String,
}

impl Chapter {
    pub fn new(
        number: u64,
        title: impl Into<String>,
        quick_brief: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            quick_brief: quick_brief.into(),
            body: body.into(),
        }
    }
}

/// 单章摘要结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// 与源章节相同的编号，用于排序
    pub number: u64,
    /// 摘要内容；失败时为占位文本
    pub text: String,
    pub error: Option<SummarizeError>,
}

impl SummaryResult {
    /// 摘要成功
    pub fn success(number: u64, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            error: None,
        }
    }

    /// 摘要失败，正文替换为占位文本
    pub fn failure(number: u64, error: SummarizeError) -> Self {
        Self {
            number,
            text: placeholder_text(number),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 摘要失败章节的占位文本
pub fn placeholder_text(number: u64) -> String {
    format!("------ Summary of Chapter {}: [summary unavailable]", number)
}
