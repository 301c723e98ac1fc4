//! 结果重组
//!
//! 把各章摘要按章节编号升序拼接成一篇完整摘要

use crate::models::SummaryResult;

/// 章节之间的分隔符（空一行）
pub const CHAPTER_SEPARATOR: &str = "\n\n";

/// 拼接最终摘要
///
/// 按 `number` 稳定排序（编号重复时保持输入顺序），失败章节的占位文本同样保留
pub fn assemble(results: &[SummaryResult]) -> String {
    let mut ordered: Vec<&SummaryResult> = results.iter().collect();
    ordered.sort_by_key(|result| result.number);

    ordered
        .iter()
        .map(|result| result.text.as_str())
        .collect::<Vec<_>>()
        .join(CHAPTER_SEPARATOR)
}
