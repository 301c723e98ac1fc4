//! 章节解析 - 业务能力层
//!
//! 只负责"把原文切分成章节"能力
//!
//! ## 文档格式
//!
//! ```text
//! 1                 <- 章节编号（整行只有数字）
//! Intro             <- 标题
//! Brief one         <- 一行简介
//! Body A ...        <- 正文（零行或多行）
//! 2
//! ...
//! ```
//!
//! 一章从"编号行 + 非空行"开始，到下一个编号行或文档末尾结束。

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ParseError;
use crate::models::Chapter;

/// 章节起始：行首的纯数字行，紧跟一个非空行
///
/// 只匹配到标题行为止，这样相邻章节之间即使没有空行也能被正确切开
static CHAPTER_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[0-9]+\n[^\n]+").expect("章节起始正则必须合法")
});

/// 解析整篇文档
///
/// # 参数
/// - `document`: 文档全文（换行符为 `\n`）
///
/// # 返回
/// 按文档中出现顺序排列的章节列表（不保证按编号排序）。
/// 任意一章结构错误都会导致整篇文档解析失败。
pub fn parse_chapters(document: &str) -> Result<Vec<Chapter>, ParseError> {
    let starts: Vec<usize> = CHAPTER_HEADER
        .find_iter(document)
        .map(|m| m.start())
        .collect();

    if let Some(&first) = starts.first() {
        if first > 0 {
            debug!("跳过第一章之前的 {} 字节内容", first);
        }
    }

    let mut chapters = Vec::with_capacity(starts.len());
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(document.len());
        chapters.push(build_chapter(&document[start..end], start)?);
    }

    Ok(chapters)
}

/// 把一段章节文本构造成 `Chapter`
///
/// 第 0 行是编号，第 1 行是标题，第 2 行是简介，其余行合并为正文
fn build_chapter(span: &str, offset: usize) -> Result<Chapter, ParseError> {
    let lines: Vec<&str> = span.trim_end_matches('\n').split('\n').collect();
    let token = lines[0];

    let number = token
        .parse::<u64>()
        .map_err(|source| ParseError::InvalidChapterNumber {
            token: token.to_string(),
            offset,
            source,
        })?;

    if lines.len() < 3 {
        return Err(ParseError::ChapterTooShort {
            token: token.to_string(),
            offset,
            lines: lines.len(),
        });
    }

    Ok(Chapter::new(number, lines[1], lines[2], lines[3..].join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_chapters() {
        let doc = "1\nIntro\nBrief one\nBody A\n2\nNext\nBrief two\nBody B\n";
        let chapters = parse_chapters(doc).unwrap();

        assert_eq!(
            chapters,
            vec![
                Chapter::new(1, "Intro", "Brief one", "Body A"),
                Chapter::new(2, "Next", "Brief two", "Body B"),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let doc = "3\nThird\nb3\n\n1\nFirst\nb1\nline\n\n10\nTenth\nb10\n";
        let chapters = parse_chapters(doc).unwrap();

        let numbers: Vec<u64> = chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![3, 1, 10]);
        assert_eq!(chapters[1].body, "line");
        assert_eq!(chapters[2].body, "");
    }

    #[test]
    fn test_parse_multiline_body() {
        let doc = "7\nTitle\nBrief\nfirst paragraph\n\nsecond paragraph\n";
        let chapters = parse_chapters(doc).unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].body, "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn test_parse_skips_preamble() {
        let doc = "The Art of Thinking Clearly\nby someone\n\n1\nIntro\nBrief\nBody\n";
        let chapters = parse_chapters(doc).unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Intro");
    }

    #[test]
    fn test_parse_without_headers_is_empty() {
        assert!(parse_chapters("").unwrap().is_empty());
        assert!(parse_chapters("just some prose\nwithout numbers\n").unwrap().is_empty());
    }

    #[test]
    fn test_chapter_too_short_is_fatal() {
        let err = parse_chapters("1\nTitle only\n").unwrap_err();
        assert!(matches!(err, ParseError::ChapterTooShort { lines: 2, .. }));

        // 第一章缺少简介，后面的章节即使合法也不返回
        let err = parse_chapters("1\nTitle\n2\nNext\nBrief\nBody\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ChapterTooShort { ref token, offset: 0, .. } if token == "1"
        ));
    }

    #[test]
    fn test_unparsable_number_is_fatal() {
        let err = parse_chapters("99999999999999999999999\nTitle\nBrief\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidChapterNumber { .. }));
    }

    #[test]
    fn test_parse_large_chapter_number() {
        let chapters = parse_chapters("4294967296\nTitle\nBrief\n").unwrap();
        assert_eq!(chapters[0].number, 4_294_967_296);
    }
}
