/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::Chapter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时使用 info，`verbose` 为 true 时使用 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 本次运行的配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 章节摘要模式");
    info!("📄 输入文件: {}", config.input_path);
    info!("💾 输出文件: {}", config.output_path);
    info!("📊 最大并发数: {}", config.max_concurrent_chapters);
    info!("🤖 模型: {}", config.llm_model_name);
    if let Some(pacing) = config.pacing() {
        info!("⏱️ 节流等待: {:?}", pacing);
    }
    info!("{}", "=".repeat(60));
}

/// 记录章节加载信息
///
/// # 参数
/// - `chapters`: 解析出的章节列表
pub fn log_chapters_loaded(chapters: &[Chapter]) {
    info!("------------ 章节数量: {} ------------", chapters.len());
    for (index, chapter) in chapters.iter().enumerate() {
        info!(
            "  {:>3}. 第 {} 章: {}",
            index + 1,
            chapter.number,
            truncate_text(&chapter.title, 50)
        );
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `output_path`: 摘要输出路径
/// - `elapsed`: 总耗时
pub fn print_final_stats(success: usize, failed: usize, output_path: &str, elapsed: Duration) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("❌ 失败: {}", failed);
    info!("⏱️ 总耗时: {:.2?}", elapsed);
    info!("{}", "=".repeat(60));
    info!("\n摘要已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("认知偏差清单", 2), "认知...");
    }
}
