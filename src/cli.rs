//! 命令行参数
//!
//! 只做参数解析和覆盖配置，不包含任何业务逻辑

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "docsum",
    version,
    about = "按章节并发生成纯文本文档的摘要",
    after_help = "文档格式：每章以一行纯数字的章节编号开始，随后依次是标题行、一行简介和正文。\n\
                  API Key 可通过 --key、SECRET_KEY 或 OPENAI_API_KEY 提供。"
)]
pub struct Cli {
    /// 输入文档路径
    #[arg(short, long)]
    pub input: Option<String>,

    /// 摘要输出路径
    #[arg(short, long)]
    pub output: Option<String>,

    /// 同时处理的章节数量（至少为 1）
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// 摘要服务的 API Key
    #[arg(short, long)]
    pub key: Option<String>,

    /// TOML 配置文件路径（默认读取当前目录下的 docsum.toml）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 文档标题（默认使用输入文件名）
    #[arg(long)]
    pub title: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// OpenAI 兼容接口地址
    #[arg(long)]
    pub api_base: Option<String>,

    /// 文档记录存放目录
    #[arg(long)]
    pub store_dir: Option<String>,

    /// 不保存文档记录
    #[arg(long, conflicts_with = "store_dir")]
    pub no_store: bool,

    /// 每章完成后的额外等待（毫秒）
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// 显示详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置（只覆盖显式给出的参数）
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_chapters = concurrency;
        }
        if let Some(key) = self.key.filter(|k| !k.is_empty()) {
            config.llm_api_key = Some(key);
        }
        if let Some(title) = self.title {
            config.document_title = Some(title);
        }
        if let Some(model) = self.model {
            config.llm_model_name = model;
        }
        if let Some(api_base) = self.api_base {
            config.llm_api_base_url = api_base;
        }
        if let Some(store_dir) = self.store_dir {
            config.store_dir = Some(store_dir);
        }
        if self.no_store {
            config.store_dir = None;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.pacing_ms = pacing_ms;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}
