//! 摘要流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行的资源管理和阶段调度。
//!
//! ## 核心流程
//!
//! 1. **读取原文**：读取输入文件，统一换行符
//! 2. **解析章节**：结构错误直接终止，不派发任何任务
//! 3. **并发摘要**：委托 `BoundedScheduler`，单章失败不影响整体
//! 4. **重组结果**：按章节编号排序拼接
//! 5. **写入文件**：先写输出文件
//! 6. **保存记录**：再写存储，存储失败不影响已写出的文件

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::fs;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::DocumentRecord;
use crate::orchestrator::reassembler::assemble;
use crate::orchestrator::scheduler::BoundedScheduler;
use crate::services::{
    parse_chapters, DocumentStore, JsonDocumentStore, LlmService, Summarizer, SummaryWriter,
};
use crate::utils::logging::{log_chapters_loaded, log_startup, print_final_stats};

/// 应用主结构
pub struct App<S = LlmService, D = JsonDocumentStore> {
    config: Config,
    summarizer: Arc<S>,
    store: Option<D>,
    writer: SummaryWriter,
}

/// 单次运行结果
#[derive(Debug, Clone)]
pub struct RunReport {
    /// 解析出的章节数
    pub chapters: usize,
    /// 摘要失败的章节数
    pub failed: usize,
    /// 合并后的摘要
    pub summary: String,
    /// 保存的文档记录（未配置存储时为 `None`）
    pub record: Option<DocumentRecord>,
    pub elapsed: Duration,
}

impl App {
    /// 初始化应用
    ///
    /// 缺少凭证或并发数非法时直接失败，不读取任何输入
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        log_startup(&config);

        let summarizer = LlmService::new(&config)?;
        let store = config.store_dir.as_deref().map(JsonDocumentStore::new);

        Ok(Self::with_components(config, summarizer, store))
    }
}

impl<S, D> App<S, D>
where
    S: Summarizer + Send + Sync + 'static,
    D: DocumentStore,
{
    /// 使用指定的摘要服务和存储创建应用
    pub fn with_components(config: Config, summarizer: S, store: Option<D>) -> Self {
        let writer = SummaryWriter::new(&config.output_path);
        Self {
            config,
            summarizer: Arc::new(summarizer),
            store,
            writer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunReport> {
        let started = Instant::now();

        // 读取原文
        let source = self.load_source().await?;
        let document = decode_document(&source);

        // 解析章节
        let chapters = parse_chapters(&document)?;

        if chapters.is_empty() {
            warn!("⚠️ 没有找到任何章节，程序结束");
            return Ok(RunReport {
                chapters: 0,
                failed: 0,
                summary: String::new(),
                record: None,
                elapsed: started.elapsed(),
            });
        }

        log_chapters_loaded(&chapters);
        let total = chapters.len();

        // 并发摘要
        let results = BoundedScheduler::new(self.config.max_concurrent_chapters)
            .with_pacing(self.config.pacing())
            .run(chapters, Arc::clone(&self.summarizer))
            .await?;
        let failed = results.iter().filter(|r| !r.is_success()).count();

        // 重组并写入文件
        let summary = assemble(&results);
        self.writer.write(&summary).await?;
        info!("💾 摘要已写入: {}", self.writer.output_path().display());

        // 保存记录（必须在写文件之后）
        let record = self.store_record(&source, &summary).await?;

        let elapsed = started.elapsed();
        print_final_stats(total - failed, failed, &self.config.output_path, elapsed);

        Ok(RunReport {
            chapters: total,
            failed,
            summary,
            record,
            elapsed,
        })
    }

    async fn load_source(&self) -> AppResult<Vec<u8>> {
        info!("\n📁 正在读取文档: {}", self.config.input_path);
        fs::read(&self.config.input_path)
            .await
            .map_err(|e| AppError::file_read_failed(&self.config.input_path, e))
    }

    async fn store_record(&self, source: &[u8], summary: &str) -> AppResult<Option<DocumentRecord>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };

        let title = self.config.title();
        match store.store(source, summary.as_bytes(), &title).await {
            Ok(record) => {
                info!("🗄️ 文档记录已保存: #{} {}", record.id, record.title);
                Ok(Some(record))
            }
            Err(e) => {
                error!(
                    "❌ 保存文档记录失败（摘要文件已写入 {}）: {}",
                    self.config.output_path, e
                );
                Err(e.into())
            }
        }
    }
}

/// 解码原文并统一换行符
fn decode_document(source: &[u8]) -> String {
    let text = match std::str::from_utf8(source) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("⚠️ 文档不是合法的 UTF-8（{}），按有损方式解码", e);
            String::from_utf8_lossy(source).into_owned()
        }
    };

    text.replace("\r\n", "\n")
}
