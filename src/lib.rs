//! # docsum
//!
//! 把按章节组织的纯文本文档切分成章节，并发调用 LLM 生成每章摘要，
//! 再按章节编号拼接成完整摘要。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有共享资源，只暴露能力
//! - `SlotPool` - 固定容量的并发槽位池，提供 acquire() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个对象
//! - `chapter_parser` - 原文 → 章节列表
//! - `LlmService` - 单章摘要能力（实现 `Summarizer`）
//! - `SummaryWriter` - 写输出文件能力
//! - `JsonDocumentStore` - 保存文档记录能力（实现 `DocumentStore`）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一章"的完整处理流程
//! - `ChapterCtx` - 上下文封装（派发序号 + 章节编号）
//! - `ChapterFlow` - 流程编排（summarize → 成功/占位 → 节流）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/scheduler` - 有界并发调度器
//! - `orchestrator/reassembler` - 按编号重组结果
//! - `orchestrator/pipeline` - 一次完整运行
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::SlotPool;
pub use models::{Chapter, DocumentRecord, SummaryResult};
pub use orchestrator::{assemble, App, BoundedScheduler, RunReport};
pub use services::{parse_chapters, DocumentStore, Summarizer};
pub use workflow::{ChapterCtx, ChapterFlow};
