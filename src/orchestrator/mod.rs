//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `pipeline` - 摘要流水线
//! - 管理一次运行的生命周期（读取、解析、调度、写入、存储）
//! - 输出全局统计信息
//!
//! ### `scheduler` - 有界并发调度器
//! - 每章一个任务，槽位池限制并发（Semaphore）
//! - 等待所有任务完成，结果按派发顺序返回
//!
//! ### `reassembler` - 结果重组
//! - 按章节编号排序拼接
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (处理整篇文档)
//!     ↓
//! scheduler (处理 Vec<Chapter>)
//!     ↓
//! workflow::ChapterFlow (处理单个 Chapter)
//!     ↓
//! services (能力层：parse / summarize / write / store)
//!     ↓
//! infrastructure (基础设施：SlotPool)
//! ```

pub mod pipeline;
pub mod reassembler;
pub mod scheduler;

pub use pipeline::{App, RunReport};
pub use reassembler::assemble;
pub use scheduler::BoundedScheduler;
