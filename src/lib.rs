//! # Exam Question Extract
//!
//! 一个从试卷文本中批量提取题目记录的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 提取核心（Engine）
//! - `engine/` - 唯一包含算法的部分，纯计算、无 IO
//! - `Segmenter` - 逐行分段状态机
//! - `KeywordExtractor` - 关键词提取
//! - `MetadataClassifier` - 元数据分配接缝（随机参考实现）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个对象
//! - `TextReader` - 读取并截断试卷文本能力
//! - `QuestionStore` - 持久化接缝（JSONL 参考实现）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份试卷"的完整提取流程
//! - `PaperCtx` - 上下文封装（paper_index + title）
//! - `PaperFlow` - 流程编排（read → segment → 交还编排层）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量试卷处理器，管理并发与顺序落盘
//!
//! ## 模块结构

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use engine::{
    KeywordConfig, KeywordExtractor, MetadataClassifier, QuestionMeta, RandomClassifier,
    Segmenter, SegmenterConfig,
};
pub use error::{AppError, AppResult};
pub use models::{Difficulty, PaperManifest, QuestionRecord};
pub use orchestrator::App;
pub use services::{JsonlStore, QuestionStore, TextReader};
pub use workflow::{ExtractedPaper, PaperCtx, PaperFlow, ProcessResult};
