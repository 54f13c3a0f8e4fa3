//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PaperManifest>)
//!     ↓
//! workflow::PaperFlow (处理单份试卷)
//!     ↓
//! services (能力层：text_reader / paper_store)
//!     ↓
//! engine (提取核心：segmenter / keywords / metadata)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，workflow 管单份
//! 2. **资源隔离**：只有编排层持有存储
//! 3. **顺序落盘**：提取并发，持久化按提交顺序，保证批次结果确定

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
