//! 提取核心（Engine Layer）
//!
//! ## 职责
//!
//! 本层是整个系统里唯一包含算法的部分：输入一块纯文本，输出按序的题目记录。
//!
//! ## 模块划分
//!
//! ### `segmenter` - 分段引擎
//! - 逐行扫描，识别题号标记行
//! - 显式状态机（空闲 / 累积中）驱动转移
//! - 定稿时触发关键词提取和元数据分配
//!
//! ### `keywords` - 关键词提取
//! - 小写化 → 词条扫描 → 停用词过滤 → 去重截断
//!
//! ### `metadata` - 元数据分配
//! - `MetadataClassifier` 接口 + 随机参考实现
//!
//! ## 设计原则
//!
//! 1. **纯计算**：本层不做任何 IO，不持有全局状态
//! 2. **可并发**：多个独立调用之间没有共享可变状态
//! 3. **不吞错误**：畸形输入产出更少记录，而不是失败

pub mod keywords;
pub mod metadata;
pub mod segmenter;

pub use keywords::{KeywordConfig, KeywordExtractor};
pub use metadata::{MetadataClassifier, QuestionMeta, RandomClassifier};
pub use segmenter::{Segmenter, SegmenterConfig};
