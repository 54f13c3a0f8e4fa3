//! 元数据分配 - 核心层
//!
//! 为定稿的题目正文分配分值和难度。
//!
//! 当前的默认实现是纯随机占位逻辑：分值在 [1, 10] 内均匀抽取，难度在三个
//! 等级中均匀抽取，与题目内容完全无关。这是文档化的既定行为，不是缺陷；
//! [`MetadataClassifier`] 是替换缝隙，后续基于内容的分类器可以在不触碰
//! 分段引擎的前提下接入。

use crate::models::question::Difficulty;
use rand::Rng;

/// 分值下限
pub const MIN_MARKS: u8 = 1;
/// 分值上限
pub const MAX_MARKS: u8 = 10;

/// 单道题目的元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMeta {
    pub marks: u8,
    pub difficulty: Difficulty,
}

/// 元数据分类器接口
///
/// 输入定稿的题目正文，输出分值与难度
pub trait MetadataClassifier: Send + Sync {
    fn classify(&self, text: &str) -> QuestionMeta;
}

/// 随机元数据分类器（参考实现）
///
/// 分值和难度均为均匀随机，与正文内容无关。
/// 两次对同一正文的调用允许返回不同结果。
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomClassifier;

impl RandomClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataClassifier for RandomClassifier {
    fn classify(&self, _text: &str) -> QuestionMeta {
        let mut rng = rand::thread_rng();

        QuestionMeta {
            marks: rng.gen_range(MIN_MARKS..=MAX_MARKS),
            difficulty: Difficulty::ALL[rng.gen_range(0..Difficulty::ALL.len())],
        }
    }
}
