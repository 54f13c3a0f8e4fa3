use serde::{Deserialize, Serialize};

/// 难度等级枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 简单
    Easy,
    /// 中等
    Medium,
    /// 困难
    Hard,
}

impl Difficulty {
    /// 全部难度等级（随机分类器按下标均匀抽取）
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// 尝试从字符串解析难度（精确匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 从试卷文本中提取出的单道题目记录
///
/// 由分段引擎在一次解析调用中构建，构建后不再修改；
/// 整个序列的所有权转移给调用方，由下游存储方负责持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 题号（取自原文标记，不保证唯一或递增）
    pub question_number: u32,
    /// 题目正文（首行片段加所有续行，单空格连接，两端已去空白）
    pub question_text: String,
    /// 分值，范围 [1, 10]
    pub marks: u8,
    /// 难度等级
    pub difficulty: Difficulty,
    /// 关键词（小写、去重、按首次出现顺序，数量有上限）
    pub keywords: Vec<String>,
}
