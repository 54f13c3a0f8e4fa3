//! 关键词提取 - 核心层
//!
//! 从单道题目的正文中提取少量显著词条：
//! 全文转小写 → 扫描连续小写字母段 → 过滤停用词 → 按首次出现顺序去重 → 截断

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::collections::HashSet;

/// 默认词条模式：长度不少于 4 的连续小写字母段
///
/// 4 个字母的下限是硬性下限而不是可调配置，数字、标点和短词永远不是候选词条
pub const DEFAULT_TOKEN_PATTERN: &str = "[a-z]{4,}";

/// 每道题目保留的关键词数量上限（默认值）
pub const DEFAULT_MAX_KEYWORDS: usize = 5;

/// 默认停用词表：冠词、连词、常见介词、常见疑问词
///
/// 可通过 [`KeywordConfig::stop_words`] 整体替换以支持其他语言
static DEFAULT_STOP_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to",
    "for", "of", "with", "is", "are", "was", "were",
    "what", "how", "why", "when", "where",
};

/// 关键词提取配置
#[derive(Debug, Clone)]
pub struct KeywordConfig {
    /// 词条模式（正则表达式，作用于转小写后的文本）
    pub token_pattern: String,
    /// 自定义停用词表；None 表示使用内置默认表
    pub stop_words: Option<HashSet<String>>,
    /// 保留的关键词数量上限
    pub max_keywords: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stop_words: None,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }
}

/// 关键词提取服务
///
/// 职责：
/// - 只处理单道题目的正文
/// - 输出小写、去重、按首次出现顺序排列的关键词
/// - 不关心题目来自哪份试卷
pub struct KeywordExtractor {
    token_pattern: Regex,
    stop_words: Option<HashSet<String>>,
    max_keywords: usize,
}

impl KeywordExtractor {
    /// 使用默认配置创建提取器
    pub fn new() -> Self {
        Self {
            // 默认模式是编译期常量，编译必然成功
            token_pattern: Regex::new(DEFAULT_TOKEN_PATTERN).expect("默认词条模式必须可编译"),
            stop_words: None,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    /// 使用自定义配置创建提取器
    pub fn with_config(config: KeywordConfig) -> AppResult<Self> {
        let token_pattern = Regex::new(&config.token_pattern)
            .map_err(|e| AppError::pattern_invalid(config.token_pattern.clone(), e))?;

        Ok(Self {
            token_pattern,
            stop_words: config.stop_words,
            max_keywords: config.max_keywords,
        })
    }

    /// 从题目正文中提取关键词
    ///
    /// # 参数
    /// - `text`: 题目正文
    ///
    /// # 返回
    /// 返回小写关键词列表，数量不超过配置上限
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for token in self.token_pattern.find_iter(&lowered) {
            if keywords.len() >= self.max_keywords {
                break;
            }

            let word = token.as_str();
            if self.is_stop_word(word) {
                continue;
            }
            if !seen.insert(word.to_string()) {
                continue;
            }

            keywords.push(word.to_string());
        }

        keywords
    }

    /// 判断是否为停用词
    fn is_stop_word(&self, word: &str) -> bool {
        match &self.stop_words {
            Some(custom) => custom.contains(word),
            None => DEFAULT_STOP_WORDS.contains(word),
        }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_excluded() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("What is the derivative of velocity");

        assert_eq!(keywords, vec!["derivative", "velocity"]);
    }

    #[test]
    fn test_short_words_and_digits_never_candidates() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("Let x2 = 42, sum all odd terms below 100");

        // "sum"、"odd"、"all" 不足 4 个字母，数字和标点不是词条
        assert_eq!(keywords, vec!["terms", "below"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("velocity then force then velocity then force again");

        assert_eq!(keywords, vec!["velocity", "then", "force", "again"]);
    }

    #[test]
    fn test_capped_at_five() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor
            .extract("alpha bravo charlie delta echo foxtrot golf hotel");

        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords, vec!["alpha", "bravo", "charlie", "delta", "echo"]);
    }

    #[test]
    fn test_lowercasing_applied_before_scan() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("EXPLAIN Newton's THIRD law");

        assert_eq!(keywords, vec!["explain", "newton", "third"]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let extractor = KeywordExtractor::new();
        let first = extractor.extract("Describe the photoelectric effect and its threshold frequency");
        let second = extractor.extract(&first.join(" "));

        // 对自身输出重跑不会引入原文之外的新词条
        for word in &second {
            assert!(first.contains(word), "意外的新关键词: {}", word);
        }
    }

    #[test]
    fn test_custom_stop_words_replace_builtin() {
        let mut stop_words = HashSet::new();
        stop_words.insert("velocity".to_string());

        let extractor = KeywordExtractor::with_config(KeywordConfig {
            stop_words: Some(stop_words),
            ..KeywordConfig::default()
        })
        .unwrap();

        let keywords = extractor.extract("what is the velocity of light");
        // 自定义表整体替换内置表："what" 等不再被过滤
        assert_eq!(keywords, vec!["what", "light"]);
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = KeywordExtractor::with_config(KeywordConfig {
            token_pattern: "[a-".to_string(),
            ..KeywordConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_text_yields_no_keywords() {
        let extractor = KeywordExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("a an the 42 !!").is_empty());
    }
}
