//! 试卷文本分段引擎 - 核心层
//!
//! 核心职责：把一整块试卷文本切分为按序的题目记录
//!
//! 流程顺序：
//! 1. 逐行扫描 → 识别题号标记行
//! 2. 累积题目正文（标记行首个片段 + 后续续行）
//! 3. 定稿时提取关键词、分配元数据
//!
//! 引擎是纯粹的同步计算：不做 IO、不持有全局状态，多个独立调用可以安全并发。

use crate::config::Config;
use crate::engine::keywords::{KeywordConfig, KeywordExtractor};
use crate::engine::metadata::{MetadataClassifier, QuestionMeta, RandomClassifier};
use crate::error::{AppError, AppResult};
use crate::models::question::QuestionRecord;
use regex::Regex;
use tracing::{debug, warn};

/// 默认题号标记模式：行首数字串 + `.` 或 `)` + 至少一个空白 + 非空剩余文本
pub const DEFAULT_MARKER_PATTERN: &str = r"^(\d+)[.)]\s+(.+)$";

/// 单道题目正文的默认累积上限（字符数）
pub const DEFAULT_MAX_BODY_CHARS: usize = 20000;

/// 分段引擎配置
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// 题号标记模式（作用于去除首尾空白后的行）
    pub marker_pattern: String,
    /// 单道题目正文的累积上限（防御性安全边界，不是行为约定）
    pub max_body_chars: usize,
    /// 关键词提取配置
    pub keywords: KeywordConfig,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            marker_pattern: DEFAULT_MARKER_PATTERN.to_string(),
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
            keywords: KeywordConfig::default(),
        }
    }
}

/// 逐行扫描的状态机
///
/// 状态转移规则：
/// - `Idle` + 标记行 → `Building`（开启新累积器）
/// - `Idle` + 普通行 → `Idle`（首个标记之前的文本被丢弃）
/// - `Building` + 标记行 → 定稿当前题目，开启新累积器
/// - `Building` + 普通行 → 追加到当前正文
/// - 输入结束 + `Building` → 定稿最后一道题目
enum SegmentState {
    /// 尚未遇到任何标记行
    Idle,
    /// 正在累积一道题目
    Building(PendingQuestion),
}

/// 累积器：正在拼装中的题目
struct PendingQuestion {
    number: u32,
    body: String,
    truncated: bool,
}

impl PendingQuestion {
    fn new(number: u32, first_fragment: &str) -> Self {
        Self {
            number,
            body: first_fragment.to_string(),
            truncated: false,
        }
    }

    /// 追加一条续行，单空格连接；超出上限的部分被丢弃
    fn append(&mut self, line: &str, max_body_chars: usize) {
        if self.body.len() + 1 + line.len() > max_body_chars {
            if !self.truncated {
                warn!(
                    "题目 {} 正文超出 {} 字符上限，丢弃后续续行",
                    self.number, max_body_chars
                );
                self.truncated = true;
            }
            return;
        }
        self.body.push(' ');
        self.body.push_str(line);
    }
}

/// 试卷文本分段引擎
///
/// 契约：`segment(text)` 返回按输入顺序排列的题目记录序列。
/// 畸形输入不会导致错误，只会产出更少（或零条）记录。
pub struct Segmenter {
    marker_pattern: Regex,
    keyword_extractor: KeywordExtractor,
    classifier: Box<dyn MetadataClassifier>,
    max_body_chars: usize,
}

impl Segmenter {
    /// 使用默认配置和随机元数据分类器创建引擎
    pub fn new() -> Self {
        Self {
            // 默认标记模式是编译期常量，编译必然成功
            marker_pattern: Regex::new(DEFAULT_MARKER_PATTERN).expect("默认标记模式必须可编译"),
            keyword_extractor: KeywordExtractor::new(),
            classifier: Box::new(RandomClassifier::new()),
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
        }
    }

    /// 使用自定义配置和分类器创建引擎
    pub fn with_config(
        config: SegmenterConfig,
        classifier: Box<dyn MetadataClassifier>,
    ) -> AppResult<Self> {
        let marker_pattern = Regex::new(&config.marker_pattern)
            .map_err(|e| AppError::pattern_invalid(config.marker_pattern.clone(), e))?;

        Ok(Self {
            marker_pattern,
            keyword_extractor: KeywordExtractor::with_config(config.keywords)?,
            classifier,
            max_body_chars: config.max_body_chars,
        })
    }

    /// 从程序配置装配引擎（随机分类器 + 配置中的关键词上限）
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::with_config(
            SegmenterConfig {
                max_body_chars: config.max_body_chars,
                keywords: KeywordConfig {
                    max_keywords: config.max_keywords,
                    ..KeywordConfig::default()
                },
                ..SegmenterConfig::default()
            },
            Box::new(RandomClassifier::new()),
        )
    }

    /// 把一整块试卷文本切分为按序的题目记录
    ///
    /// # 参数
    /// - `text`: 已由上传端解码的纯文本
    ///
    /// # 返回
    /// 按题号标记在输入中出现的顺序返回记录；没有标记则返回空序列
    pub fn segment(&self, text: &str) -> Vec<QuestionRecord> {
        let mut records = Vec::new();
        let mut state = SegmentState::Idle;

        for raw_line in text.lines() {
            let line = raw_line.trim();

            // 空行只作分隔，既不开题也不进正文
            if line.is_empty() {
                continue;
            }

            if let Some(number_and_fragment) = self.match_marker(line) {
                let (number, fragment) = number_and_fragment;

                // 遇到新标记：先定稿已打开的累积器
                if let SegmentState::Building(pending) =
                    std::mem::replace(&mut state, SegmentState::Idle)
                {
                    records.push(self.finalize(pending));
                }

                state = SegmentState::Building(PendingQuestion::new(number, fragment));
                continue;
            }

            match &mut state {
                SegmentState::Building(pending) => {
                    pending.append(line, self.max_body_chars);
                }
                SegmentState::Idle => {
                    // 首个标记之前的普通行：没有可附着的累积器，丢弃
                    debug!("丢弃标记前的文本行: {}", line);
                }
            }
        }

        // 输入结束：定稿最后一道题目
        if let SegmentState::Building(pending) = state {
            records.push(self.finalize(pending));
        }

        records
    }

    /// 尝试把一行识别为题号标记行
    ///
    /// 数字串解析失败（例如超长数字）时按普通文本处理
    fn match_marker<'a>(&self, line: &'a str) -> Option<(u32, &'a str)> {
        let caps = self.marker_pattern.captures(line)?;
        let number = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let fragment = caps.get(2)?.as_str();
        Some((number, fragment))
    }

    /// 把累积器定稿为一条题目记录
    fn finalize(&self, pending: PendingQuestion) -> QuestionRecord {
        let text = pending.body.trim().to_string();
        let keywords = self.keyword_extractor.extract(&text);
        let QuestionMeta { marks, difficulty } = self.classifier.classify(&text);

        QuestionRecord {
            question_number: pending.number,
            question_text: text,
            marks,
            difficulty,
            keywords,
        }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}
