/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的试卷数量
    pub max_concurrent_papers: usize,
    /// 上传文本与清单文件存放目录
    pub upload_folder: String,
    /// 提取结果输出目录
    pub output_folder: String,
    /// 单份试卷文本的最大读取字符数（上传端截断策略，超出部分被静默丢弃）
    pub max_text_chars: usize,
    /// 单道题目正文的最大累积字符数（防御性上限）
    pub max_body_chars: usize,
    /// 每道题目保留的关键词数量上限
    pub max_keywords: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_papers: 4,
            upload_folder: "uploads".to_string(),
            output_folder: "extracted".to_string(),
            max_text_chars: 5000,
            max_body_chars: 20000,
            max_keywords: 5,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_papers: std::env::var("MAX_CONCURRENT_PAPERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_papers),
            upload_folder: std::env::var("UPLOAD_FOLDER").unwrap_or(default.upload_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            max_text_chars: std::env::var("MAX_TEXT_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_text_chars),
            max_body_chars: std::env::var("MAX_BODY_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_body_chars),
            max_keywords: std::env::var("MAX_KEYWORDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_keywords),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
