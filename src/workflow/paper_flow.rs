//! 试卷处理流程 - 流程层
//!
//! 核心职责：定义"一份试卷"的完整提取流程
//!
//! 流程顺序：
//! 1. 读取文本（应用上传端截断策略）
//! 2. 分段引擎提取题目记录
//! 3. 把提取结果交还编排层（持久化按提交顺序统一进行）

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::Segmenter;
use crate::models::paper::PaperManifest;
use crate::models::question::QuestionRecord;
use crate::services::TextReader;
use crate::workflow::paper_ctx::PaperCtx;

/// 一份试卷的提取结果
#[derive(Debug)]
pub struct ExtractedPaper {
    pub manifest: PaperManifest,
    pub records: Vec<QuestionRecord>,
}

/// 试卷处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 提取到至少一道题目
    Completed,
    /// 文本中没有任何题号标记
    Empty,
}

/// 试卷处理流程
///
/// - 编排单份试卷的读取与提取
/// - 不持有任何全局资源
/// - 只依赖业务能力（services）和提取核心（engine）
pub struct PaperFlow {
    reader: TextReader,
    segmenter: Segmenter,
    upload_folder: PathBuf,
    verbose_logging: bool,
}

impl PaperFlow {
    /// 创建新的试卷处理流程
    pub fn new(config: &Config) -> Result<Self> {
        let segmenter = Segmenter::from_config(config).context("装配分段引擎失败")?;

        Ok(Self {
            reader: TextReader::new(config.max_text_chars),
            segmenter,
            upload_folder: PathBuf::from(&config.upload_folder),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 处理单份试卷：读取文本并提取题目记录
    pub async fn run(
        &self,
        manifest: PaperManifest,
        ctx: &PaperCtx,
    ) -> Result<(ExtractedPaper, ProcessResult)> {
        info!("[试卷 {}] 开始处理: {}", ctx.paper_index, manifest.title);

        let text_path = self.resolve_text_path(&manifest);
        let text = self
            .reader
            .read(&text_path)
            .await
            .with_context(|| format!("读取试卷文本失败: {}", text_path.display()))?;

        // 提取题目
        let records = self.segmenter.segment(&text);

        let result = if records.is_empty() {
            warn!(
                "[试卷 {}] ⚠️ 文本中没有识别到任何题目",
                ctx.paper_index
            );
            ProcessResult::Empty
        } else {
            info!(
                "[试卷 {}] ✓ 提取完成，共 {} 道题目",
                ctx.paper_index,
                records.len()
            );

            // 详细日志（如果启用）
            if self.verbose_logging {
                self.log_records(ctx.paper_index, &records);
            }

            ProcessResult::Completed
        };

        Ok((ExtractedPaper { manifest, records }, result))
    }

    /// 解析试卷文本文件路径
    ///
    /// 清单中的 `text_file` 相对于上传目录
    fn resolve_text_path(&self, manifest: &PaperManifest) -> PathBuf {
        let text_file = Path::new(&manifest.text_file);
        if text_file.is_absolute() {
            text_file.to_path_buf()
        } else {
            self.upload_folder.join(text_file)
        }
    }

    // ========== 日志辅助方法 ==========

    /// 显示提取结果预览
    fn log_records(&self, paper_index: usize, records: &[QuestionRecord]) {
        for record in records.iter().take(3) {
            let preview = if record.question_text.chars().count() > 60 {
                record.question_text.chars().take(60).collect::<String>() + "..."
            } else {
                record.question_text.clone()
            };
            info!(
                "[试卷 {}]   {}. {} (关键词: {:?})",
                paper_index, record.question_number, preview, record.keywords
            );
        }
        if records.len() > 3 {
            info!("[试卷 {}]   ... 其余 {} 道题目", paper_index, records.len() - 3);
        }
    }
}
