//! 批量试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量试卷的提取和结果落盘。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建存储
//! 2. **批量加载**：扫描并加载所有待处理的试卷清单（`Vec<PaperManifest>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将试卷分批次处理，每批完成后再开始下一批
//! 5. **顺序落盘**：提取并发执行，持久化严格按提交顺序进行
//! 6. **全局统计**：汇总所有试卷的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单份试卷的细节，向下委托 `workflow::PaperFlow`
//! - **资源所有者**：唯一持有 `QuestionStore` 的模块
//! - **确定性输出**：同一批次内按清单顺序写入，与任务完成先后无关

use crate::config::Config;
use crate::models::PaperManifest;
use crate::services::{JsonlStore, QuestionStore};
use crate::workflow::{ExtractedPaper, PaperCtx, PaperFlow, ProcessResult};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<JsonlStore>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        crate::utils::logging::init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let store =
            Arc::new(JsonlStore::new(&config.output_folder).context("创建输出存储失败")?);

        Ok(Self { config, store })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的试卷清单
        let all_papers = self.load_papers().await?;

        if all_papers.is_empty() {
            warn!("⚠️ 没有找到待处理的试卷清单，程序结束");
            return Ok(());
        }

        let total_papers = all_papers.len();
        log_papers_loaded(total_papers, self.config.max_concurrent_papers);

        // 处理所有试卷
        let stats = self.process_all_papers(all_papers).await?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        Ok(())
    }

    /// 加载试卷清单
    async fn load_papers(&self) -> Result<Vec<PaperManifest>> {
        info!("\n📁 正在扫描待处理的试卷...");
        crate::models::load_all_toml_files(&self.config.upload_folder).await
    }

    /// 处理所有试卷
    async fn process_all_papers(&self, all_papers: Vec<PaperManifest>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_papers));
        let total_papers = all_papers.len();
        let mut stats = ProcessingStats {
            total: total_papers,
            ..Default::default()
        };

        // 分批处理
        for (batch_idx, batch_papers) in all_papers
            .chunks(self.config.max_concurrent_papers)
            .enumerate()
        {
            let batch_start = batch_idx * self.config.max_concurrent_papers;
            let batch_num = batch_idx + 1;
            let total_batches = (total_papers + self.config.max_concurrent_papers - 1)
                / self.config.max_concurrent_papers;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_papers.len(),
                total_papers,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_papers, batch_start, semaphore.clone())
                .await;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;
            stats.empty += batch_result.empty;
            stats.questions += batch_result.questions;

            log_batch_complete(batch_num, &batch_result);
        }

        Ok(stats)
    }

    /// 处理单个批次
    ///
    /// 提取任务并发执行；`join_all` 保持提交顺序，持久化随后按该顺序逐份进行
    async fn process_batch(
        &self,
        batch_papers: &[PaperManifest],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> BatchResult {
        let mut batch_handles = Vec::new();

        // 为本批创建并发提取任务
        for (idx, manifest) in batch_papers.iter().enumerate() {
            let paper_index = batch_start + idx + 1;
            let manifest_clone = manifest.clone();
            let config_clone = self.config.clone();
            let semaphore_clone = semaphore.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore_clone
                    .acquire_owned()
                    .await
                    .map_err(anyhow::Error::from)?;

                let ctx = PaperCtx::new(paper_index, manifest_clone.title.clone());
                let flow = PaperFlow::new(&config_clone)?;
                flow.run(manifest_clone, &ctx).await
            });
            batch_handles.push((paper_index, handle));
        }

        // 等待本批所有任务完成（join_all 按提交顺序返回结果）
        let (indices, handles): (Vec<_>, Vec<_>) = batch_handles.into_iter().unzip();
        let outcomes = join_all(handles).await;

        // 按提交顺序落盘并统计
        let mut result = BatchResult::default();
        for (paper_index, outcome) in indices.into_iter().zip(outcomes) {
            match outcome {
                Ok(Ok((extracted, ProcessResult::Completed))) => {
                    match self.persist_paper(&extracted, paper_index) {
                        Ok(count) => {
                            result.success += 1;
                            result.questions += count;
                        }
                        Err(e) => {
                            error!("[试卷 {}] ❌ 持久化失败: {}", paper_index, e);
                            result.failed += 1;
                        }
                    }
                }
                Ok(Ok((_, ProcessResult::Empty))) => {
                    result.empty += 1;
                }
                Ok(Err(e)) => {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {}", paper_index, e);
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[试卷 {}] 任务执行失败: {}", paper_index, e);
                    result.failed += 1;
                }
            }
        }

        result
    }

    /// 持久化单份试卷的提取结果
    fn persist_paper(&self, extracted: &ExtractedPaper, paper_index: usize) -> Result<usize> {
        let paper_id = self
            .store
            .save_paper(&extracted.manifest, extracted.records.len())?;
        let count = self.store.save_questions(&paper_id, &extracted.records)?;

        info!(
            "[试卷 {}] ✓ 已保存 {} 道题目 (ID: {})",
            paper_index, count, paper_id
        );
        Ok(count)
    }
}

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    success: usize,
    failed: usize,
    empty: usize,
    questions: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
    empty: usize,
    questions: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量试卷题目提取模式");
    info!("📊 最大并发数: {}", config.max_concurrent_papers);
    info!("📂 上传目录: {}", config.upload_folder);
    info!("{}", "=".repeat(60));
}

fn log_papers_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 份待处理的试卷", total);
    info!("📋 将以每批 {} 份的方式处理", max_concurrent);
    info!("💡 每批完成后再开始下一批\n");
}

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批试卷: {}-{} / 共 {} 份", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {}, 空卷 {}, 失败 {}, 题目 {} 道",
        batch_num, result.success, result.empty, result.failed, result.questions
    );
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("⚪ 空卷: {}", stats.empty);
    info!("❌ 失败: {}", stats.failed);
    info!("📝 共提取题目: {} 道", stats.questions);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
