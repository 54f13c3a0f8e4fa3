//! 题目存储服务 - 业务能力层
//!
//! 下游持久化协作方的接缝：为提取结果分配持久标识并落盘。
//! 引擎对存储键、主题、科目一无所知；这些归属关系全部在本层建立。

use crate::error::{AppError, AppResult, StoreError};
use crate::models::paper::PaperManifest;
use crate::models::question::QuestionRecord;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// 已持久化的试卷行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPaper {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub year: String,
    pub exam_type: String,
    pub status: String,
    pub total_questions: usize,
    pub processed_at: String,
}

/// 已持久化的题目行：持久标识 + 所属试卷 + 题目记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuestion {
    pub id: String,
    pub paper_id: String,
    #[serde(flatten)]
    pub record: QuestionRecord,
}

/// 题目存储接口
///
/// 职责：
/// - 为试卷分配持久标识
/// - 把题目记录与所属试卷关联后落盘
/// - 不出现解析逻辑
pub trait QuestionStore: Send + Sync {
    /// 保存试卷元信息，返回分配的试卷ID
    fn save_paper(&self, manifest: &PaperManifest, total_questions: usize) -> AppResult<String>;

    /// 保存一份试卷的全部题目记录，返回写入条数
    fn save_questions(&self, paper_id: &str, records: &[QuestionRecord]) -> AppResult<usize>;
}

/// JSONL 文件存储（参考实现）
///
/// 追加写入 `exam_papers.jsonl` 和 `questions.jsonl` 两个文件。
/// 试卷ID采用毫秒时间戳加标题前缀，题目ID在试卷ID后追加题目序号。
pub struct JsonlStore {
    papers_file: PathBuf,
    questions_file: PathBuf,
}

impl JsonlStore {
    /// 在输出目录下创建存储
    pub fn new(output_folder: &str) -> AppResult<Self> {
        std::fs::create_dir_all(output_folder)
            .map_err(|e| AppError::store_write_failed(output_folder.to_string(), e))?;

        let folder = PathBuf::from(output_folder);
        Ok(Self {
            papers_file: folder.join("exam_papers.jsonl"),
            questions_file: folder.join("questions.jsonl"),
        })
    }

    /// 分配试卷ID：毫秒时间戳 + 清洗后的标题
    fn assign_paper_id(&self, manifest: &PaperManifest) -> String {
        let slug: String = manifest
            .title
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        format!("{}-{}", chrono::Local::now().timestamp_millis(), slug)
    }

    /// 追加一行 JSON 到目标文件
    fn append_line(&self, path: &PathBuf, line: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AppError::store_write_failed(path.to_string_lossy().to_string(), e))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| AppError::store_write_failed(path.to_string_lossy().to_string(), e))?;

        Ok(())
    }
}

impl QuestionStore for JsonlStore {
    fn save_paper(&self, manifest: &PaperManifest, total_questions: usize) -> AppResult<String> {
        let paper_id = self.assign_paper_id(manifest);

        let row = StoredPaper {
            id: paper_id.clone(),
            title: manifest.title.clone(),
            subject: manifest.subject.clone(),
            year: manifest.year.clone(),
            exam_type: manifest.exam_type.clone(),
            status: "completed".to_string(),
            total_questions,
            processed_at: chrono::Local::now().to_rfc3339(),
        };

        let line = serde_json::to_string(&row).map_err(|e| {
            AppError::Store(StoreError::SerializeFailed {
                paper_id: paper_id.clone(),
                source: Box::new(e),
            })
        })?;
        self.append_line(&self.papers_file, &line)?;

        debug!("已保存试卷: {}", paper_id);
        Ok(paper_id)
    }

    fn save_questions(&self, paper_id: &str, records: &[QuestionRecord]) -> AppResult<usize> {
        for (idx, record) in records.iter().enumerate() {
            let row = StoredQuestion {
                id: format!("{}-q{}", paper_id, idx + 1),
                paper_id: paper_id.to_string(),
                record: record.clone(),
            };

            let line = serde_json::to_string(&row).map_err(|e| {
                AppError::Store(StoreError::SerializeFailed {
                    paper_id: paper_id.to_string(),
                    source: Box::new(e),
                })
            })?;
            self.append_line(&self.questions_file, &line)?;
        }

        debug!("已保存 {} 道题目 (试卷: {})", records.len(), paper_id);
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;
    use std::fs as std_fs;

    fn temp_store(tag: &str) -> (JsonlStore, PathBuf) {
        let folder = std::env::temp_dir().join(format!(
            "exam_extract_store_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = std_fs::remove_dir_all(&folder);
        let store = JsonlStore::new(&folder.to_string_lossy()).unwrap();
        (store, folder)
    }

    fn sample_manifest() -> PaperManifest {
        PaperManifest {
            title: "期中物理试卷".to_string(),
            subject: "physics".to_string(),
            year: "2024".to_string(),
            exam_type: "midterm".to_string(),
            text_file: "physics.txt".to_string(),
            file_path: None,
        }
    }

    fn sample_record(number: u32) -> QuestionRecord {
        QuestionRecord {
            question_number: number,
            question_text: format!("Question body {}", number),
            marks: 5,
            difficulty: Difficulty::Medium,
            keywords: vec!["question".to_string(), "body".to_string()],
        }
    }

    #[test]
    fn test_save_paper_assigns_id_and_writes_row() {
        let (store, folder) = temp_store("paper");
        let paper_id = store.save_paper(&sample_manifest(), 3).unwrap();

        assert!(paper_id.contains("期中物理试卷"));

        let content = std_fs::read_to_string(folder.join("exam_papers.jsonl")).unwrap();
        let row: StoredPaper = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(row.id, paper_id);
        assert_eq!(row.status, "completed");
        assert_eq!(row.total_questions, 3);

        let _ = std_fs::remove_dir_all(&folder);
    }

    #[test]
    fn test_save_questions_roundtrip_and_distinct_ids() {
        let (store, folder) = temp_store("questions");
        let records = vec![sample_record(2), sample_record(1)];

        let written = store.save_questions("paper-1", &records).unwrap();
        assert_eq!(written, 2);

        let content = std_fs::read_to_string(folder.join("questions.jsonl")).unwrap();
        let rows: Vec<StoredQuestion> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
        assert_eq!(rows[0].paper_id, "paper-1");
        // 写入顺序与输入顺序一致，题号不被重排
        assert_eq!(rows[0].record.question_number, 2);
        assert_eq!(rows[1].record.question_number, 1);
        // 展平后的字段名与原始表结构一致
        let raw: serde_json::Value =
            serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(raw["difficulty"], "medium");
        assert!(raw["question_text"].is_string());

        let _ = std_fs::remove_dir_all(&folder);
    }
}
