//! 试卷文本读取服务 - 业务能力层
//!
//! 只负责"把试卷文本从磁盘读进内存"这一件事，不关心内容如何解析

use crate::error::{AppError, AppResult, FileError};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// 试卷文本读取服务
///
/// 按原样读取 UTF-8 纯文本，并截断到配置的字符数上限。
///
/// 截断是上传端策略：超出上限的内容会被静默丢弃，不会进入分段引擎。
/// 引擎本身的契约不包含截断；接入其他来源时需要在接入点重新声明该策略。
pub struct TextReader {
    max_chars: usize,
}

impl TextReader {
    /// 创建读取服务
    ///
    /// # 参数
    /// - `max_chars`: 保留的最大字符数
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// 读取试卷文本文件并应用截断策略
    ///
    /// # 参数
    /// - `path`: 文本文件路径
    ///
    /// # 返回
    /// 返回截断后的文本内容
    pub async fn read(&self, path: &Path) -> AppResult<String> {
        if !path.exists() {
            return Err(AppError::File(FileError::NotFound {
                path: path.to_string_lossy().to_string(),
            }));
        }

        let text = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.to_string_lossy().to_string(), e))?;

        debug!("读取文本: {} ({} 字符)", path.display(), text.chars().count());

        Ok(self.truncate(text))
    }

    /// 截断到字符数上限
    fn truncate(&self, text: String) -> String {
        if text.chars().count() > self.max_chars {
            warn!(
                "文本超出 {} 字符上限，超出部分被丢弃",
                self.max_chars
            );
            text.chars().take(self.max_chars).collect()
        } else {
            text
        }
    }
}
