use crate::models::paper::PaperManifest;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 PaperManifest 对象
pub async fn load_toml_to_manifest(toml_file_path: &Path) -> Result<PaperManifest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let manifest: PaperManifest = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    Ok(manifest.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有 TOML 清单并转换为 PaperManifest 对象列表
///
/// 清单按文件名排序加载，保证同一批次的提交顺序稳定
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<PaperManifest>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }

    toml_files.sort();

    let mut manifests = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_manifest(&path).await {
            Ok(manifest) => {
                tracing::info!("成功加载试卷清单: {}", manifest.title);
                manifests.push(manifest);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    fn temp_folder(tag: &str) -> PathBuf {
        let folder = std::env::temp_dir().join(format!(
            "exam_extract_loader_{}_{}",
            tag,
            std::process::id()
        ));
        let _ = std_fs::remove_dir_all(&folder);
        std_fs::create_dir_all(&folder).unwrap();
        folder
    }

    #[test]
    fn test_load_single_manifest() {
        let folder = temp_folder("single");
        let path = folder.join("paper.toml");
        std_fs::write(
            &path,
            r#"
            title = "高三物理模拟卷"
            subject = "physics"
            year = 2025
            exam_type = "final"
            text_file = "paper.txt"
            "#,
        )
        .unwrap();

        let manifest = tokio_test::block_on(load_toml_to_manifest(&path)).unwrap();
        assert_eq!(manifest.title, "高三物理模拟卷");
        assert_eq!(manifest.year, "2025");
        assert!(manifest.file_path.is_some());

        let _ = std_fs::remove_dir_all(&folder);
    }

    #[test]
    fn test_load_all_skips_invalid_files() {
        let folder = temp_folder("all");
        std_fs::write(
            folder.join("a_good.toml"),
            "title = \"卷一\"\nsubject = \"math\"\nyear = 2024\ntext_file = \"a.txt\"\n",
        )
        .unwrap();
        std_fs::write(folder.join("b_bad.toml"), "title = ").unwrap();
        std_fs::write(folder.join("c_ignored.txt"), "not a manifest").unwrap();

        let manifests =
            tokio_test::block_on(load_all_toml_files(&folder.to_string_lossy())).unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].title, "卷一");

        let _ = std_fs::remove_dir_all(&folder);
    }

    #[test]
    fn test_missing_folder_is_error() {
        let result = tokio_test::block_on(load_all_toml_files("/nonexistent/exam_extract_dir"));
        assert!(result.is_err());
    }
}
