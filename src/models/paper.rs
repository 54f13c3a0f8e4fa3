use serde::{Deserialize, Serialize};

/// 试卷清单
///
/// 每份上传的试卷由一个 TOML 清单描述：试卷元信息加上对应的文本文件名。
/// 文本文件已由上传端解码为纯文本，本程序只按原样读取。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperManifest {
    pub title: String,
    pub subject: String,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: String,
    #[serde(default = "default_exam_type")]
    pub exam_type: String,
    /// 试卷文本文件名（相对于上传目录）
    pub text_file: String,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_exam_type() -> String {
    "midterm".to_string()
}

impl PaperManifest {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

// Helper function to deserialize year as either string or integer
fn deserialize_year<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a year")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(YearVisitor)
}
