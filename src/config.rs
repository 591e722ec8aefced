//! 目录布局与语言配置
//!
//! 默认布局：`locales/<lang>/translation.json`

use std::path::{Path, PathBuf};

pub const DEFAULT_LOCALES_DIR: &str = "locales";
pub const DEFAULT_FILE_NAME: &str = "translation.json";
pub const DEFAULT_LANGUAGES: [&str; 2] = ["fr", "en"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// 语言目录所在的根目录
    pub locales_dir: PathBuf,
    /// 语言代码，顺序决定合并时键的首次出现顺序
    pub languages: Vec<String>,
    /// 每个语言目录下的文档文件名
    pub file_name: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locales_dir: PathBuf::from(DEFAULT_LOCALES_DIR),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn new(locales_dir: impl Into<PathBuf>, languages: Vec<String>, file_name: impl Into<String>) -> Self {
        Self {
            locales_dir: locales_dir.into(),
            languages,
            file_name: file_name.into(),
        }
    }

    /// 某语言文档的完整路径
    pub fn document_path(&self, lang: &str) -> PathBuf {
        document_path(&self.locales_dir, lang, &self.file_name)
    }
}

pub(crate) fn document_path(dir: &Path, lang: &str, file_name: &str) -> PathBuf {
    dir.join(lang).join(file_name)
}
