//! Document store: per-language persistence adapter
//!
//! 引擎本身不关心存储；这里提供目录存储与内存存储两种实现。
//! IO 错误原样向上传递，不做重试。

use std::path::PathBuf;
use std::sync::Mutex;

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::{document_path, CatalogConfig};
use crate::model::data_core::AppError;
use crate::model::error::TreeError;
use crate::utils::fs::{read_json_file, write_json_file};

/// 每种语言一份 JSON 文档的读写接口
pub trait DocumentStore: Send + Sync {
    fn read_document(&self, lang: &str) -> Result<Value, AppError>;
    fn write_document(&self, lang: &str, document: &Value) -> Result<(), AppError>;
}

/// `<dir>/<lang>/<file_name>` 目录布局
#[derive(Debug, Clone)]
pub struct LocaleDirStore {
    dir: PathBuf,
    file_name: String,
}

impl LocaleDirStore {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.locales_dir.clone(), config.file_name.clone())
    }

    pub fn path_for(&self, lang: &str) -> PathBuf {
        document_path(&self.dir, lang, &self.file_name)
    }
}

impl DocumentStore for LocaleDirStore {
    fn read_document(&self, lang: &str) -> Result<Value, AppError> {
        let path = self.path_for(lang);
        tracing::debug!("读取语言文档: {}", path.display());
        read_json_file(&path)
    }

    fn write_document(&self, lang: &str, document: &Value) -> Result<(), AppError> {
        let path = self.path_for(lang);
        tracing::debug!("写入语言文档: {}", path.display());
        write_json_file(&path, document)
    }
}

/// 内存存储（测试与嵌入场景）
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<IndexMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: IndexMap<String, Value>) -> Self {
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// 当前保存的全部文档副本
    pub fn snapshot(&self) -> Result<IndexMap<String, Value>, AppError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, IndexMap<String, Value>>, AppError> {
        self.documents
            .lock()
            .map_err(|_| AppError::State("内存存储锁已损坏".into()))
    }
}

impl DocumentStore for MemoryStore {
    fn read_document(&self, lang: &str) -> Result<Value, AppError> {
        self.lock()?.get(lang).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("语言文档不存在: {}", lang),
            ))
        })
    }

    fn write_document(&self, lang: &str, document: &Value) -> Result<(), AppError> {
        self.lock()?.insert(lang.to_string(), document.clone());
        Ok(())
    }
}

/// 并行读取所有语言的文档，任一失败即返回该错误；根不是对象的文档视为结构无效
pub fn load_documents<S: AsRef<str>>(
    store: &dyn DocumentStore,
    languages: &[S],
) -> Result<IndexMap<String, Value>, AppError> {
    let results: Vec<(String, Result<Value, AppError>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = languages
            .iter()
            .map(|lang| {
                let lang = lang.as_ref().to_string();
                scope.spawn(move || {
                    let doc = store.read_document(&lang);
                    (lang, doc)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| (String::new(), Err(AppError::State("读取线程异常退出".into()))))
            })
            .collect()
    });

    let mut documents = IndexMap::with_capacity(results.len());
    for (lang, doc) in results {
        let doc = doc?;
        if !doc.is_object() {
            tracing::error!("语言文档 {} 的根不是对象，拒绝加载", lang);
            return Err(TreeError::InvalidShape { path: lang }.into());
        }
        documents.insert(lang, doc);
    }
    Ok(documents)
}

/// 依次写入所有语言的文档
pub fn save_documents(store: &dyn DocumentStore, documents: &IndexMap<String, Value>) -> Result<(), AppError> {
    for (lang, document) in documents {
        store.write_document(lang, document)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dir_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocaleDirStore::new(dir.path(), "translation.json");
        store.write_document("fr", &json!({"a": "b"})).unwrap();

        assert!(dir.path().join("fr").join("translation.json").exists());
        assert_eq!(store.read_document("fr").unwrap(), json!({"a": "b"}));
    }

    #[test]
    fn test_load_keeps_language_order() {
        let store = MemoryStore::new();
        store.write_document("en", &json!({"x": "X"})).unwrap();
        store.write_document("fr", &json!({"x": "Ix"})).unwrap();

        let documents = load_documents(&store, &["fr", "en"]).unwrap();
        assert_eq!(documents.keys().collect::<Vec<_>>(), vec!["fr", "en"]);
    }

    #[test]
    fn test_load_surfaces_io_error() {
        let store = MemoryStore::new();
        store.write_document("fr", &json!({})).unwrap();
        let err = load_documents(&store, &["fr", "en"]).unwrap_err();
        match err {
            AppError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("期望IO错误，实际为: {}", other),
        }
    }

    #[test]
    fn test_load_rejects_non_object_root() {
        let store = MemoryStore::new();
        store.write_document("fr", &json!({"a": "Un"})).unwrap();
        store.write_document("en", &json!(["legacy", "array"])).unwrap();
        let err = load_documents(&store, &["fr", "en"]).unwrap_err();
        assert!(matches!(err, AppError::Tree(TreeError::InvalidShape { ref path }) if path == "en"));
    }

    #[test]
    fn test_save_writes_every_language() {
        let store = MemoryStore::new();
        let documents: IndexMap<String, Value> = [
            ("fr".to_string(), json!({"a": "Un"})),
            ("en".to_string(), json!({"a": "One"})),
        ]
        .into_iter()
        .collect();
        save_documents(&store, &documents).unwrap();
        assert_eq!(store.snapshot().unwrap(), documents);
    }
}
