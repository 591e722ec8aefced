//! 翻译覆盖率：找出值缺失或为空白的（叶子路径，语言）组合

use crate::model::path::join_segments;
use crate::model::tree::TranslationTree;

/// 一条缺失的翻译
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingEntry {
    /// 叶子的段序列；JSON 允许空字符串键，因此不构造 TreePath
    pub segments: Vec<String>,
    pub lang: String,
}

impl MissingEntry {
    /// `a/b/c` 形式的显示路径
    pub fn path(&self) -> String {
        join_segments(&self.segments)
    }
}

/// 按树的展示顺序列出缺失的翻译
pub fn missing_translations<S: AsRef<str>>(tree: &TranslationTree, languages: &[S]) -> Vec<MissingEntry> {
    let mut out = Vec::new();
    for (segments, leaf) in tree.leaves() {
        for lang in languages.iter().map(AsRef::as_ref) {
            if leaf.value(lang).trim().is_empty() {
                out.push(MissingEntry {
                    segments: segments.clone(),
                    lang: lang.to_string(),
                });
            }
        }
    }
    out
}
