//! 性能基准测试模块
//!
//! 用于测试大目录的合并、拆分和影子树构建的耗时

use std::time::Instant;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::model::{merge::merge_languages, shadow_tree::build_shadow_tree, split::split};
use crate::model::tree::TranslationTree;

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 为每种语言生成结构相同的大型翻译文档
pub fn generate_catalog<S: AsRef<str>>(depth: usize, width: usize, languages: &[S]) -> IndexMap<String, Value> {
    fn create_level(lang: &str, current_depth: usize, max_depth: usize, width: usize, prefix: &str) -> Value {
        let mut obj = serde_json::Map::new();
        for i in 0..width {
            let key = format!("key_{}", i);
            // 每隔三个键生成一个子分类，直到最大深度
            let value = if i % 3 == 2 && current_depth + 1 < max_depth {
                create_level(lang, current_depth + 1, max_depth, width, &format!("{}.{}", prefix, key))
            } else {
                json!(format!("[{}] {}.{}", lang, prefix, key))
            };
            obj.insert(key, value);
        }
        Value::Object(obj)
    }

    languages
        .iter()
        .map(|lang| {
            let lang = lang.as_ref();
            (lang.to_string(), create_level(lang, 0, depth, width, "root"))
        })
        .collect()
}

/// 测试合并性能
pub fn benchmark_merge<S: AsRef<str>>(languages: &[S], documents: &IndexMap<String, Value>) -> (PerformanceResult, TranslationTree) {
    let start = Instant::now();
    let tree = merge_languages(languages, documents);
    let duration = start.elapsed();

    let result = PerformanceResult::new(
        "合并",
        duration.as_millis(),
        !tree.is_empty(),
        &format!("合并了 {} 个叶子", tree.leaves().len()),
    );
    (result, tree)
}

/// 测试拆分性能
pub fn benchmark_split<S: AsRef<str>>(tree: &TranslationTree, languages: &[S]) -> PerformanceResult {
    let start = Instant::now();
    let documents = split(tree, languages);
    let duration = start.elapsed();

    PerformanceResult::new(
        "拆分",
        duration.as_millis(),
        documents.len() == languages.len(),
        &format!("生成了 {} 份语言文档", documents.len()),
    )
}

/// 测试影子树构建性能
pub fn benchmark_shadow_tree_build<S: AsRef<str>>(tree: &TranslationTree, languages: &[S]) -> PerformanceResult {
    let start = Instant::now();
    let rows = build_shadow_tree(tree, languages);
    let duration = start.elapsed();

    PerformanceResult::new(
        "影子树构建",
        duration.as_millis(),
        !rows.is_empty(),
        &format!("构建了 {} 行", rows.len()),
    )
}

/// 依次运行全部基准，返回结果列表
pub fn run_all<S: AsRef<str>>(depth: usize, width: usize, languages: &[S]) -> Vec<PerformanceResult> {
    let documents = generate_catalog(depth, width, languages);
    let (merge_result, tree) = benchmark_merge(languages, &documents);
    let split_result = benchmark_split(&tree, languages);
    let rows_result = benchmark_shadow_tree_build(&tree, languages);
    for r in [&merge_result, &split_result, &rows_result] {
        tracing::info!("{}: {}ms, {}", r.operation, r.duration_ms, r.details);
    }
    vec![merge_result, split_result, rows_result]
}
