//! 合并：把每种语言的扁平 JSON 文档合成一棵统一的翻译树
//!
//! 规则（叶子优先）：某个键在所有语言中都是对象时递归成分类；
//! 只要有一种语言在该处是标量或缺失，就生成叶子。
//! 叶子中是对象的那一侧取空字符串，数字与布尔取其 JSON 文本，null 取空字符串。

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::model::tree::{Leaf, Node, TranslationTree};

/// 以文档映射的键作为语言集合进行合并
pub fn merge(documents: &IndexMap<String, Value>) -> TranslationTree {
    let languages: Vec<&str> = documents.keys().map(String::as_str).collect();
    merge_languages(&languages, documents)
}

/// 按给定语言顺序合并；缺失文档（或根不是对象）的语言视为空对象
pub fn merge_languages<S: AsRef<str>>(languages: &[S], documents: &IndexMap<String, Value>) -> TranslationTree {
    let langs: Vec<&str> = languages.iter().map(AsRef::as_ref).collect();
    let levels: Vec<Option<&Map<String, Value>>> = langs
        .iter()
        .map(|lang| documents.get(*lang).and_then(Value::as_object))
        .collect();
    merge_level(&langs, &levels, 0)
}

fn merge_level(languages: &[&str], levels: &[Option<&Map<String, Value>>], depth: usize) -> TranslationTree {
    // 各语言键的并集，按首次出现顺序
    let mut keys: IndexSet<&str> = IndexSet::new();
    for map in levels.iter().flatten() {
        keys.extend(map.keys().map(String::as_str));
    }

    let mut tree = TranslationTree::new();
    for key in keys {
        let values: Vec<Option<&Value>> = levels
            .iter()
            .copied()
            .map(|level| level.and_then(|map| map.get(key)))
            .collect();

        let sub_levels: Option<Vec<Option<&Map<String, Value>>>> = values
            .iter()
            .copied()
            .map(|v| v.and_then(Value::as_object).map(Some))
            .collect();

        let node = match sub_levels {
            Some(sub) => Node::Category(merge_level(languages, &sub, depth + 1)),
            None => {
                if values.iter().any(|v| matches!(v, Some(Value::Object(_)))) {
                    tracing::debug!("键 {} (深度 {}) 在各语言中形状不一致，按叶子处理", key, depth);
                }
                Node::Leaf(
                    languages
                        .iter()
                        .zip(&values)
                        .map(|(lang, v)| (*lang, scalar_text(*v)))
                        .collect::<Leaf>(),
                )
            }
        };
        tree.insert(key, node);
    }
    tree
}

/// 标量转翻译文本
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
