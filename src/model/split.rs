//! 拆分：把统一的翻译树还原成每种语言一份的扁平 JSON 文档（合并的逆操作）

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::model::tree::{Node, TranslationTree};

/// 按语言顺序拆分；叶子缺失的语言写入空字符串，叶子上多余的语言被忽略
pub fn split<S: AsRef<str>>(tree: &TranslationTree, languages: &[S]) -> IndexMap<String, Value> {
    let langs: Vec<&str> = languages.iter().map(AsRef::as_ref).collect();
    let maps = split_level(tree, &langs);
    langs
        .iter()
        .zip(maps)
        .map(|(lang, map)| (lang.to_string(), Value::Object(map)))
        .collect()
}

fn split_level(tree: &TranslationTree, languages: &[&str]) -> Vec<Map<String, Value>> {
    let mut out: Vec<Map<String, Value>> = languages.iter().map(|_| Map::new()).collect();
    for (key, node) in tree.iter() {
        match node {
            Node::Category(sub) => {
                for (target, sub_map) in out.iter_mut().zip(split_level(sub, languages)) {
                    target.insert(key.to_string(), Value::Object(sub_map));
                }
            }
            Node::Leaf(leaf) => {
                for (target, lang) in out.iter_mut().zip(languages) {
                    target.insert(key.to_string(), Value::String(leaf.value(lang).to_string()));
                }
            }
        }
    }
    out
}
