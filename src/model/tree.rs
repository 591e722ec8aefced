//! 翻译树：分类节点与多语言叶子节点组成的递归结构
//!
//! 节点类型通过 [`Node`] 显式区分，在合并（或解码合并后的 JSON）时一次性确定，
//! 之后的遍历不再根据形状重新推断。

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::error::{TreeError, TreeResult};
use crate::model::path::{join_segments, TreePath};

/// 叶子：语言代码 → 翻译文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Leaf {
    values: IndexMap<String, String>,
}

impl Leaf {
    /// 为每种语言创建空字符串值
    pub fn empty<S: AsRef<str>>(languages: &[S]) -> Self {
        Self {
            values: languages
                .iter()
                .map(|lang| (lang.as_ref().to_string(), String::new()))
                .collect(),
        }
    }

    /// 读取某语言的值，缺失视为空字符串
    pub fn value(&self, lang: &str) -> &str {
        self.values.get(lang).map(String::as_str).unwrap_or("")
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.values.get(lang).map(String::as_str)
    }

    /// 设置某语言的值；原本没有的语言会被加入
    pub fn set(&mut self, lang: &str, value: impl Into<String>) {
        self.values.insert(lang.to_string(), value.into());
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Leaf {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// 树节点：分类或叶子
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Category(TranslationTree),
    Leaf(Leaf),
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&TranslationTree> {
        match self {
            Node::Category(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }
}

/// 键 → 节点的有序映射；根节点始终是一棵 TranslationTree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslationTree {
    children: IndexMap<String, Node>,
}

impl TranslationTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// 插入子节点；已有同名键时替换并返回旧节点
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.children.insert(key.into(), node)
    }

    /// 移除子节点，保持其余键的顺序
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.children.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// 按路径查找节点；中间节点必须是分类
    pub fn resolve(&self, path: &TreePath) -> TreeResult<&Node> {
        let (parent, last) = self.resolve_parent(path)?;
        parent.get(last).ok_or_else(|| TreeError::PathNotFound {
            prefix: path.to_string(),
        })
    }

    /// 查找路径的父分类，返回（父分类，最后一段）
    pub fn resolve_parent<'p>(&self, path: &'p TreePath) -> TreeResult<(&TranslationTree, &'p str)> {
        let (init, last) = path.split_last();
        let mut current = self;
        for (idx, seg) in init.iter().enumerate() {
            current = match current.children.get(seg) {
                Some(Node::Category(sub)) => sub,
                _ => {
                    return Err(TreeError::PathNotFound {
                        prefix: join_segments(&init[..=idx]),
                    })
                }
            };
        }
        Ok((current, last))
    }

    pub(crate) fn resolve_parent_mut<'p>(
        &mut self,
        path: &'p TreePath,
    ) -> TreeResult<(&mut TranslationTree, &'p str)> {
        let (init, last) = path.split_last();
        let mut current = self;
        for (idx, seg) in init.iter().enumerate() {
            current = match current.children.get_mut(seg) {
                Some(Node::Category(sub)) => sub,
                _ => {
                    return Err(TreeError::PathNotFound {
                        prefix: join_segments(&init[..=idx]),
                    })
                }
            };
        }
        Ok((current, last))
    }

    /// 沿途创建缺失的分类，返回最深处的分类；途中遇到叶子视为冲突
    pub(crate) fn ensure_category_path(&mut self, segments: &[String]) -> TreeResult<&mut TranslationTree> {
        let mut current = self;
        for (idx, seg) in segments.iter().enumerate() {
            let node = current
                .children
                .entry(seg.clone())
                .or_insert_with(|| Node::Category(TranslationTree::new()));
            current = match node {
                Node::Category(sub) => sub,
                Node::Leaf(_) => {
                    return Err(TreeError::Conflict {
                        path: join_segments(&segments[..=idx]),
                    })
                }
            };
        }
        Ok(current)
    }

    /// 深度优先收集所有叶子及其段序列（空字符串键同样保留）
    pub fn leaves(&self) -> Vec<(Vec<String>, &Leaf)> {
        fn walk<'a>(tree: &'a TranslationTree, prefix: &mut Vec<String>, out: &mut Vec<(Vec<String>, &'a Leaf)>) {
            for (key, node) in &tree.children {
                prefix.push(key.clone());
                match node {
                    Node::Leaf(leaf) => out.push((prefix.clone(), leaf)),
                    Node::Category(sub) => walk(sub, prefix, out),
                }
                prefix.pop();
            }
        }
        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// 序列化为合并后的 JSON 形状（分类 = 节点对象，叶子 = 语言字符串对象）
    pub fn to_unified_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// 解码合并后的 JSON：全部值为字符串的非空对象是叶子，其余对象是分类
    pub fn from_unified_json(value: &Value) -> TreeResult<Self> {
        fn decode(map: &Map<String, Value>, prefix: &mut Vec<String>) -> TreeResult<TranslationTree> {
            let mut tree = TranslationTree::new();
            for (key, child) in map {
                prefix.push(key.clone());
                let node = match child {
                    Value::Object(inner) if !inner.is_empty() && inner.values().all(Value::is_string) => {
                        Node::Leaf(
                            inner
                                .iter()
                                .map(|(lang, v)| (lang.clone(), v.as_str().unwrap_or_default().to_string()))
                                .collect(),
                        )
                    }
                    Value::Object(inner) => Node::Category(decode(inner, prefix)?),
                    _ => {
                        return Err(TreeError::InvalidShape {
                            path: join_segments(prefix),
                        })
                    }
                };
                prefix.pop();
                tree.insert(key.clone(), node);
            }
            Ok(tree)
        }

        match value {
            Value::Object(map) => decode(map, &mut Vec::new()),
            _ => Err(TreeError::InvalidShape { path: String::new() }),
        }
    }
}
