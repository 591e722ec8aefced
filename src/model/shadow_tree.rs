//! 影子树（Shadow Tree）：把翻译树压平成展示用的行，只存结构、路径与简短预览

use crate::model::path::join_segments;
use crate::model::tree::{Leaf, Node, TranslationTree};

/// 预览中每种语言保留的最大字符数
const PREVIEW_CHARS: usize = 32;

/// 节点类型（与 UI 展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Leaf,
}

#[derive(Debug, Clone)]
pub struct ShadowRow {
    /// 节点在父级中的键名
    pub name: String,
    /// `a/b/c` 形式的完整路径（用于精确寻址与回写）
    pub path: String,
    /// 节点类型
    pub kind: NodeKind,
    /// 子节点数量（分类）或语言数量（叶子）
    pub children: u32,
    /// 轻量预览
    pub preview: String,
    /// 节点深度（用于缩进显示，顶层为 0）
    pub depth: u32,
    /// 是否展开（用于折叠/展开功能）
    pub expanded: bool,
    /// 是否可见（用于搜索过滤与折叠）
    pub visible: bool,
}

/// 深度优先构建全树影子索引
pub fn build_shadow_tree<S: AsRef<str>>(tree: &TranslationTree, languages: &[S]) -> Vec<ShadowRow> {
    let mut out = Vec::with_capacity(256);
    fn truncate(s: &str) -> String {
        let s = s.trim();
        if s.chars().count() > PREVIEW_CHARS {
            let truncated: String = s.chars().take(PREVIEW_CHARS).collect();
            format!("\"{}...\"", truncated)
        } else {
            format!("\"{}\"", s)
        }
    }
    fn leaf_preview(leaf: &Leaf, languages: &[&str]) -> String {
        languages
            .iter()
            .map(|lang| format!("{}={}", lang, truncate(leaf.value(lang))))
            .collect::<Vec<_>>()
            .join(" | ")
    }
    fn walk(out: &mut Vec<ShadowRow>, tree: &TranslationTree, prefix: &mut Vec<String>, languages: &[&str]) {
        for (key, node) in tree.iter() {
            prefix.push(key.to_string());
            let (kind, children, preview) = match node {
                Node::Category(sub) => (NodeKind::Category, sub.len() as u32, format!("{{..}} ({} keys)", sub.len())),
                Node::Leaf(leaf) => (NodeKind::Leaf, leaf.len() as u32, leaf_preview(leaf, languages)),
            };
            out.push(ShadowRow {
                name: key.to_string(),
                path: join_segments(prefix),
                kind,
                children,
                preview,
                depth: (prefix.len() - 1) as u32,
                expanded: true, // 默认全部展开
                visible: true,
            });
            if let Node::Category(sub) = node {
                walk(out, sub, prefix, languages);
            }
            prefix.pop();
        }
    }

    let langs: Vec<&str> = languages.iter().map(AsRef::as_ref).collect();
    walk(&mut out, tree, &mut Vec::new(), &langs);
    out
}
