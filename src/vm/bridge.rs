//! VM桥接层：把 CatalogState 的影子行与结果转换成终端输出

use crate::model::coverage::MissingEntry;
use crate::model::shadow_tree::{NodeKind, ShadowRow};

// === 常量定义（消除魔法值） ===
pub const STATUS_LOADED: &str = "翻译加载完成";
pub const STATUS_SAVED: &str = "回写成功";
pub const STATUS_NO_CHANGES: &str = "没有需要保存的修改";
pub const STATUS_FULLY_TRANSLATED: &str = "所有翻译均已填写";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// 按缩进渲染可见行：分类前缀 `▾`/`▸`，叶子附带预览
pub fn render_rows(rows: &[ShadowRow]) -> String {
    let mut out = String::new();
    for row in rows.iter().filter(|r| r.visible) {
        let indent = "  ".repeat(row.depth as usize);
        let line = match row.kind {
            NodeKind::Category => {
                let marker = if row.expanded { "▾" } else { "▸" };
                format!("{}{} {} {}", indent, marker, row.name, row.preview)
            }
            NodeKind::Leaf => format!("{}  {}: {}", indent, row.name, row.preview),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// 每条缺失翻译一行：`路径 [语言]`
pub fn render_missing(entries: &[MissingEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n", STATUS_FULLY_TRANSLATED);
    }
    entries
        .iter()
        .map(|e| format!("{} [{}]\n", e.path(), e.lang))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mutation::create_category_path;
    use crate::model::shadow_tree::build_shadow_tree;
    use crate::model::tree::TranslationTree;

    #[test]
    fn test_render_indents_by_depth() {
        let tree = create_category_path(&TranslationTree::new(), None, "page/title", &["fr", "en"]).unwrap();
        let rows = build_shadow_tree(&tree, &["fr", "en"]);
        let text = render_rows(&rows);
        assert_eq!(text, "▾ page {..} (1 keys)\n    title: fr=\"\" | en=\"\"\n");
    }

    #[test]
    fn test_render_skips_hidden_rows() {
        let tree = create_category_path(&TranslationTree::new(), None, "page/title", &["fr"]).unwrap();
        let mut rows = build_shadow_tree(&tree, &["fr"]);
        rows[1].visible = false;
        assert_eq!(render_rows(&rows).lines().count(), 1);
    }

    #[test]
    fn test_render_missing_empty() {
        assert_eq!(render_missing(&[]), format!("{}\n", STATUS_FULLY_TRANSLATED));
    }
}
