//! 树变更：按路径更新、删除、插入
//!
//! 所有操作都是纯函数：输入树保持不变，成功时返回新树，失败时返回类型化错误，
//! 不存在“部分成功”的中间状态。

use crate::model::error::{TreeError, TreeResult};
use crate::model::path::{join_segments, parse_path, TreePath, PATH_DELIMITER};
use crate::model::tree::{Leaf, Node, TranslationTree};

/// 替换（或新增）叶子上某种语言的值
pub fn update_leaf_value(
    tree: &TranslationTree,
    path: &TreePath,
    lang: &str,
    value: impl Into<String>,
) -> TreeResult<TranslationTree> {
    let mut next = tree.clone();
    let (parent, last) = next.resolve_parent_mut(path).map_err(|_| not_found(path))?;
    match parent.get_mut(last) {
        Some(Node::Leaf(leaf)) => leaf.set(lang, value),
        Some(Node::Category(_)) => {
            return Err(TreeError::NotALeaf {
                path: path.to_string(),
            })
        }
        None => return Err(not_found(path)),
    }
    tracing::debug!("更新叶子 {} [{}]", path, lang);
    Ok(next)
}

/// 删除叶子或整棵分类子树
///
/// 删除分类中的最后一个子节点后，该分类以空分类的形式保留，不会自动裁剪。
pub fn delete_node(tree: &TranslationTree, path: &TreePath) -> TreeResult<TranslationTree> {
    let mut next = tree.clone();
    let (parent, last) = next.resolve_parent_mut(path).map_err(|_| not_found(path))?;
    if parent.remove(last).is_none() {
        return Err(not_found(path));
    }
    tracing::debug!("删除节点 {}", path);
    Ok(next)
}

/// 在 parent（None 表示根）下创建一个所有语言均为空字符串的新叶子
///
/// 缺失的中间分类会被创建；`key` 已存在（无论叶子还是分类）时返回 `Conflict`。
/// `key` 不能包含路径分隔符，`languages` 不能为空。
pub fn create_leaf<S: AsRef<str>>(
    tree: &TranslationTree,
    parent: Option<&TreePath>,
    key: &str,
    languages: &[S],
) -> TreeResult<TranslationTree> {
    let parent_segments = parent.map(TreePath::segments).unwrap_or_default();
    create_leaf_at(tree, parent_segments, key, languages)
}

/// 把 `a/b/c` 形式的路径创建到 root（None 表示根）之下：
/// 非末段成为（或复用）分类，末段成为新叶子，冲突规则与 [`create_leaf`] 相同
pub fn create_category_path<S: AsRef<str>>(
    tree: &TranslationTree,
    root: Option<&TreePath>,
    raw_path: &str,
    languages: &[S],
) -> TreeResult<TranslationTree> {
    let path = parse_path(raw_path)?;
    let (init, last) = path.split_last();
    let mut segments: Vec<String> = root.map(|r| r.segments().to_vec()).unwrap_or_default();
    segments.extend(init.iter().cloned());
    create_leaf_at(tree, &segments, last, languages)
}

fn create_leaf_at<S: AsRef<str>>(
    tree: &TranslationTree,
    parent: &[String],
    key: &str,
    languages: &[S],
) -> TreeResult<TranslationTree> {
    if key.is_empty() {
        return Err(TreeError::InvalidPath("新键不能为空".into()));
    }
    if key.contains(PATH_DELIMITER) {
        return Err(TreeError::InvalidPath(format!("新键不能包含 '{}': {}", PATH_DELIMITER, key)));
    }
    let mut full = parent.to_vec();
    full.push(key.to_string());
    if languages.is_empty() {
        return Err(TreeError::NoLanguages {
            path: join_segments(&full),
        });
    }

    let mut next = tree.clone();
    let target = next.ensure_category_path(parent)?;
    if target.contains_key(key) {
        return Err(TreeError::Conflict {
            path: join_segments(&full),
        });
    }
    target.insert(key, Node::Leaf(Leaf::empty(languages)));
    tracing::debug!("创建叶子 {}", join_segments(&full));
    Ok(next)
}

fn not_found(path: &TreePath) -> TreeError {
    TreeError::NodeNotFound {
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::merge::merge;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    const LANGS: [&str; 2] = ["fr", "en"];

    fn p(raw: &str) -> TreePath {
        parse_path(raw).unwrap()
    }

    fn sample_tree() -> TranslationTree {
        let documents: IndexMap<String, Value> = [
            ("fr".to_string(), json!({"button": {"start": "Démarrer", "stop": "Arrêter"}, "title": "Titre"})),
            ("en".to_string(), json!({"button": {"start": "Start", "stop": "Stop"}, "title": "Title"})),
        ]
        .into_iter()
        .collect();
        merge(&documents)
    }

    #[test]
    fn test_update_changes_only_target() {
        let tree = sample_tree();
        let updated = update_leaf_value(&tree, &p("button/start"), "en", "Go").unwrap();

        let start = updated.resolve(&p("button/start")).unwrap().as_leaf().unwrap();
        assert_eq!(start.value("en"), "Go");
        assert_eq!(start.value("fr"), "Démarrer");

        // 其它叶子不受影响
        assert_eq!(updated.resolve(&p("button/stop")).unwrap(), tree.resolve(&p("button/stop")).unwrap());
        assert_eq!(updated.get("title"), tree.get("title"));

        // 输入树不变
        let original = tree.resolve(&p("button/start")).unwrap().as_leaf().unwrap();
        assert_eq!(original.value("en"), "Start");
    }

    #[test]
    fn test_update_widens_language_set() {
        let tree = sample_tree();
        let updated = update_leaf_value(&tree, &p("title"), "de", "Titel").unwrap();
        let title = updated.get("title").unwrap().as_leaf().unwrap();
        assert_eq!(title.languages().collect::<Vec<_>>(), vec!["fr", "en", "de"]);
    }

    #[test]
    fn test_update_failures() {
        let tree = sample_tree();
        assert_eq!(
            update_leaf_value(&tree, &p("button"), "en", "x").unwrap_err(),
            TreeError::NotALeaf { path: "button".into() }
        );
        assert_eq!(
            update_leaf_value(&tree, &p("button/pause"), "en", "x").unwrap_err(),
            TreeError::NodeNotFound { path: "button/pause".into() }
        );
        assert_eq!(
            update_leaf_value(&tree, &p("title/deeper"), "en", "x").unwrap_err(),
            TreeError::NodeNotFound { path: "title/deeper".into() }
        );
    }

    #[test]
    fn test_delete_leaf_keeps_siblings() {
        let tree = sample_tree();
        let next = delete_node(&tree, &p("button/start")).unwrap();
        assert!(next.resolve(&p("button/start")).unwrap_err().is_not_found());
        assert!(next.resolve(&p("button/stop")).is_ok());
        assert!(next.get("title").is_some());
    }

    #[test]
    fn test_delete_category_removes_subtree() {
        let tree = sample_tree();
        let next = delete_node(&tree, &p("button")).unwrap();
        assert!(next.resolve(&p("button")).is_err());
        assert!(next.resolve(&p("button/start")).is_err());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_delete_last_child_leaves_empty_category() {
        let tree = sample_tree();
        let next = delete_node(&tree, &p("button/start")).unwrap();
        let next = delete_node(&next, &p("button/stop")).unwrap();
        let button = next.get("button").unwrap().as_category().unwrap();
        assert!(button.is_empty());
    }

    #[test]
    fn test_delete_missing_node() {
        let tree = sample_tree();
        assert_eq!(
            delete_node(&tree, &p("nope")).unwrap_err(),
            TreeError::NodeNotFound { path: "nope".into() }
        );
    }

    #[test]
    fn test_create_then_read() {
        let tree = sample_tree();
        let parent = p("button");
        let next = create_leaf(&tree, Some(&parent), "newKey", &LANGS).unwrap();
        let leaf = next.resolve(&parent.append("newKey").unwrap()).unwrap().as_leaf().unwrap();
        assert_eq!(leaf.get("fr"), Some(""));
        assert_eq!(leaf.get("en"), Some(""));
    }

    #[test]
    fn test_create_builds_missing_categories() {
        let next = create_leaf(&TranslationTree::new(), Some(&p("page/login")), "title", &LANGS).unwrap();
        assert!(next.resolve(&p("page")).unwrap().as_category().is_some());
        assert!(next.resolve(&p("page/login/title")).unwrap().is_leaf());
    }

    #[test]
    fn test_create_at_root() {
        let next = create_leaf(&TranslationTree::new(), None, "hello", &LANGS).unwrap();
        assert!(next.get("hello").unwrap().is_leaf());
    }

    #[test]
    fn test_create_rejects_conflicts() {
        let tree = sample_tree();
        assert_eq!(
            create_leaf(&tree, Some(&p("button")), "start", &LANGS).unwrap_err(),
            TreeError::Conflict { path: "button/start".into() }
        );
        // 已存在的分类同样冲突
        assert_eq!(
            create_leaf(&tree, None, "button", &LANGS).unwrap_err(),
            TreeError::Conflict { path: "button".into() }
        );
        // 父路径穿过叶子
        assert_eq!(
            create_leaf(&tree, Some(&p("title/sub")), "x", &LANGS).unwrap_err(),
            TreeError::Conflict { path: "title".into() }
        );
        assert!(matches!(
            create_leaf(&tree, None, "", &LANGS),
            Err(TreeError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_create_rejects_delimiter_in_key() {
        let tree = sample_tree();
        let err = create_leaf(&tree, Some(&p("button")), "a/b", &LANGS).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath(_)));
        let button = tree.get("button").unwrap().as_category().unwrap();
        assert_eq!(button.len(), 2);
    }

    #[test]
    fn test_create_requires_languages() {
        let none: [&str; 0] = [];
        assert_eq!(
            create_leaf(&TranslationTree::new(), None, "hello", &none).unwrap_err(),
            TreeError::NoLanguages { path: "hello".into() }
        );
        assert_eq!(
            create_category_path(&TranslationTree::new(), None, "page/title", &none).unwrap_err(),
            TreeError::NoLanguages { path: "page/title".into() }
        );
    }

    #[test]
    fn test_failed_create_leaves_input_untouched() {
        let tree = sample_tree();
        let before = tree.clone();
        assert!(create_leaf(&tree, Some(&p("title/sub")), "x", &LANGS).is_err());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_create_category_path_example() {
        let next = create_category_path(&TranslationTree::new(), None, "page/login/title", &LANGS).unwrap();
        assert_eq!(
            next.to_unified_json().unwrap(),
            json!({"page": {"login": {"title": {"fr": "", "en": ""}}}})
        );

        let again = create_category_path(&next, None, "page/login/title", &LANGS);
        assert_eq!(again.unwrap_err(), TreeError::Conflict { path: "page/login/title".into() });
    }

    #[test]
    fn test_create_category_path_reuses_categories() {
        let tree = sample_tree();
        let next = create_category_path(&tree, None, "/button//pause/", &LANGS).unwrap();
        let button = next.get("button").unwrap().as_category().unwrap();
        assert_eq!(button.keys().collect::<Vec<_>>(), vec!["start", "stop", "pause"]);
    }

    #[test]
    fn test_create_category_path_under_root_key() {
        let next = create_category_path(&TranslationTree::new(), Some(&p("app")), "menu/open", &LANGS).unwrap();
        assert!(next.resolve(&p("app/menu/open")).unwrap().is_leaf());
    }

    #[test]
    fn test_create_category_path_invalid_input() {
        let err = create_category_path(&TranslationTree::new(), None, "//", &LANGS).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath(_)));
    }
}
