//! CatalogState：编辑会话的核心状态（当前翻译树、影子行、加载与回写）

use std::time::Instant;

use thiserror::Error;

use crate::config::CatalogConfig;
use crate::model::coverage::{missing_translations, MissingEntry};
use crate::model::error::TreeError;
use crate::model::merge::merge_languages;
use crate::model::mutation::{create_category_path, create_leaf, delete_node, update_leaf_value};
use crate::model::path::parse_path;
use crate::model::shadow_tree::{build_shadow_tree, NodeKind, ShadowRow};
use crate::model::split::split;
use crate::model::tree::TranslationTree;
use crate::utils::store::{load_documents, save_documents, DocumentStore};

#[derive(Debug, Default)]
pub struct CatalogState {
    pub config: CatalogConfig,
    pub tree: TranslationTree,
    pub tree_flat: Vec<ShadowRow>,
    /// 加载或保存之后是否有未保存的修改
    pub dirty: bool,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("翻译树错误: {0}")]
    Tree(#[from] TreeError),
    #[error("状态错误: {0}")]
    State(String),
}

impl CatalogState {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.config.languages
    }

    /// 读取全部语言文档并合并成翻译树
    pub fn load_from(&mut self, store: &dyn DocumentStore) -> Result<(), AppError> {
        let start = Instant::now();
        let documents = load_documents(store, self.languages())?;
        let tree = merge_languages(self.languages(), &documents);
        self.replace_tree(tree);
        self.dirty = false;
        tracing::info!(
            "翻译加载完成: {} 种语言，{} 个节点，耗时: {}ms",
            documents.len(),
            self.tree_flat.len(),
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// 拆分翻译树并写回全部语言文档
    pub fn save_to(&mut self, store: &dyn DocumentStore) -> Result<(), AppError> {
        let start = Instant::now();
        let documents = split(&self.tree, self.languages());
        save_documents(store, &documents)?;
        self.dirty = false;
        tracing::info!("翻译已保存: {} 种语言，耗时: {}ms", documents.len(), start.elapsed().as_millis());
        Ok(())
    }

    /// 更新 `path` 处叶子的某语言值
    pub fn update_value(&mut self, path: &str, lang: &str, value: &str) -> Result<(), AppError> {
        let target = parse_path(path)?;
        let next = self.logged("更新翻译", path, update_leaf_value(&self.tree, &target, lang, value))?;
        self.commit(next);
        Ok(())
    }

    /// 删除叶子或分类
    pub fn delete(&mut self, path: &str) -> Result<(), AppError> {
        let target = parse_path(path)?;
        let next = self.logged("删除节点", path, delete_node(&self.tree, &target))?;
        self.commit(next);
        Ok(())
    }

    /// 在 `parent`（空字符串表示根）下新增一个空翻译
    pub fn add_translation(&mut self, parent: &str, key: &str) -> Result<(), AppError> {
        let parent_path = if parent.trim_matches('/').is_empty() {
            None
        } else {
            Some(parse_path(parent)?)
        };
        let key = key.trim();
        let result = create_leaf(&self.tree, parent_path.as_ref(), key, self.languages());
        let next = self.logged("新增翻译", key, result)?;
        self.commit(next);
        Ok(())
    }

    /// 以 `a/b/c` 的形式一次创建多级分类与末级翻译
    pub fn add_category(&mut self, raw_path: &str) -> Result<(), AppError> {
        if raw_path.trim().is_empty() {
            return Err(AppError::State("分类不能为空".into()));
        }
        let result = create_category_path(&self.tree, None, raw_path, self.languages());
        let next = self.logged("新增分类", raw_path, result)?;
        self.commit(next);
        Ok(())
    }

    /// 整体替换翻译树（例如导入合并后的 JSON）
    pub fn set_tree(&mut self, tree: TranslationTree) {
        self.commit(tree);
    }

    /// 导出合并后的树 JSON（格式化输出）
    pub fn export_unified(&self) -> Result<String, AppError> {
        let value = self.tree.to_unified_json()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// 导入合并后的树 JSON，结构无效时保留当前树
    pub fn import_unified(&mut self, json: &str) -> Result<(), AppError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let tree = TranslationTree::from_unified_json(&value)?;
        self.set_tree(tree);
        Ok(())
    }

    pub fn missing_translations(&self) -> Vec<MissingEntry> {
        missing_translations(&self.tree, self.languages())
    }

    /// 应用搜索过滤，只显示匹配路径的节点
    pub fn apply_search_filter(&mut self, filter: &str) {
        let filter = filter.trim();
        if filter.is_empty() {
            // 清空过滤，恢复按展开状态显示
            self.update_visibility_by_expansion();
        } else {
            for node in &mut self.tree_flat {
                node.visible = node.path.contains(filter) || node.name.contains(filter);
            }
        }
    }

    /// 切换节点的展开状态（叶子没有展开状态）
    pub fn toggle_node_expanded(&mut self, path: &str) {
        if let Some(node) = self
            .tree_flat
            .iter_mut()
            .find(|n| n.path == path && n.kind == NodeKind::Category)
        {
            node.expanded = !node.expanded;
        }
        self.update_visibility_by_expansion();
    }

    /// 全部展开或全部折叠
    pub fn set_all_expanded(&mut self, expanded: bool) {
        for node in &mut self.tree_flat {
            if node.kind == NodeKind::Category {
                node.expanded = expanded;
            }
        }
        self.update_visibility_by_expansion();
    }

    /// 根据展开状态更新节点可见性：顶层总是可见，其余节点仅当所有祖先都展开时可见
    pub fn update_visibility_by_expansion(&mut self) {
        // 祖先链上每一层是否可见且展开
        let mut open: Vec<bool> = Vec::new();
        for node in &mut self.tree_flat {
            let depth = node.depth as usize;
            open.truncate(depth);
            node.visible = open.iter().all(|o| *o);
            open.push(node.visible && node.expanded);
        }
    }

    fn commit(&mut self, tree: TranslationTree) {
        self.replace_tree(tree);
        self.dirty = true;
    }

    /// 替换翻译树并重建影子行，沿用旧行的展开状态
    fn replace_tree(&mut self, tree: TranslationTree) {
        let previous: std::collections::HashMap<String, bool> = self
            .tree_flat
            .iter()
            .map(|row| (row.path.clone(), row.expanded))
            .collect();
        self.tree = tree;
        self.tree_flat = build_shadow_tree(&self.tree, &self.config.languages);
        for row in &mut self.tree_flat {
            if let Some(expanded) = previous.get(&row.path) {
                row.expanded = *expanded;
            }
        }
        self.update_visibility_by_expansion();
    }

    fn logged<T>(&self, action: &str, target: &str, result: Result<T, TreeError>) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                tracing::info!("{}成功: {}", action, target);
                Ok(value)
            }
            Err(e) => {
                tracing::error!("{}失败: {}，原因: {}", action, target, e);
                Err(e.into())
            }
        }
    }
}
