//! 多语言翻译树引擎
//!
//! 把每种语言一份的扁平JSON文档合并成统一的翻译树，提供按路径的增删改，
//! 并把修改后的树拆分回各语言文档

pub mod config;
pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use config::CatalogConfig;
pub use model::data_core::{AppError, CatalogState};
pub use model::error::{TreeError, TreeResult};
pub use model::merge::{merge, merge_languages};
pub use model::mutation::{create_category_path, create_leaf, delete_node, update_leaf_value};
pub use model::path::{parse_path, TreePath};
pub use model::shadow_tree::{build_shadow_tree, NodeKind, ShadowRow};
pub use model::split::split;
pub use model::tree::{Leaf, Node, TranslationTree};
pub use utils::store::{DocumentStore, LocaleDirStore, MemoryStore};
