//! 翻译树引擎的错误类型

use thiserror::Error;

/// 路径寻址与树变更过程中的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// 路径为空或包含空段
    #[error("路径无效: {0}")]
    InvalidPath(String),
    /// 导航途中遇到不存在的段或叶子节点（prefix 为出错的前缀）
    #[error("路径不存在: {prefix}")]
    PathNotFound { prefix: String },
    /// 变更操作的目标节点不存在
    #[error("节点不存在: {path}")]
    NodeNotFound { path: String },
    /// 期望叶子节点却遇到分类节点
    #[error("节点不是叶子: {path}")]
    NotALeaf { path: String },
    /// 创建时与已有键冲突
    #[error("键已存在: {path}")]
    Conflict { path: String },
    /// 合并后的树 JSON 在此处不是对象
    #[error("节点结构无效: {path}")]
    InvalidShape { path: String },
    /// 新叶子没有任何语言，序列化后会变成空对象而无法再被识别为叶子
    #[error("语言列表为空，无法创建叶子: {path}")]
    NoLanguages { path: String },
}

impl TreeError {
    /// 是否属于“找不到”一类（导航失败或目标缺失）
    pub fn is_not_found(&self) -> bool {
        matches!(self, TreeError::PathNotFound { .. } | TreeError::NodeNotFound { .. })
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
