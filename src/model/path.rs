//! 路径寻址：由非空段组成的有序序列，定位翻译树中的某个节点
//!
//! 只有在用户以单个字符串输入路径时才使用 `/` 作为分隔符，
//! 其余情况下段内容是不透明的。

use std::fmt;
use std::str::FromStr;

use crate::model::error::{TreeError, TreeResult};

/// 单字符串路径输入中的分隔符
pub const PATH_DELIMITER: char = '/';

/// 非空、每段非空的路径
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreePath {
    segments: Vec<String>,
}

impl TreePath {
    /// 由段序列构建路径，拒绝空序列与空段
    pub fn new<I, S>(segments: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(TreeError::InvalidPath("路径不能为空".into()));
        }
        if let Some(idx) = segments.iter().position(|s| s.is_empty()) {
            return Err(TreeError::InvalidPath(format!("第 {} 段为空", idx + 1)));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// 路径始终非空
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 最后一段
    pub fn last(&self) -> &str {
        self.split_last().1
    }

    /// 拆成（父级段，最后一段）
    pub fn split_last(&self) -> (&[String], &str) {
        // new() 保证非空
        let Some((last, init)) = self.segments.split_last() else {
            return (&self.segments[..], "");
        };
        (init, last.as_str())
    }

    /// 父路径；单段路径的父级是根，返回 None
    pub fn parent(&self) -> Option<TreePath> {
        let (init, _) = self.split_last();
        if init.is_empty() {
            None
        } else {
            Some(Self { segments: init.to_vec() })
        }
    }

    /// 追加一段，返回新路径（self 不变）
    pub fn append(&self, tail: &str) -> TreeResult<TreePath> {
        if tail.is_empty() {
            return Err(TreeError::InvalidPath("追加的段为空".into()));
        }
        let mut segments = self.segments.clone();
        segments.push(tail.to_string());
        Ok(Self { segments })
    }
}

/// 解析 `a/b/c` 形式的路径，丢弃空段
pub fn parse_path(raw: &str) -> TreeResult<TreePath> {
    let segments: Vec<&str> = raw
        .split(PATH_DELIMITER)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(TreeError::InvalidPath(format!("无法从 \"{}\" 解析出路径", raw)));
    }
    TreePath::new(segments)
}

/// 以 `/` 连接段，用于错误信息与影子行路径
pub fn join_segments(segments: &[String]) -> String {
    segments.join("/")
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_segments(&self.segments))
    }
}

impl FromStr for TreePath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}
