//! 节点定义
//!
//! 节点只有 ID，坐标与属性保存在矢量图层中

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点 ID（从 1 开始，连续编号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// 数组下标（ID - 1）
    pub(crate) fn index(&self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// 由数组下标还原节点 ID
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
