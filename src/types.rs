//! 通用类型定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 线的通行代价（最短路径使用）
pub type Cost = u64;

/// 线的容量（最大流使用）
pub type Capacity = u64;

/// 带符号流量，正值表示沿线的正向
///
/// 比 [`Capacity`] 更宽：单条线的流量绝对值不超过其容量，
/// 残余容量最多为容量的两倍，总流量为多条线之和。
pub type Flow = i128;

/// 有向边相对于所属线的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// 沿线的存储方向（tail -> head）
    Forward,
    /// 逆线的存储方向（head -> tail）
    Backward,
}

impl Direction {
    /// 反方向
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// 方向符号：正向 +1，反向 -1
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
