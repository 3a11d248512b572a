//! 线与有向边定义
//!
//! 每条无向线 L 产生两条有向边：正向边 (+L, tail -> head)
//! 与反向边 (-L, head -> tail)。两者共享同一份代价、容量和流量槽位，
//! 方向由 [`Direction`] 标记区分，而不是依赖 ID 的正负号。

use crate::graph::node::NodeId;
use crate::types::{Capacity, Cost, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 线 ID（正整数，全局唯一，不要求连续）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(pub u32);

impl LineId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for LineId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 无向网络线
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 线 ID
    pub id: LineId,
    /// 起点（存储方向的尾）
    pub tail: NodeId,
    /// 终点（存储方向的头）
    pub head: NodeId,
    /// 通行代价
    pub cost: Cost,
    /// 容量
    pub capacity: Capacity,
}

impl Line {
    /// 创建线，容量默认等于代价
    pub fn new(id: LineId, tail: NodeId, head: NodeId, cost: Cost) -> Self {
        Self {
            id,
            tail,
            head,
            cost,
            capacity: cost,
        }
    }

    /// 设置独立的容量
    pub fn with_capacity(mut self, capacity: Capacity) -> Self {
        self.capacity = capacity;
        self
    }

    /// 有向边的起点
    pub fn tail_of(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Forward => self.tail,
            Direction::Backward => self.head,
        }
    }

    /// 有向边的终点
    pub fn head_of(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Forward => self.head,
            Direction::Backward => self.tail,
        }
    }

    /// 是否为自环
    pub fn is_loop(&self) -> bool {
        self.tail == self.head
    }
}

/// 有向边：线的一个通行方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectedEdge {
    line: LineId,
    direction: Direction,
}

impl DirectedEdge {
    pub fn new(line: LineId, direction: Direction) -> Self {
        Self { line, direction }
    }

    /// 正向边 (+L)
    pub fn forward(line: LineId) -> Self {
        Self::new(line, Direction::Forward)
    }

    /// 反向边 (-L)
    pub fn backward(line: LineId) -> Self {
        Self::new(line, Direction::Backward)
    }

    /// 所属线
    pub fn line(&self) -> LineId {
        self.line
    }

    /// 方向
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_forward(&self) -> bool {
        self.direction == Direction::Forward
    }

    /// 同一条线的另一方向
    pub fn reversed(&self) -> Self {
        Self::new(self.line, self.direction.reverse())
    }

    /// 带符号的边 ID（+L 或 -L），用于输出报告
    pub fn signed_id(&self) -> i64 {
        self.direction.sign() * self.line.0 as i64
    }
}

impl fmt::Display for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.signed_id())
    }
}

/// 邻接表条目：从某节点出发的一条有向边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEdge {
    edge: DirectedEdge,
    head: NodeId,
    slot: u32,
}

impl OutEdge {
    pub(crate) fn new(edge: DirectedEdge, head: NodeId, slot: usize) -> Self {
        Self {
            edge,
            head,
            slot: slot as u32,
        }
    }

    /// 有向边
    pub fn edge(&self) -> DirectedEdge {
        self.edge
    }

    /// 所属线
    pub fn line(&self) -> LineId {
        self.edge.line
    }

    pub fn direction(&self) -> Direction {
        self.edge.direction
    }

    /// 终点
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// 线在图中的存储槽位，代价/容量/流量按槽位共享
    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directed_edge_sign() {
        let e = DirectedEdge::forward(LineId::new(7));
        assert_eq!(e.signed_id(), 7);
        assert_eq!(e.reversed().signed_id(), -7);
        assert_eq!(e.reversed().reversed(), e);
        assert_eq!(e.reversed().to_string(), "-7");
    }

    #[test]
    fn test_line_endpoints() {
        let line = Line::new(LineId::new(1), NodeId::new(2), NodeId::new(5), 10).with_capacity(3);

        assert_eq!(line.tail_of(Direction::Forward), NodeId::new(2));
        assert_eq!(line.head_of(Direction::Forward), NodeId::new(5));
        assert_eq!(line.tail_of(Direction::Backward), NodeId::new(5));
        assert_eq!(line.head_of(Direction::Backward), NodeId::new(2));
        assert_eq!(line.cost, 10);
        assert_eq!(line.capacity, 3);
        assert!(!line.is_loop());
    }
}
