//! 图构建器
//!
//! 从线表构建只读 [`Graph`]，构建时完成端点与 ID 校验

use super::edge::{DirectedEdge, Line, LineId, OutEdge};
use super::graph::{Adjacency, Graph};
use super::node::NodeId;
use crate::error::{Error, Result};
use crate::types::{Capacity, Cost};
use indexmap::IndexMap;
use std::sync::Arc;

/// 图构建器
#[derive(Debug, Default)]
pub struct GraphBuilder {
    node_count: u32,
    lines: IndexMap<LineId, Line>,
}

impl GraphBuilder {
    /// 创建构建器，节点 ID 范围为 `[1, node_count]`
    pub fn new(node_count: u32) -> Self {
        Self {
            node_count,
            lines: IndexMap::new(),
        }
    }

    /// 预分配线表空间
    pub fn with_capacity_hint(mut self, lines: usize) -> Self {
        self.lines.reserve(lines);
        self
    }

    /// 当前节点数量
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// 追加一个节点
    pub fn add_node(&mut self) -> NodeId {
        self.node_count += 1;
        NodeId::new(self.node_count)
    }

    /// 确保节点数量不少于 `count`
    pub fn ensure_nodes(&mut self, count: u32) {
        self.node_count = self.node_count.max(count);
    }

    /// 添加线，容量等于代价
    pub fn add_line(&mut self, id: u32, tail: u32, head: u32, cost: Cost) -> Result<LineId> {
        self.add_line_with_capacity(id, tail, head, cost, cost)
    }

    /// 添加线并指定独立容量
    pub fn add_line_with_capacity(
        &mut self,
        id: u32,
        tail: u32,
        head: u32,
        cost: Cost,
        capacity: Capacity,
    ) -> Result<LineId> {
        if id == 0 {
            return Err(Error::InvalidLineId(0));
        }
        for endpoint in [tail, head] {
            if endpoint == 0 {
                return Err(Error::InvalidNodeId(0));
            }
        }

        let line_id = LineId::new(id);
        if self.lines.contains_key(&line_id) {
            return Err(Error::DuplicateLine(line_id));
        }

        let line = Line::new(line_id, NodeId::new(tail), NodeId::new(head), cost)
            .with_capacity(capacity);
        self.lines.insert(line_id, line);

        Ok(line_id)
    }

    /// 完成构建
    ///
    /// 每条线在其尾节点登记正向边、在其头节点登记反向边；
    /// 端点超出节点范围时返回 [`Error::NodeNotFound`]。
    pub fn build(self) -> Result<Arc<Graph>> {
        let node_count = self.node_count as usize;
        let mut adjacency: Vec<Adjacency> = vec![Adjacency::new(); node_count];

        for (slot, line) in self.lines.values().enumerate() {
            for endpoint in [line.tail, line.head] {
                if endpoint.index() >= node_count {
                    return Err(Error::NodeNotFound(endpoint));
                }
            }

            adjacency[line.tail.index()].push(OutEdge::new(
                DirectedEdge::forward(line.id),
                line.head,
                slot,
            ));
            adjacency[line.head.index()].push(OutEdge::new(
                DirectedEdge::backward(line.id),
                line.tail,
                slot,
            ));
        }

        tracing::debug!(
            nodes = node_count,
            lines = self.lines.len(),
            "graph built"
        );

        Ok(Arc::new(Graph::from_parts(adjacency, self.lines)))
    }
}
