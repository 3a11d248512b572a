//! 图数据结构
//!
//! 由线/节点网络构建的只读有向图。构建完成后不可修改，
//! 所有分析算法只读访问。

use super::edge::{DirectedEdge, Line, LineId, OutEdge};
use super::node::NodeId;
use crate::error::{Error, Result};
use crate::types::{Capacity, Cost};
use indexmap::IndexMap;
use smallvec::SmallVec;

/// 单个节点的出边列表，多数道路网络节点度数不超过 4
pub(crate) type Adjacency = SmallVec<[OutEdge; 4]>;

/// 网络图
#[derive(Debug)]
pub struct Graph {
    /// 节点出边（下标 = 节点 ID - 1）
    adjacency: Vec<Adjacency>,
    /// 线表，按插入顺序存储，槽位即下标
    lines: IndexMap<LineId, Line>,
}

impl Graph {
    pub(crate) fn from_parts(adjacency: Vec<Adjacency>, lines: IndexMap<LineId, Line>) -> Self {
        Self { adjacency, lines }
    }

    // ==================== 规模 ====================

    /// 节点数量
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// 无向线数量（每条线贡献两条有向边）
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 有向边数量
    pub fn directed_edge_count(&self) -> usize {
        self.lines.len() * 2
    }

    // ==================== 节点 ====================

    /// 所有节点 ID（按 ID 升序）
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).map(NodeId::from_index)
    }

    /// 节点是否存在
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.0 >= 1 && node.index() < self.adjacency.len()
    }

    /// 校验节点存在
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(Error::NodeNotFound(node))
        }
    }

    /// 节点的出边；不存在的节点返回空切片
    pub fn out_edges(&self, node: NodeId) -> &[OutEdge] {
        if self.contains_node(node) {
            &self.adjacency[node.index()]
        } else {
            &[]
        }
    }

    /// 节点度数（自环计两次）
    pub fn degree(&self, node: NodeId) -> usize {
        self.out_edges(node).len()
    }

    // ==================== 线 ====================

    /// 所有线（按插入顺序）
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.values()
    }

    /// 按 ID 查找线
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// 线的存储槽位
    pub fn line_slot(&self, id: LineId) -> Option<usize> {
        self.lines.get_index_of(&id)
    }

    // ==================== 有向边 ====================

    /// 有向边的代价（两个方向相同）
    pub fn edge_cost(&self, edge: &OutEdge) -> Cost {
        self.lines[edge.slot()].cost
    }

    /// 有向边的容量（两个方向相同）
    pub fn edge_capacity(&self, edge: &OutEdge) -> Capacity {
        self.lines[edge.slot()].capacity
    }

    /// 按有向边标识查询代价，线不存在返回 `None`
    pub fn cost_of(&self, edge: DirectedEdge) -> Option<Cost> {
        self.line(edge.line()).map(|line| line.cost)
    }

    /// 按有向边标识查询容量，线不存在返回 `None`
    pub fn capacity_of(&self, edge: DirectedEdge) -> Option<Capacity> {
        self.line(edge.line()).map(|line| line.capacity)
    }

    /// 有向边的终点
    pub fn edge_head(&self, edge: DirectedEdge) -> Option<NodeId> {
        self.line(edge.line())
            .map(|line| line.head_of(edge.direction()))
    }

    /// 有向边的起点
    pub fn edge_tail(&self, edge: DirectedEdge) -> Option<NodeId> {
        self.line(edge.line())
            .map(|line| line.tail_of(edge.direction()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::types::Direction;

    #[test]
    fn test_graph_basic() {
        let mut builder = GraphBuilder::new(3);
        builder.add_line(1, 1, 2, 5).unwrap();
        builder.add_line(2, 2, 3, 7).unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.line_count(), 2);
        assert_eq!(graph.directed_edge_count(), 4);

        // 节点 2 同时是线 1 的头和线 2 的尾
        let out: Vec<i64> = graph
            .out_edges(NodeId::new(2))
            .iter()
            .map(|e| e.edge().signed_id())
            .collect();
        assert_eq!(out, vec![-1, 2]);

        let e = graph.out_edges(NodeId::new(3))[0];
        assert_eq!(e.direction(), Direction::Backward);
        assert_eq!(e.head(), NodeId::new(2));
        assert_eq!(graph.edge_cost(&e), 7);
        assert_eq!(graph.edge_head(e.edge()), Some(NodeId::new(2)));
        assert_eq!(graph.edge_tail(e.edge()), Some(NodeId::new(3)));
    }

    #[test]
    fn test_directed_edge_lookup() {
        let mut builder = GraphBuilder::new(2);
        builder.add_line_with_capacity(4, 1, 2, 6, 3).unwrap();
        let graph = builder.build().unwrap();

        let backward = DirectedEdge::backward(LineId::new(4));
        assert_eq!(graph.cost_of(backward), Some(6));
        assert_eq!(graph.capacity_of(backward), Some(3));
        assert_eq!(graph.cost_of(backward.reversed()), Some(6));

        let missing = DirectedEdge::forward(LineId::new(5));
        assert_eq!(graph.cost_of(missing), None);
        assert_eq!(graph.capacity_of(missing), None);
        assert_eq!(graph.edge_head(missing), None);
    }

    #[test]
    fn test_graph_unknown_node() {
        let graph = GraphBuilder::new(2).build().unwrap();

        assert!(graph.out_edges(NodeId::new(0)).is_empty());
        assert!(graph.out_edges(NodeId::new(3)).is_empty());
        assert!(graph.check_node(NodeId::new(2)).is_ok());
        assert!(matches!(
            graph.check_node(NodeId::new(3)),
            Err(Error::NodeNotFound(_))
        ));
    }
}
