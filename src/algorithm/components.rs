//! 连通分量算法
//!
//! - 弱连通分量：忽略方向的可达关系
//! - 强连通分量：Kosaraju 两遍 DFS。第一遍只沿正向边求完成顺序，
//!   第二遍只沿反向边扩展；反向边恰好构成正向图的转置，无需另建转置图。

use crate::graph::{Graph, NodeId};
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 遍历时允许通过的有向边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeFilter {
    /// 两个方向都可通过（无向解释）
    Any,
    /// 只通过指定方向的边
    Only(Direction),
}

impl EdgeFilter {
    fn accepts(self, direction: Direction) -> bool {
        match self {
            EdgeFilter::Any => true,
            EdgeFilter::Only(d) => d == direction,
        }
    }
}

/// 分量划分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    /// 每个节点的分量标签（下标 = 节点 ID - 1，标签从 1 开始）
    labels: Vec<u32>,
    /// 分量数量
    count: u32,
}

impl Components {
    /// 分量数量
    pub fn count(&self) -> u32 {
        self.count
    }

    /// 节点的分量标签
    pub fn label(&self, node: NodeId) -> Option<u32> {
        self.labels.get(node.index()).copied()
    }

    /// 全部标签
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// 两节点是否位于同一分量
    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        match (self.label(a), self.label(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// 分量内的节点（按 ID 升序）
    pub fn members(&self, label: u32) -> Vec<NodeId> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(i, _)| NodeId::from_index(i))
            .collect()
    }

    /// 各分量大小（下标 = 标签 - 1）
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count as usize];
        for &label in &self.labels {
            sizes[label as usize - 1] += 1;
        }
        sizes
    }
}

/// 连通分量分析器
pub struct ComponentFinder {
    graph: Arc<Graph>,
}

impl ComponentFinder {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 弱连通分量，按节点 ID 顺序分配标签
    pub fn weak_components(&self) -> Components {
        let graph = &*self.graph;
        let mut labels = vec![0u32; graph.node_count()];
        let mut count = 0;

        for node in graph.nodes() {
            if labels[node.index()] == 0 {
                count += 1;
                flood_fill(graph, node, count, EdgeFilter::Any, &mut labels);
            }
        }

        tracing::debug!(nodes = graph.node_count(), count, "weak components computed");
        Components { labels, count }
    }

    /// 强连通分量（Kosaraju）
    pub fn strong_components(&self) -> Components {
        let graph = &*self.graph;
        let order = finish_order(graph, EdgeFilter::Only(Direction::Forward));

        let mut labels = vec![0u32; graph.node_count()];
        let mut count = 0;

        for &node in order.iter().rev() {
            if labels[node.index()] == 0 {
                count += 1;
                flood_fill(
                    graph,
                    node,
                    count,
                    EdgeFilter::Only(Direction::Backward),
                    &mut labels,
                );
            }
        }

        tracing::debug!(nodes = graph.node_count(), count, "strong components computed");
        Components { labels, count }
    }
}

/// 从 start 出发，给所有未标记的可达节点打上 label
fn flood_fill(graph: &Graph, start: NodeId, label: u32, filter: EdgeFilter, labels: &mut [u32]) {
    labels[start.index()] = label;
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        for out in graph.out_edges(node) {
            let next = out.head();
            if filter.accepts(out.direction()) && labels[next.index()] == 0 {
                labels[next.index()] = label;
                stack.push(next);
            }
        }
    }
}

/// 迭代 DFS，按完成（后序）顺序返回所有节点
fn finish_order(graph: &Graph, filter: EdgeFilter) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());
    // (节点, 下一条待检查出边的下标)
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for start in graph.nodes() {
        if visited[start.index()] {
            continue;
        }
        visited[start.index()] = true;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (node, cursor) = *top;
            match graph.out_edges(node).get(cursor) {
                Some(out) => {
                    top.1 += 1;
                    let next = out.head();
                    if filter.accepts(out.direction()) && !visited[next.index()] {
                        visited[next.index()] = true;
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                    order.push(node);
                }
            }
        }
    }

    order
}
