//! 最短路径算法
//!
//! 多源 Dijkstra：输出每个节点到最近源点的距离和前驱边

use crate::error::{Error, Result};
use crate::graph::{DirectedEdge, Graph, NodeId};
use crate::types::Cost;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// 起点（某个源点）
    pub source: NodeId,
    /// 终点
    pub target: NodeId,
    /// 路径上的节点序列
    pub nodes: Vec<NodeId>,
    /// 路径上的有向边序列
    pub edges: Vec<DirectedEdge>,
    /// 路径总代价
    pub cost: Cost,
}

impl Path {
    /// 路径边数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// 距离与前驱数组（下标 = 节点 ID - 1）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortestPaths {
    dist: Vec<Option<Cost>>,
    prev: Vec<Option<DirectedEdge>>,
}

impl ShortestPaths {
    /// 到最近源点的距离，不可达返回 `None`
    pub fn distance(&self, node: NodeId) -> Option<Cost> {
        self.dist.get(node.index()).copied().flatten()
    }

    /// 首次到达该节点所经过的有向边；源点和不可达节点返回 `None`
    pub fn predecessor(&self, node: NodeId) -> Option<DirectedEdge> {
        self.prev.get(node.index()).copied().flatten()
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    /// 可达节点数量（含源点）
    pub fn reachable_count(&self) -> usize {
        self.dist.iter().filter(|d| d.is_some()).count()
    }

    /// 以 -1 表示不可达的带符号距离数组，用于报告输出
    pub fn distances(&self) -> Vec<i128> {
        self.dist
            .iter()
            .map(|d| d.map(i128::from).unwrap_or(-1))
            .collect()
    }

    /// 沿前驱边回溯，重构从源点到 `target` 的路径
    pub fn path_to(&self, graph: &Graph, target: NodeId) -> Option<Path> {
        let cost = self.distance(target)?;
        let mut nodes = vec![target];
        let mut edges = Vec::new();
        let mut current = target;

        while let Some(edge) = self.predecessor(current) {
            current = graph.edge_tail(edge)?;
            edges.push(edge);
            nodes.push(current);
        }

        nodes.reverse();
        edges.reverse();

        Some(Path {
            source: current,
            target,
            nodes,
            edges,
            cost,
        })
    }
}

/// 最短路径求解器
pub struct ShortestPath {
    graph: Arc<Graph>,
}

impl ShortestPath {
    /// 创建求解器
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 计算所有节点到源点集合的最短距离
    ///
    /// 堆中元素为 `(距离, 节点 ID)`，距离相同时按节点 ID 出堆，结果确定。
    /// 堆不支持 decrease-key，过期条目在出堆时丢弃。
    /// 累计代价超出 [`Cost`] 范围的边不做松弛，经由它的节点视为不可达。
    pub fn distance_from_sources(&self, sources: &[NodeId]) -> Result<ShortestPaths> {
        if sources.is_empty() {
            return Err(Error::EmptySources);
        }
        for &source in sources {
            self.graph.check_node(source)?;
        }

        let n = self.graph.node_count();
        let mut dist: Vec<Option<Cost>> = vec![None; n];
        let mut prev: Vec<Option<DirectedEdge>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        // 重复的源点只登记一次
        for &source in sources {
            if dist[source.index()].is_none() {
                dist[source.index()] = Some(0);
                heap.push(Reverse((0, source)));
            }
        }

        while let Some(Reverse((d, node))) = heap.pop() {
            if dist[node.index()].map_or(true, |best| d > best) {
                continue;
            }

            for out in self.graph.out_edges(node) {
                let next = out.head();
                let Some(candidate) = d.checked_add(self.graph.edge_cost(out)) else {
                    continue;
                };

                if let Some(current) = dist[next.index()] {
                    if candidate >= current {
                        continue;
                    }
                }

                dist[next.index()] = Some(candidate);
                prev[next.index()] = Some(out.edge());
                heap.push(Reverse((candidate, next)));
            }
        }

        let result = ShortestPaths { dist, prev };
        tracing::debug!(
            sources = sources.len(),
            nodes = n,
            reachable = result.reachable_count(),
            "shortest paths computed"
        );

        Ok(result)
    }

    /// 两点间最短路径，不可达返回 `None`
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> Result<Option<Path>> {
        self.graph.check_node(to)?;
        let paths = self.distance_from_sources(&[from])?;
        Ok(paths.path_to(&self.graph, to))
    }
}
