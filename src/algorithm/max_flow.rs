//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）。
//! 每条线只保存一个带符号的流量槽位：沿正向边推进流量使其增加，
//! 沿反向边推进使其减少，因此无需单独的反向边表。

use crate::error::{Error, Result};
use crate::graph::{Graph, LineId, NodeId, OutEdge};
use crate::types::{Direction, Flow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

/// 最大流使用的容量来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacitySource {
    /// 线的独立容量属性
    #[default]
    Capacity,
    /// 复用线的代价作为容量
    Cost,
}

/// 最大流选项
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOptions {
    pub capacity: CapacitySource,
}

impl FlowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置容量来源
    pub fn with_capacity_source(mut self, capacity: CapacitySource) -> Self {
        self.capacity = capacity;
        self
    }
}

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub total: Flow,
    /// 每条线的带符号流量（按图中线的顺序）
    pub flows: IndexMap<LineId, Flow>,
    /// 最小割的源侧节点集（残量图中从源点可达的节点）
    pub source_side: BTreeSet<NodeId>,
}

impl MaxFlow {
    fn zero(graph: &Graph) -> Self {
        Self {
            total: 0,
            flows: graph.lines().map(|line| (line.id, 0)).collect(),
            source_side: BTreeSet::new(),
        }
    }

    /// 线上的流量，正值为沿线正向
    pub fn flow_on(&self, line: LineId) -> Flow {
        self.flows.get(&line).copied().unwrap_or(0)
    }

    /// 节点的净流出量（流出减流入）
    pub fn net_outflow(&self, graph: &Graph, node: NodeId) -> Flow {
        graph
            .lines()
            .map(|line| {
                let flow = self.flow_on(line.id);
                let mut net = 0;
                if line.tail == node {
                    net += flow;
                }
                if line.head == node {
                    net -= flow;
                }
                net
            })
            .sum()
    }

    /// 最小割：恰有一个端点位于源侧的线
    pub fn min_cut(&self, graph: &Graph) -> Vec<LineId> {
        graph
            .lines()
            .filter(|line| {
                self.source_side.contains(&line.tail) != self.source_side.contains(&line.head)
            })
            .map(|line| line.id)
            .collect()
    }
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp {
    graph: Arc<Graph>,
    options: FlowOptions,
}

impl EdmondsKarp {
    /// 创建算法实例
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            graph,
            options: FlowOptions::default(),
        }
    }

    /// 设置选项
    pub fn with_options(mut self, options: FlowOptions) -> Self {
        self.options = options;
        self
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&self, source: NodeId, sink: NodeId) -> Result<MaxFlow> {
        self.max_flow_between(&[source], &[sink])
    }

    /// 计算多源多汇最大流
    ///
    /// BFS 同时从所有源点出发，到达任一汇点即得到一条增广路径。
    /// 源点集合与汇点集合相交时直接返回零流。
    pub fn max_flow_between(&self, sources: &[NodeId], sinks: &[NodeId]) -> Result<MaxFlow> {
        if sources.is_empty() {
            return Err(Error::EmptySources);
        }
        if sinks.is_empty() {
            return Err(Error::EmptySinks);
        }
        for &node in sources.iter().chain(sinks) {
            self.graph.check_node(node)?;
        }

        let graph = &*self.graph;
        let n = graph.node_count();

        let mut is_sink = vec![false; n];
        for sink in sinks {
            is_sink[sink.index()] = true;
        }
        if sources.iter().any(|s| is_sink[s.index()]) {
            tracing::debug!("source and sink sets overlap, returning zero flow");
            return Ok(MaxFlow::zero(graph));
        }

        let capacity: Vec<Flow> = graph
            .lines()
            .map(|line| match self.options.capacity {
                CapacitySource::Capacity => Flow::from(line.capacity),
                CapacitySource::Cost => Flow::from(line.cost),
            })
            .collect();
        let mut flow: Vec<Flow> = vec![0; graph.line_count()];

        let mut visited = vec![false; n];
        let mut parent: Vec<Option<(NodeId, OutEdge)>> = vec![None; n];
        let mut total: Flow = 0;
        let mut rounds = 0usize;

        // Edmonds-Karp: 重复 BFS 找增广路径
        while let Some(reached) = self.bfs_find_path(
            sources,
            &is_sink,
            &capacity,
            &flow,
            &mut visited,
            &mut parent,
        ) {
            // 计算瓶颈
            let mut bottleneck = Flow::MAX;
            let mut current = reached;
            while let Some((prev, out)) = parent[current.index()] {
                bottleneck = bottleneck.min(residual(&out, &capacity, &flow));
                current = prev;
            }

            // 沿路径增广
            let mut current = reached;
            while let Some((prev, out)) = parent[current.index()] {
                match out.direction() {
                    Direction::Forward => flow[out.slot()] += bottleneck,
                    Direction::Backward => flow[out.slot()] -= bottleneck,
                }
                current = prev;
            }

            total += bottleneck;
            rounds += 1;
            tracing::trace!(%bottleneck, %total, "augmenting path applied");
        }

        // 最后一轮失败的 BFS 所访问的节点即最小割源侧
        let source_side = graph.nodes().filter(|node| visited[node.index()]).collect();

        tracing::debug!(
            sources = sources.len(),
            sinks = sinks.len(),
            rounds,
            %total,
            "max flow computed"
        );

        Ok(MaxFlow {
            total,
            flows: graph
                .lines()
                .zip(flow)
                .map(|(line, value)| (line.id, value))
                .collect(),
            source_side,
        })
    }

    /// BFS 找增广路径，返回到达的汇点
    fn bfs_find_path(
        &self,
        sources: &[NodeId],
        is_sink: &[bool],
        capacity: &[Flow],
        flow: &[Flow],
        visited: &mut [bool],
        parent: &mut [Option<(NodeId, OutEdge)>],
    ) -> Option<NodeId> {
        visited.fill(false);
        parent.fill(None);

        let mut queue = VecDeque::new();
        for &source in sources {
            if !visited[source.index()] {
                visited[source.index()] = true;
                queue.push_back(source);
            }
        }

        while let Some(u) = queue.pop_front() {
            for out in self.graph.out_edges(u) {
                let v = out.head();
                if visited[v.index()] || residual(out, capacity, flow) <= 0 {
                    continue;
                }

                visited[v.index()] = true;
                parent[v.index()] = Some((u, *out));
                if is_sink[v.index()] {
                    return Some(v);
                }
                queue.push_back(v);
            }
        }

        None
    }
}

/// 有向边的残余容量
fn residual(out: &OutEdge, capacity: &[Flow], flow: &[Flow]) -> Flow {
    let slot = out.slot();
    match out.direction() {
        Direction::Forward => capacity[slot] - flow[slot],
        Direction::Backward => capacity[slot] + flow[slot],
    }
}
