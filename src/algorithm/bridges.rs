//! 桥与割点
//!
//! 基于 DFS low-link（Tarjan）的迭代实现，按无向方式解释网络。
//! 跳过进入节点时使用的那条线（而不是父节点），使两节点间的平行线
//! 能互相构成回边，不会被误判为桥。

use crate::graph::{Graph, LineId, NodeId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 桥与割点分析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    /// 桥（按线 ID 升序）
    pub bridges: Vec<LineId>,
    /// 割点（按节点 ID 升序）
    pub articulation_points: Vec<NodeId>,
}

/// DFS 栈帧
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    /// 进入该节点所用的线，根节点为 None
    entry: Option<LineId>,
    /// 下一条待检查出边的下标
    cursor: usize,
}

/// 桥与割点查找器
pub struct BridgeFinder {
    graph: Arc<Graph>,
}

impl BridgeFinder {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self { graph }
    }

    /// 所有桥
    pub fn bridges(&self) -> Vec<LineId> {
        self.analyze().bridges
    }

    /// 所有割点
    pub fn articulation_points(&self) -> Vec<NodeId> {
        self.analyze().articulation_points
    }

    /// 一次 DFS 同时求桥和割点
    pub fn analyze(&self) -> Connectivity {
        let graph = &*self.graph;
        let n = graph.node_count();

        // 发现序从 1 开始，0 表示未访问
        let mut disc = vec![0u32; n];
        let mut low = vec![0u32; n];
        let mut is_cut = vec![false; n];
        let mut bridges = Vec::new();
        let mut timer = 0u32;
        let mut stack: Vec<Frame> = Vec::new();

        for root in graph.nodes() {
            if disc[root.index()] != 0 {
                continue;
            }

            timer += 1;
            disc[root.index()] = timer;
            low[root.index()] = timer;
            let mut root_children = 0usize;
            stack.push(Frame {
                node: root,
                entry: None,
                cursor: 0,
            });

            while let Some(top) = stack.last_mut() {
                let Frame {
                    node,
                    entry,
                    cursor,
                } = *top;

                if let Some(out) = graph.out_edges(node).get(cursor) {
                    top.cursor += 1;
                    if entry == Some(out.line()) {
                        continue;
                    }

                    let next = out.head();
                    if disc[next.index()] == 0 {
                        timer += 1;
                        disc[next.index()] = timer;
                        low[next.index()] = timer;
                        if entry.is_none() {
                            root_children += 1;
                        }
                        stack.push(Frame {
                            node: next,
                            entry: Some(out.line()),
                            cursor: 0,
                        });
                    } else {
                        low[node.index()] = low[node.index()].min(disc[next.index()]);
                    }
                    continue;
                }

                // 子树处理完毕，回溯到父节点
                stack.pop();
                let Some(parent) = stack.last() else {
                    continue;
                };
                let (u, v) = (parent.node.index(), node.index());
                low[u] = low[u].min(low[v]);

                if low[v] > disc[u] {
                    if let Some(line) = entry {
                        bridges.push(line);
                    }
                }
                if parent.entry.is_some() && low[v] >= disc[u] {
                    is_cut[u] = true;
                }
            }

            if root_children > 1 {
                is_cut[root.index()] = true;
            }
        }

        bridges.sort();
        let articulation_points: Vec<NodeId> =
            graph.nodes().filter(|node| is_cut[node.index()]).collect();

        tracing::debug!(
            nodes = n,
            lines = graph.line_count(),
            bridges = bridges.len(),
            articulation_points = articulation_points.len(),
            "bridges and articulation points computed"
        );

        Connectivity {
            bridges,
            articulation_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn build(n: u32, lines: &[(u32, u32)]) -> Arc<Graph> {
        let mut builder = GraphBuilder::new(n);
        for (i, &(tail, head)) in lines.iter().enumerate() {
            builder.add_line(i as u32 + 1, tail, head, 1).unwrap();
        }
        builder.build().unwrap()
    }

    fn ids(values: &[u32]) -> Vec<LineId> {
        values.iter().map(|&v| LineId::new(v)).collect()
    }

    #[test]
    fn test_triangle_has_no_cuts() {
        let result = BridgeFinder::new(build(3, &[(1, 2), (2, 3), (3, 1)])).analyze();

        assert!(result.bridges.is_empty());
        assert!(result.articulation_points.is_empty());
    }

    #[test]
    fn test_path_graph() {
        let finder = BridgeFinder::new(build(3, &[(1, 2), (2, 3)]));

        assert_eq!(finder.bridges(), ids(&[1, 2]));
        assert_eq!(finder.articulation_points(), vec![NodeId::new(2)]);
    }

    #[test]
    fn test_parallel_lines_are_not_bridges() {
        let result = BridgeFinder::new(build(3, &[(1, 2), (2, 1), (2, 3)])).analyze();

        assert_eq!(result.bridges, ids(&[3]));
        assert_eq!(result.articulation_points, vec![NodeId::new(2)]);
    }

    #[test]
    fn test_self_loop_is_not_bridge() {
        let result = BridgeFinder::new(build(2, &[(1, 1), (1, 2)])).analyze();

        assert_eq!(result.bridges, ids(&[2]));
        assert!(result.articulation_points.is_empty());
    }

    #[test]
    fn test_bowtie() {
        let graph = build(
            6,
            &[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4), (3, 4)],
        );
        let result = BridgeFinder::new(graph).analyze();

        assert_eq!(result.bridges, ids(&[7]));
        assert_eq!(
            result.articulation_points,
            vec![NodeId::new(3), NodeId::new(4)]
        );
    }

    #[test]
    fn test_star_root_is_articulation_point() {
        let result = BridgeFinder::new(build(4, &[(1, 2), (1, 3), (1, 4)])).analyze();

        assert_eq!(result.bridges, ids(&[1, 2, 3]));
        assert_eq!(result.articulation_points, vec![NodeId::new(1)]);
    }

    /// 忽略指定线或节点后的弱连通分量数
    fn count_components(graph: &Graph, skip_line: Option<LineId>, skip_node: Option<NodeId>) -> usize {
        let n = graph.node_count();
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], x: usize) -> usize {
            let mut root = x;
            while parent[root] != root {
                root = parent[root];
            }
            parent[x] = root;
            root
        }

        for line in graph.lines() {
            if Some(line.id) == skip_line
                || Some(line.tail) == skip_node
                || Some(line.head) == skip_node
            {
                continue;
            }
            let a = find(&mut parent, line.tail.index());
            let b = find(&mut parent, line.head.index());
            parent[a] = b;
        }

        (0..n)
            .filter(|&i| Some(NodeId::from_index(i)) != skip_node)
            .filter(|&i| find(&mut parent, i) == i)
            .count()
    }

    #[test]
    fn test_matches_removal_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..60 {
            let n = rng.gen_range(1..=9u32);
            let m = rng.gen_range(0..=12usize);
            let lines: Vec<(u32, u32)> = (0..m)
                .map(|_| (rng.gen_range(1..=n), rng.gen_range(1..=n)))
                .collect();
            let graph = build(n, &lines);
            let result = BridgeFinder::new(graph.clone()).analyze();
            let base = count_components(&graph, None, None);

            for line in graph.lines() {
                let after = count_components(&graph, Some(line.id), None);
                assert_eq!(
                    result.bridges.contains(&line.id),
                    after > base,
                    "line {} in {:?}",
                    line.id,
                    lines
                );
                if after > base {
                    assert_eq!(after, base + 1);
                }
            }

            for node in graph.nodes() {
                let after = count_components(&graph, None, Some(node));
                assert_eq!(
                    result.articulation_points.contains(&node),
                    after > base,
                    "node {} in {:?}",
                    node,
                    lines
                );
            }
        }
    }
}
