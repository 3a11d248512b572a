//! NetGraph - 线/节点网络分析库
//!
//! 在由矢量线网络构建的有向图上提供：
//! - 多源最短路径（Dijkstra）
//! - 最大流与最小割（Edmonds-Karp）
//! - 弱连通分量与强连通分量（Kosaraju）
//! - 桥与割点（Tarjan low-link）
//!
//! 每条无向线产生一对方向相反的有向边，二者共享代价、容量和流量。

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    BridgeFinder, ComponentFinder, Components, Connectivity, EdmondsKarp, MaxFlow, ShortestPath,
    ShortestPaths,
};
pub use error::{Error, Result};
pub use graph::{DirectedEdge, Graph, GraphBuilder, Line, LineId, NodeId};
pub use types::{Capacity, Cost, Direction, Flow};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
