//! 网络分析算法模块
//!
//! 包含最短路径、最大流、连通分量以及桥与割点。
//! 所有算法只读访问 [`Graph`](crate::graph::Graph)，每次调用独立分配工作数组。

mod bridges;
mod components;
mod max_flow;
mod shortest_path;

pub use bridges::{BridgeFinder, Connectivity};
pub use components::{ComponentFinder, Components};
pub use max_flow::{CapacitySource, EdmondsKarp, FlowOptions, MaxFlow};
pub use shortest_path::{Path, ShortestPath, ShortestPaths};
