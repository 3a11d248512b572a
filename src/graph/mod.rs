//! 图核心模块
//!
//! 定义节点、线、有向边和只读网络图

mod builder;
mod edge;
mod graph;
mod node;

pub use builder::GraphBuilder;
pub use edge::{DirectedEdge, Line, LineId, OutEdge};
pub use graph::Graph;
pub use node::NodeId;
