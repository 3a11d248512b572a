//! 错误类型定义

use crate::graph::{LineId, NodeId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(NodeId),

    #[error("无效的节点 ID: {0}（节点 ID 从 1 开始）")]
    InvalidNodeId(u64),

    #[error("无效的线 ID: {0}（线 ID 必须为正整数）")]
    InvalidLineId(u64),

    #[error("线已存在: {0}")]
    DuplicateLine(LineId),

    #[error("线 {line} 的代价为负数: {value}")]
    NegativeCost { line: LineId, value: i64 },

    #[error("源节点集合为空")]
    EmptySources,

    #[error("汇节点集合为空")]
    EmptySinks,

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}
