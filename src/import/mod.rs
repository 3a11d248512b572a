//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 线表构建网络图。线表每行一条线：
//! `line,tail,head,cost[,capacity]`，容量缺省时等于代价。
//! 任一行无效即整体失败，不会生成缺线的图。

use crate::error::{Error, Result};
use crate::graph::{Graph, GraphBuilder, LineId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub lines_imported: usize,
    pub nodes: usize,
    pub duration_ms: u64,
}

/// 线表记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub line: i64,
    pub tail: i64,
    pub head: i64,
    pub cost: i64,
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// 线表导入器
#[derive(Debug, Default, Clone)]
pub struct LineTableImporter {
    node_count: Option<u32>,
}

impl LineTableImporter {
    /// 创建导入器，节点数量由最大端点 ID 推断
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定节点数量（允许存在无连接的孤立节点）
    pub fn with_node_count(mut self, count: u32) -> Self {
        self.node_count = Some(count);
        self
    }

    /// 从 CSV 文件导入（带表头）
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<(Arc<Graph>, ImportStats)> {
        let file = File::open(path)?;
        self.import_csv_reader(file)
    }

    /// 从任意 CSV 数据源导入
    pub fn import_csv_reader<R: Read>(&self, reader: R) -> Result<(Arc<Graph>, ImportStats)> {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for record in reader.deserialize::<LineRecord>() {
            records.push(record?);
        }

        self.build(records, start)
    }

    /// 从 JSON Lines 文件导入，空行忽略
    pub fn import_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<(Arc<Graph>, ImportStats)> {
        let start = Instant::now();
        let reader = BufReader::new(File::open(path)?);

        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: LineRecord = serde_json::from_str(&line).map_err(|e| {
                Error::ParseError(format!("第 {} 行 JSON 解析错误: {}", number + 1, e))
            })?;
            records.push(record);
        }

        self.build(records, start)
    }

    fn build(&self, records: Vec<LineRecord>, start: Instant) -> Result<(Arc<Graph>, ImportStats)> {
        let mut builder =
            GraphBuilder::new(self.node_count.unwrap_or(0)).with_capacity_hint(records.len());
        let mut max_endpoint = 0u32;

        for record in &records {
            let line = to_line_id(record.line)?;
            let tail = to_node_id(record.tail)?;
            let head = to_node_id(record.head)?;
            let cost = to_amount(line, record.cost)?;
            let capacity = match record.capacity {
                Some(value) => to_amount(line, value)?,
                None => cost,
            };

            builder.add_line_with_capacity(line.as_u32(), tail, head, cost, capacity)?;
            max_endpoint = max_endpoint.max(tail).max(head);
        }

        if self.node_count.is_none() {
            builder.ensure_nodes(max_endpoint);
        }

        let graph = builder.build()?;
        let stats = ImportStats {
            lines_imported: records.len(),
            nodes: graph.node_count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            lines = stats.lines_imported,
            nodes = stats.nodes,
            duration_ms = stats.duration_ms,
            "line table imported"
        );

        Ok((graph, stats))
    }
}

fn to_line_id(value: i64) -> Result<LineId> {
    match u32::try_from(value) {
        Ok(id) if id > 0 => Ok(LineId::new(id)),
        _ => Err(Error::InvalidLineId(value.max(0) as u64)),
    }
}

fn to_node_id(value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidNodeId(value.max(0) as u64)),
    }
}

fn to_amount(line: LineId, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::NegativeCost { line, value })
}

/// 从 CSV 线表导入
pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<(Arc<Graph>, ImportStats)> {
    LineTableImporter::new().import_csv(path)
}
