//! 结果打印器
//!
//! 提供表格和垂直格式的分析结果输出

use crate::algorithm::{Components, Connectivity, MaxFlow, Path, ShortestPaths};
use crate::graph::Graph;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印结果集
    pub fn print_result(&self, columns: &[&str], rows: &[Vec<String>], elapsed_ms: u64) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set ({} ms)\n", elapsed_ms);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}\n{} row(s) in set ({} ms)\n", output, rows.len(), elapsed_ms)
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印图统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Node Count", graph.node_count().to_string()]);
        table.add_row(row!["Line Count", graph.line_count().to_string()]);
        table.add_row(row![
            "Directed Edge Count",
            graph.directed_edge_count().to_string()
        ]);
        table.to_string()
    }
}

/// 距离表：node, distance, predecessor
pub fn distance_rows(graph: &Graph, paths: &ShortestPaths) -> Vec<Vec<String>> {
    graph
        .nodes()
        .map(|node| {
            vec![
                node.to_string(),
                paths
                    .distance(node)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-1".to_string()),
                paths
                    .predecessor(node)
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}

/// 路径表：step, edge, node
pub fn path_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["0".to_string(), String::new(), path.source.to_string()]];
    for (i, (edge, node)) in path.edges.iter().zip(path.nodes.iter().skip(1)).enumerate() {
        rows.push(vec![(i + 1).to_string(), edge.to_string(), node.to_string()]);
    }
    rows
}

/// 流量表：line, flow（只列出非零流量）
pub fn flow_rows(result: &MaxFlow) -> Vec<Vec<String>> {
    result
        .flows
        .iter()
        .filter(|(_, &flow)| flow != 0)
        .map(|(line, flow)| vec![line.to_string(), flow.to_string()])
        .collect()
}

/// 分量表：component, size, nodes
pub fn component_rows(components: &Components) -> Vec<Vec<String>> {
    (1..=components.count())
        .map(|label| {
            let members = components.members(label);
            let nodes: Vec<String> = members.iter().map(|n| n.to_string()).collect();
            vec![label.to_string(), members.len().to_string(), nodes.join(",")]
        })
        .collect()
}

/// 桥表：line
pub fn bridge_rows(result: &Connectivity) -> Vec<Vec<String>> {
    result
        .bridges
        .iter()
        .map(|line| vec![line.to_string()])
        .collect()
}

/// 割点表：node
pub fn articulation_rows(result: &Connectivity) -> Vec<Vec<String>> {
    result
        .articulation_points
        .iter()
        .map(|node| vec![node.to_string()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{ComponentFinder, ShortestPath};
    use crate::graph::{GraphBuilder, NodeId};

    #[test]
    fn test_print_empty_set() {
        let printer = Printer::default();
        assert_eq!(printer.print_result(&["node"], &[], 3), "Empty set (3 ms)\n");
    }

    #[test]
    fn test_distance_rows_and_vertical_mode() {
        let mut builder = GraphBuilder::new(3);
        builder.add_line(1, 1, 2, 4).unwrap();
        let graph = builder.build().unwrap();
        let paths = ShortestPath::new(graph.clone())
            .distance_from_sources(&[NodeId::new(1)])
            .unwrap();

        let rows = distance_rows(&graph, &paths);
        assert_eq!(rows[1], vec!["2", "4", "+1"]);
        assert_eq!(rows[2], vec!["3", "-1", ""]);

        let printer = Printer::new(PrintMode::Vertical);
        let output = printer.print_result(&["node", "distance", "predecessor"], &rows, 0);
        assert!(output.contains("1. row"));
        assert!(output.contains("3 row(s) in set"));
    }

    #[test]
    fn test_component_rows() {
        let mut builder = GraphBuilder::new(3);
        builder.add_line(1, 1, 3, 1).unwrap();
        let graph = builder.build().unwrap();
        let components = ComponentFinder::new(graph).weak_components();

        let rows = component_rows(&components);
        assert_eq!(rows, vec![vec!["1", "2", "1,3"], vec!["2", "1", "2"]]);
    }
}
