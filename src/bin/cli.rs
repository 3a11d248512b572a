//! NetGraph CLI 工具
//!
//! 读取线表并运行网络分析：最短距离、最大流、连通分量、桥与割点

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use netgraph::algorithm::{
    BridgeFinder, CapacitySource, ComponentFinder, EdmondsKarp, FlowOptions, ShortestPath,
};
use netgraph::cli::{self, PrintMode, Printer};
use netgraph::graph::{Graph, NodeId};
use netgraph::import::LineTableImporter;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "netgraph-cli")]
#[command(about = "NetGraph 网络分析命令行工具")]
struct Args {
    /// 线表文件（CSV 或 JSON Lines）
    #[arg(short, long)]
    input: PathBuf,

    /// 节点数量（默认取最大端点 ID）
    #[arg(short, long)]
    nodes: Option<u32>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// 日志级别（可被 RUST_LOG 覆盖）
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Vertical,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示图统计信息
    Stats,
    /// 计算所有节点到源点集合的最短距离
    Distance {
        /// 源节点，逗号分隔
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<u32>,
    },
    /// 查找两点间最短路径
    Path {
        #[arg(long)]
        from: u32,
        #[arg(long)]
        to: u32,
    },
    /// 计算最大流
    Flow {
        /// 源节点，逗号分隔
        #[arg(long, value_delimiter = ',', required = true)]
        source: Vec<u32>,
        /// 汇节点，逗号分隔
        #[arg(long, value_delimiter = ',', required = true)]
        sink: Vec<u32>,
        /// 使用代价作为容量
        #[arg(long)]
        use_cost: bool,
    },
    /// 计算连通分量
    Components {
        /// 计算强连通分量（默认弱连通）
        #[arg(long)]
        strong: bool,
    },
    /// 查找桥
    Bridges,
    /// 查找割点
    Articulation,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("netgraph={}", args.log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut importer = LineTableImporter::new();
    if let Some(count) = args.nodes {
        importer = importer.with_node_count(count);
    }
    let is_jsonl = args
        .input
        .extension()
        .map(|ext| ext == "jsonl" || ext == "json")
        .unwrap_or(false);
    let (graph, _) = if is_jsonl {
        importer.import_jsonl(&args.input)
    } else {
        importer.import_csv(&args.input)
    }
    .with_context(|| format!("无法导入线表 {:?}", args.input))?;

    let printer = Printer::new(match args.format {
        OutputFormat::Vertical => PrintMode::Vertical,
        _ => PrintMode::Table,
    });
    let output = Output {
        printer,
        json: args.format == OutputFormat::Json,
    };

    run(&graph, args.command, &output)
}

/// 输出目标：表格或 JSON
struct Output {
    printer: Printer,
    json: bool,
}

impl Output {
    fn emit<T: Serialize>(
        &self,
        value: &T,
        columns: &[&str],
        rows: Vec<Vec<String>>,
        started: Instant,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            let elapsed = started.elapsed().as_millis() as u64;
            print!("{}", self.printer.print_result(columns, &rows, elapsed));
        }
        Ok(())
    }
}

fn nodes(ids: &[u32]) -> Vec<NodeId> {
    ids.iter().map(|&id| NodeId::new(id)).collect()
}

fn run(graph: &std::sync::Arc<Graph>, command: Command, output: &Output) -> anyhow::Result<()> {
    let started = Instant::now();

    match command {
        Command::Stats => {
            if output.json {
                let stats = serde_json::json!({
                    "nodes": graph.node_count(),
                    "lines": graph.line_count(),
                    "directed_edges": graph.directed_edge_count(),
                });
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", output.printer.print_stats(graph));
            }
        }

        Command::Distance { from } => {
            let paths = ShortestPath::new(graph.clone()).distance_from_sources(&nodes(&from))?;
            let json = serde_json::json!({
                "distance": paths.distances(),
                "predecessor": graph
                    .nodes()
                    .map(|n| paths.predecessor(n).map(|e| e.signed_id()))
                    .collect::<Vec<_>>(),
            });
            output.emit(
                &json,
                &["node", "distance", "predecessor"],
                cli::distance_rows(graph, &paths),
                started,
            )?;
        }

        Command::Path { from, to } => {
            let finder = ShortestPath::new(graph.clone());
            match finder.shortest_path(NodeId::new(from), NodeId::new(to))? {
                Some(path) => {
                    let rows = cli::path_rows(&path);
                    output.emit(&path, &["step", "edge", "node"], rows, started)?;
                    if !output.json {
                        println!("总代价: {}", path.cost);
                    }
                }
                None => println!("未找到路径: {} -> {}", from, to),
            }
        }

        Command::Flow {
            source,
            sink,
            use_cost,
        } => {
            let capacity = if use_cost {
                CapacitySource::Cost
            } else {
                CapacitySource::Capacity
            };
            let result = EdmondsKarp::new(graph.clone())
                .with_options(FlowOptions::new().with_capacity_source(capacity))
                .max_flow_between(&nodes(&source), &nodes(&sink))?;
            let rows = cli::flow_rows(&result);
            output.emit(&result, &["line", "flow"], rows, started)?;
            if !output.json {
                println!("最大流: {}", result.total);
                let cut: Vec<String> = result
                    .min_cut(graph)
                    .iter()
                    .map(|line| line.to_string())
                    .collect();
                println!("最小割: [{}]", cut.join(","));
            }
        }

        Command::Components { strong } => {
            let finder = ComponentFinder::new(graph.clone());
            let components = if strong {
                finder.strong_components()
            } else {
                finder.weak_components()
            };
            let rows = cli::component_rows(&components);
            output.emit(&components, &["component", "size", "nodes"], rows, started)?;
        }

        Command::Bridges => {
            let result = BridgeFinder::new(graph.clone()).analyze();
            let rows = cli::bridge_rows(&result);
            output.emit(&result.bridges, &["line"], rows, started)?;
        }

        Command::Articulation => {
            let result = BridgeFinder::new(graph.clone()).analyze();
            let rows = cli::articulation_rows(&result);
            output.emit(&result.articulation_points, &["node"], rows, started)?;
        }
    }

    Ok(())
}
