//! 命令行输出支持

mod printer;

pub use printer::{
    articulation_rows, bridge_rows, component_rows, distance_rows, flow_rows, path_rows,
    PrintMode, Printer,
};
