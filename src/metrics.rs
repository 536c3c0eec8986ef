// Per-vertex metrics aggregation
//
// Builds the rows of the job metrics table: one row per non-transform
// vertex, each metric summed over the vertex's table paths. Source
// columns only count for sources and sink columns only for sinks.

use crate::job::{Job, MetricsSnapshot, Vertex, VertexType};

pub const SOURCE_RECEIVED_BYTES: &str = "TableSourceReceivedBytes";
pub const SOURCE_RECEIVED_COUNT: &str = "TableSourceReceivedCount";
pub const SOURCE_RECEIVED_QPS: &str = "TableSourceReceivedQPS";
pub const SOURCE_RECEIVED_BYTES_PER_SECOND: &str = "TableSourceReceivedBytesPerSeconds";
pub const SINK_WRITE_BYTES: &str = "TableSinkWriteBytes";
pub const SINK_WRITE_COUNT: &str = "TableSinkWriteCount";
pub const SINK_WRITE_QPS: &str = "TableSinkWriteQPS";
pub const SINK_WRITE_BYTES_PER_SECOND: &str = "TableSinkWriteBytesPerSeconds";

/// Metric names of the source columns, in column order
pub const SOURCE_METRICS: [&str; 4] = [
    SOURCE_RECEIVED_BYTES,
    SOURCE_RECEIVED_COUNT,
    SOURCE_RECEIVED_QPS,
    SOURCE_RECEIVED_BYTES_PER_SECOND,
];

/// Metric names of the sink columns, in column order
pub const SINK_METRICS: [&str; 4] = [
    SINK_WRITE_BYTES,
    SINK_WRITE_COUNT,
    SINK_WRITE_QPS,
    SINK_WRITE_BYTES_PER_SECOND,
];

/// Column headers of the metrics table
pub const COLUMN_TITLES: [&str; 8] = [
    "Received Bytes",
    "Write Bytes",
    "Received Count",
    "Write Count",
    "Received QPS",
    "Write QPS",
    "Received Bytes/s",
    "Write Bytes/s",
];

/// One row of the metrics table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexMetricsRow {
    pub vertex_id: i64,
    pub name: String,
    pub kind: VertexType,
    pub received_bytes: f64,
    pub write_bytes: f64,
    pub received_count: f64,
    pub write_count: f64,
    pub received_qps: f64,
    pub write_qps: f64,
    pub received_bytes_per_second: f64,
    pub write_bytes_per_second: f64,
}

impl VertexMetricsRow {
    /// Values in `COLUMN_TITLES` order
    pub fn columns(&self) -> [f64; 8] {
        [
            self.received_bytes,
            self.write_bytes,
            self.received_count,
            self.write_count,
            self.received_qps,
            self.write_qps,
            self.received_bytes_per_second,
            self.write_bytes_per_second,
        ]
    }
}

/// Sum one metric over a list of table paths
///
/// Missing metric names and missing paths contribute zero.
pub fn sum_metric(metrics: &MetricsSnapshot, metric: &str, table_paths: &[String]) -> f64 {
    let Some(by_table) = metrics.get(metric) else {
        return 0.0;
    };
    table_paths
        .iter()
        .filter_map(|path| by_table.get(path))
        .map(|value| value.0)
        .sum()
}

fn side_metric(metrics: &MetricsSnapshot, vertex: &Vertex, kind: VertexType, metric: &str) -> f64 {
    if vertex.vertex_type == kind {
        sum_metric(metrics, metric, &vertex.table_paths)
    } else {
        0.0
    }
}

/// Build the metrics row for a single vertex
pub fn vertex_row(metrics: &MetricsSnapshot, vertex: &Vertex) -> VertexMetricsRow {
    let source = |metric| side_metric(metrics, vertex, VertexType::Source, metric);
    let sink = |metric| side_metric(metrics, vertex, VertexType::Sink, metric);

    VertexMetricsRow {
        vertex_id: vertex.vertex_id,
        name: vertex.vertex_name.clone(),
        kind: vertex.vertex_type,
        received_bytes: source(SOURCE_RECEIVED_BYTES),
        write_bytes: sink(SINK_WRITE_BYTES),
        received_count: source(SOURCE_RECEIVED_COUNT),
        write_count: sink(SINK_WRITE_COUNT),
        received_qps: source(SOURCE_RECEIVED_QPS),
        write_qps: sink(SINK_WRITE_QPS),
        received_bytes_per_second: source(SOURCE_RECEIVED_BYTES_PER_SECOND),
        write_bytes_per_second: sink(SINK_WRITE_BYTES_PER_SECOND),
    }
}

/// Metrics table rows for every non-transform vertex, in vertex order
pub fn metrics_rows(job: &Job) -> Vec<VertexMetricsRow> {
    job.vertices()
        .iter()
        .filter(|v| v.vertex_type != VertexType::Transform)
        .map(|v| vertex_row(&job.metrics, v))
        .collect()
}

/// Per-table breakdown for the drawer
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetrics {
    pub table_path: String,
    /// (metric name, value) pairs for the vertex's side
    pub values: Vec<(&'static str, f64)>,
}

/// Metric values per table path of a vertex
///
/// Sources list the source metrics, sinks the sink metrics; other vertex
/// kinds have no table metrics.
pub fn table_breakdown(metrics: &MetricsSnapshot, vertex: &Vertex) -> Vec<TableMetrics> {
    let names: &[&'static str] = match vertex.vertex_type {
        VertexType::Source => &SOURCE_METRICS,
        VertexType::Sink => &SINK_METRICS,
        _ => &[],
    };
    if names.is_empty() {
        return Vec::new();
    }

    vertex
        .table_paths
        .iter()
        .map(|path| TableMetrics {
            table_path: path.clone(),
            values: names
                .iter()
                .map(|&name| (name, sum_metric(metrics, name, std::slice::from_ref(path))))
                .collect(),
        })
        .collect()
}

/// Format a metric value for a table cell
///
/// Integral values print without decimals, rates keep two.
pub fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
