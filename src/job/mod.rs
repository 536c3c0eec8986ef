// Job snapshot model
//
// Decoded form of the job-info document returned by the job service.
// Every field is optional on the wire: a missing field decodes to its
// empty value so that the views never have to special-case partial data.

pub mod source;

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub use source::{FileJobSource, HttpJobSource, JobSource};

/// Lifecycle state of a job (also used as per-vertex display status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Initializing,
    Created,
    Pending,
    Scheduled,
    Running,
    Failing,
    DoingSavepoint,
    SavepointDone,
    Failed,
    Canceling,
    Canceled,
    Finished,
    Unknowable,
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Wire name of the status, as shown in tags
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Initializing => "INITIALIZING",
            JobStatus::Created => "CREATED",
            JobStatus::Pending => "PENDING",
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::Running => "RUNNING",
            JobStatus::Failing => "FAILING",
            JobStatus::DoingSavepoint => "DOING_SAVEPOINT",
            JobStatus::SavepointDone => "SAVEPOINT_DONE",
            JobStatus::Failed => "FAILED",
            JobStatus::Canceling => "CANCELING",
            JobStatus::Canceled => "CANCELED",
            JobStatus::Finished => "FINISHED",
            JobStatus::Unknowable => "UNKNOWABLE",
            JobStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn is_running(&self) -> bool {
        *self == JobStatus::Running
    }
}

/// Kind of pipeline stage a vertex represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexType {
    Source,
    Sink,
    Transform,
    #[default]
    #[serde(other)]
    Other,
}

impl VertexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexType::Source => "source",
            VertexType::Sink => "sink",
            VertexType::Transform => "transform",
            VertexType::Other => "other",
        }
    }
}

/// A pipeline stage in the job's execution graph
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vertex {
    #[serde(deserialize_with = "null_as_default")]
    pub vertex_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub vertex_name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub vertex_type: VertexType,
    #[serde(deserialize_with = "null_as_default")]
    pub table_paths: Vec<String>,
}

/// Directed connection between two vertices, ids kept string-encoded
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Edge {
    #[serde(deserialize_with = "string_or_number")]
    pub input_vertex_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub target_vertex_id: String,
}

impl Edge {
    #[cfg(test)]
    pub fn new(input: impl ToString, target: impl ToString) -> Self {
        Self {
            input_vertex_id: input.to_string(),
            target_vertex_id: target.to_string(),
        }
    }
}

/// Edges grouped by pipeline id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineEdges(BTreeMap<String, Vec<Edge>>);

impl<'de> Deserialize<'de> for PipelineEdges {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A null pipeline list is an empty pipeline
        let pipelines = Option::<BTreeMap<String, Option<Vec<Edge>>>>::deserialize(deserializer)?;
        Ok(Self(
            pipelines
                .unwrap_or_default()
                .into_iter()
                .map(|(key, edges)| (key, edges.unwrap_or_default()))
                .collect(),
        ))
    }
}

impl PipelineEdges {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn insert(&mut self, pipeline: impl Into<String>, edges: Vec<Edge>) {
        self.0.insert(pipeline.into(), edges);
    }

    /// True when no pipeline holds any edge
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|edges| edges.is_empty())
    }

    /// Total edge count across all pipelines
    pub fn edge_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Pipelines in display order
    ///
    /// Integer-like keys come first in ascending numeric order, remaining
    /// keys follow lexically. Edge order inside a pipeline is preserved.
    pub fn pipelines(&self) -> Vec<(&str, &[Edge])> {
        let mut pipelines: Vec<(&str, &[Edge])> = self
            .0
            .iter()
            .map(|(key, edges)| (key.as_str(), edges.as_slice()))
            .collect();
        pipelines.sort_by(|(a, _), (b, _)| pipeline_key_order(a, b));
        pipelines
    }

    /// All edges in storage order, without sorting the pipelines
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.0.values().flatten()
    }
}

/// Largest key that still counts as an array index
const MAX_INDEX_KEY: u64 = u32::MAX as u64 - 1;

/// Numeric value of a canonical index key: ASCII digits, no sign, no
/// leading zero, at most `MAX_INDEX_KEY`
fn index_key(key: &str) -> Option<u64> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u64>().ok().filter(|n| *n <= MAX_INDEX_KEY)
}

fn pipeline_key_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (index_key(a), index_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// DAG part of the job snapshot
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDag {
    #[serde(deserialize_with = "null_as_default")]
    pub vertex_info_map: Vec<Vertex>,
    pub pipeline_edges: PipelineEdges,
}

/// Metric snapshot: metric name -> table path -> value
pub type MetricsSnapshot = BTreeMap<String, BTreeMap<String, MetricValue>>;

/// Numeric metric value
///
/// The job service reports some counters as strings; both forms are
/// accepted and anything unparseable counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricValue(pub f64);

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let number = match value {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
            serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(MetricValue(number))
    }
}

/// Aggregate job snapshot as returned by the job service
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(deserialize_with = "string_or_number")]
    pub job_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_status: JobStatus,
    #[serde(deserialize_with = "optional_string_or_number")]
    pub create_time: Option<String>,
    #[serde(deserialize_with = "optional_string_or_number")]
    pub finish_time: Option<String>,
    pub error_msg: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub job_dag: JobDag,
    #[serde(deserialize_with = "per_table_metrics")]
    pub metrics: MetricsSnapshot,
    #[serde(deserialize_with = "null_as_default")]
    pub env_options: serde_json::Map<String, serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub plugin_jars_urls: Vec<String>,
}

impl Job {
    pub fn vertices(&self) -> &[Vertex] {
        &self.job_dag.vertex_info_map
    }

    pub fn edges(&self) -> &PipelineEdges {
        &self.job_dag.pipeline_edges
    }

    pub fn vertex(&self, vertex_id: i64) -> Option<&Vertex> {
        self.vertices().iter().find(|v| v.vertex_id == vertex_id)
    }
}

/// Accept a JSON string or number (or null) and keep it as a string
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Decode an explicit null the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep only the per-table metric maps
///
/// The service also reports job-wide totals as plain scalars next to the
/// per-table maps (`"SourceReceivedCount": "10"`); those entries are
/// dropped.
fn per_table_metrics<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MetricsSnapshot, D::Error> {
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    let mut metrics = MetricsSnapshot::new();
    for (name, value) in raw.unwrap_or_default() {
        if let serde_json::Value::Object(tables) = value {
            let tables = tables
                .into_iter()
                .map(|(path, v)| (path, serde_json::from_value(v).unwrap_or_default()))
                .collect();
            metrics.insert(name, tables);
        }
    }
    Ok(metrics)
}

fn optional_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = string_or_number(deserializer)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "jobId": 733584788375666689,
        "jobName": "fake_to_console",
        "jobStatus": "RUNNING",
        "createTime": "2024-03-01 10:00:00",
        "jobDag": {
            "vertexInfoMap": [
                {"vertexId": 1, "type": "source", "vertexName": "FakeSource", "tablePaths": ["fake"]},
                {"vertexId": 2, "type": "sink", "vertexName": "Console", "tablePaths": ["fake"]}
            ],
            "pipelineEdges": {"0": [{"inputVertexId": "1", "targetVertexId": 2}]}
        },
        "metrics": {"TableSourceReceivedBytes": {"fake": "128"}, "TableSinkWriteCount": {"fake": 4}},
        "envOptions": {"job.mode": "STREAMING", "parallelism": 2}
    }"#;

    #[test]
    fn test_decode_full_snapshot() {
        let job: Job = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(job.job_id, "733584788375666689");
        assert_eq!(job.job_status, JobStatus::Running);
        assert_eq!(job.vertices().len(), 2);
        assert_eq!(job.vertices()[0].vertex_type, VertexType::Source);
        assert_eq!(job.edges().edge_count(), 1);
        assert_eq!(job.edges().all_edges().next(), Some(&Edge::new(1, 2)));
        assert_eq!(job.metrics["TableSourceReceivedBytes"]["fake"], MetricValue(128.0));
        assert_eq!(job.metrics["TableSinkWriteCount"]["fake"], MetricValue(4.0));
        assert_eq!(job.env_options.len(), 2);
    }

    #[test]
    fn test_decode_empty_object() {
        let job: Job = serde_json::from_str("{}").unwrap();

        assert_eq!(job, Job::default());
        assert!(job.vertices().is_empty());
        assert!(job.edges().is_empty());
        assert_eq!(job.job_status, JobStatus::Unknown);
    }

    #[test]
    fn test_epoch_create_time_is_kept_as_string() {
        let job: Job = serde_json::from_str(r#"{"createTime": 1709287200000, "finishTime": null}"#).unwrap();
        assert_eq!(job.create_time.as_deref(), Some("1709287200000"));
        assert_eq!(job.finish_time, None);
    }

    #[test]
    fn test_unknown_enums_fall_back() {
        let job: Job = serde_json::from_str(
            r#"{"jobStatus": "REWINDING", "jobDag": {"vertexInfoMap": [{"vertexId": 3, "type": "shuffle"}]}}"#,
        )
        .unwrap();

        assert_eq!(job.job_status, JobStatus::Unknown);
        assert_eq!(job.vertices()[0].vertex_type, VertexType::Other);
    }

    #[test]
    fn test_bad_metric_value_is_zero() {
        let job: Job =
            serde_json::from_str(r#"{"metrics": {"TableSinkWriteBytes": {"t": "n/a", "u": null}}}"#)
                .unwrap();

        assert_eq!(job.metrics["TableSinkWriteBytes"]["t"], MetricValue(0.0));
        assert_eq!(job.metrics["TableSinkWriteBytes"]["u"], MetricValue(0.0));
    }

    #[test]
    fn test_scalar_job_totals_are_skipped() {
        let job: Job = serde_json::from_str(
            r#"{"metrics": {"SourceReceivedCount": "10", "SinkWriteQPS": 1.5,
                "TableSourceReceivedBytes": {"a": 1}}}"#,
        )
        .unwrap();

        assert_eq!(job.metrics.len(), 1);
        assert_eq!(job.metrics["TableSourceReceivedBytes"]["a"], MetricValue(1.0));
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        for doc in [
            r#"{"jobDag": null}"#,
            r#"{"envOptions": null}"#,
            r#"{"metrics": null}"#,
            r#"{"jobName": null}"#,
            r#"{"jobStatus": null, "pluginJarsUrls": null}"#,
            r#"{"jobDag": {"pipelineEdges": null, "vertexInfoMap": null}}"#,
        ] {
            let job: Job = serde_json::from_str(doc).unwrap();
            assert_eq!(job, Job::default(), "{}", doc);
        }
    }

    #[test]
    fn test_null_pipeline_and_vertex_fields() {
        let job: Job = serde_json::from_str(
            r#"{"jobDag": {
                "vertexInfoMap": [{"vertexId": 4, "vertexName": null, "type": null, "tablePaths": null}],
                "pipelineEdges": {"0": null, "1": [{"inputVertexId": "4", "targetVertexId": "5"}]}
            }}"#,
        )
        .unwrap();

        assert_eq!(job.vertices()[0].vertex_id, 4);
        assert_eq!(job.vertices()[0].vertex_name, "");
        assert_eq!(job.vertices()[0].vertex_type, VertexType::Other);
        assert!(job.vertices()[0].table_paths.is_empty());
        assert_eq!(job.edges().edge_count(), 1);
    }

    #[test]
    fn test_only_canonical_index_keys_sort_numerically() {
        let mut edges = PipelineEdges::new();
        for key in ["1", "+1", "0", "01", "4294967295", "4294967294"] {
            edges.insert(key, Vec::new());
        }

        let keys: Vec<&str> = edges.pipelines().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["0", "1", "4294967294", "+1", "01", "4294967295"]);
    }

    #[test]
    fn test_pipeline_order_is_numeric() {
        let mut edges = PipelineEdges::new();
        edges.insert("10", vec![Edge::new(10, 11)]);
        edges.insert("2", vec![Edge::new(2, 3)]);
        edges.insert("alpha", vec![Edge::new(7, 8)]);

        let keys: Vec<&str> = edges.pipelines().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2", "10", "alpha"]);
    }

    #[test]
    fn test_status_names_round_trip_through_serde() {
        let status: JobStatus = serde_json::from_str("\"DOING_SAVEPOINT\"").unwrap();
        assert_eq!(status, JobStatus::DoingSavepoint);
        assert_eq!(status.as_str(), "DOING_SAVEPOINT");
    }
}
