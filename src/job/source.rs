// Job-info retrieval
//
// The job service is an external collaborator. `JobSource` is the seam the
// presenter fetches through; the file source serves recorded snapshots and
// the HTTP source talks to a running engine's REST endpoint.

use super::Job;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Request timeout for the HTTP job source
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum JobSourceError {
    #[error("cannot read job file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed job document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("job service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job {0} not found")]
    NotFound(String),
}

/// Anything that can fetch a job snapshot by id
pub trait JobSource {
    fn fetch_job(&self, job_id: &str) -> Result<Job, JobSourceError>;

    /// Short description for the status bar
    fn describe(&self) -> String;
}

/// Reads job snapshots from a JSON file
///
/// The file holds either a single job object or an array of them. With an
/// array the entry whose `jobId` matches is returned.
#[derive(Debug, Clone)]
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl JobSource for FileJobSource {
    fn fetch_job(&self, job_id: &str) -> Result<Job, JobSourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| JobSourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_job_document(&content, job_id)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Decode a job document that may hold one job or a list of jobs
pub fn parse_job_document(content: &str, job_id: &str) -> Result<Job, JobSourceError> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    match value {
        serde_json::Value::Array(entries) => {
            debug!(entries = entries.len(), job_id, "Searching job list");
            for entry in entries {
                let job: Job = serde_json::from_value(entry)?;
                if job.job_id == job_id {
                    return Ok(job);
                }
            }
            Err(JobSourceError::NotFound(job_id.to_string()))
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Fetches job snapshots from the job service REST API
///
/// Issues `GET {base_url}/job-info/{job_id}`.
pub struct HttpJobSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpJobSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, JobSourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/job-info/{}", self.base_url.trim_end_matches('/'), job_id)
    }
}

impl JobSource for HttpJobSource {
    fn fetch_job(&self, job_id: &str) -> Result<Job, JobSourceError> {
        let url = self.job_url(job_id);
        debug!(%url, "Fetching job info");

        let response = self.client.get(&url).send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(JobSourceError::NotFound(job_id.to_string()));
        }
        let job = response.error_for_status()?.json::<Job>()?;
        Ok(job)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;

    #[test]
    fn test_parse_single_job() {
        let job = parse_job_document(r#"{"jobId": "42", "jobStatus": "FINISHED"}"#, "ignored").unwrap();
        assert_eq!(job.job_id, "42");
        assert_eq!(job.job_status, JobStatus::Finished);
    }

    #[test]
    fn test_parse_job_list_selects_by_id() {
        let doc = r#"[{"jobId": "1", "jobName": "a"}, {"jobId": 2, "jobName": "b"}]"#;
        let job = parse_job_document(doc, "2").unwrap();
        assert_eq!(job.job_name, "b");
    }

    #[test]
    fn test_parse_job_list_missing_id() {
        let doc = r#"[{"jobId": "1"}]"#;
        let err = parse_job_document(doc, "9").unwrap_err();
        assert!(matches!(err, JobSourceError::NotFound(id) if id == "9"));
    }

    #[test]
    fn test_parse_malformed_document() {
        let err = parse_job_document("{not json", "1").unwrap_err();
        assert!(matches!(err, JobSourceError::Decode(_)));
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileJobSource::new("/nonexistent/dagscope/job.json");
        let err = source.fetch_job("1").unwrap_err();
        assert!(matches!(err, JobSourceError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dagscope/job.json"));
    }

    #[test]
    fn test_file_source_reads_file() {
        let path = std::env::temp_dir().join(format!("dagscope-job-{}.json", std::process::id()));
        fs::write(&path, r#"{"jobId": "7", "jobName": "from-disk"}"#).unwrap();

        let job = FileJobSource::new(&path).fetch_job("7").unwrap();
        assert_eq!(job.job_name, "from-disk");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_http_job_url() {
        let source = HttpJobSource::new("http://localhost:5801/hazelcast/rest/maps/").unwrap();
        assert_eq!(
            source.job_url("733"),
            "http://localhost:5801/hazelcast/rest/maps/job-info/733"
        );
    }
}
