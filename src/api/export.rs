//! Background CSV export of the caller's parking history.
//!
//! The flow is the same on the `admin` and `parking` segments: start a job,
//! poll its status, then download the finished file.

use reqwest::Method;
use serde::Deserialize;

use crate::client::{ClientInstance, ClientResult, Payload};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportStarted {
    #[serde(default)]
    pub message: String,
    pub task_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExportStatus {
    pub ready: bool,
    /// Server-absolute path of the file, set once the job succeeded.
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExportStatus {
    /// File name to pass to `download`, once ready.
    pub fn filename(&self) -> Option<&str> {
        if !self.ready {
            return None;
        }
        self.download_url
            .as_deref()?
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// True when the job ended without producing a file.
    pub fn is_failed(&self) -> bool {
        !self.ready && self.error.is_some()
    }
}

/// Export endpoints on one segment.
#[derive(Debug, Clone, Copy)]
pub struct CsvExport<'a> {
    client: &'a ClientInstance,
}

impl<'a> CsvExport<'a> {
    pub fn new(client: &'a ClientInstance) -> Self {
        Self { client }
    }

    pub async fn start(&self) -> ClientResult<ExportStarted> {
        self.client.post("/export-csv", &serde_json::json!({})).await
    }

    pub async fn status(&self, task_id: &str) -> ClientResult<ExportStatus> {
        self.client
            .get(&format!("/export-csv-status/{}", task_id))
            .await
    }

    /// Raw CSV bytes of a finished export.
    pub async fn download(&self, filename: &str) -> ClientResult<Vec<u8>> {
        let response = self
            .client
            .execute(
                Method::GET,
                &format!("/download-csv/{}", filename),
                Payload::Empty,
            )
            .await?;
        Ok(response.body)
    }
}
