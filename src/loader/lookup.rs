//! Symbolic document name → location resolution

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::{DocumentError, DocumentResult};

/// Error payload returned for unknown document names
pub const NOT_FOUND_MESSAGE: &str = "Document not found";

/// Sample documents served out of the box
const DEFAULT_SAMPLES: [(&str, &str); 4] = [
    ("Sample PDF (7 pages)", "sample_pdf.pdf"),
    ("Sample DOCX (2 pages)", "sample_docx.docx"),
    ("Sample PPTX (5 slides)", "sample_pptx.pptx"),
    ("Sample Excel (5 sheets)", "sample_excel.xlsx"),
];

/// Lookup request body (`POST /get_doc_info`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocInfoRequest {
    #[serde(default)]
    pub doc_name: String,
}

/// Lookup response body: either a location or an error payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocInfoResponse {
    /// Interpret the payload; `error` wins over `file_path`
    pub fn into_location(self) -> DocumentResult<String> {
        match (self.error, self.file_path) {
            (Some(error), _) => Err(DocumentError::UnresolvedSource(error)),
            (None, Some(path)) => Ok(path),
            (None, None) => Err(DocumentError::UnresolvedSource(
                "Lookup response has neither file_path nor error".to_string(),
            )),
        }
    }
}

/// Resolves a symbolic document name into a fetchable location
#[async_trait]
pub trait SourceLookup: Send + Sync {
    async fn resolve(&self, name: &str) -> DocumentResult<String>;
}

/// In-process registry of sample documents (name → file name)
///
/// Locations have the form `/docs/{file}`.
#[derive(Debug, Clone)]
pub struct SampleRegistry {
    samples: BTreeMap<String, String>,
}

impl Default for SampleRegistry {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_SAMPLES
                .iter()
                .map(|(name, file)| (name.to_string(), file.to_string())),
        )
    }
}

impl SampleRegistry {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            samples: entries.into_iter().collect(),
        }
    }

    /// Load a registry from a JSON object mapping names to file names
    pub fn from_manifest(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let samples: BTreeMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self { samples })
    }

    /// Registered names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// File name registered for `name`
    pub fn file_name(&self, name: &str) -> Option<&str> {
        self.samples.get(name).map(String::as_str)
    }

    /// Answer a lookup request the way the HTTP service does
    pub fn doc_info(&self, name: &str) -> DocInfoResponse {
        match self.file_name(name) {
            Some(file) => DocInfoResponse {
                file_path: Some(format!("/docs/{}", file)),
                error: None,
            },
            None => DocInfoResponse {
                file_path: None,
                error: Some(NOT_FOUND_MESSAGE.to_string()),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[async_trait]
impl SourceLookup for SampleRegistry {
    async fn resolve(&self, name: &str) -> DocumentResult<String> {
        self.doc_info(name).into_location()
    }
}

/// Lookup through a remote `POST /get_doc_info` service
pub struct HttpSourceLookup {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSourceLookup {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/get_doc_info", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SourceLookup for HttpSourceLookup {
    async fn resolve(&self, name: &str) -> DocumentResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&DocInfoRequest {
                doc_name: name.to_string(),
            })
            .send()
            .await
            .map_err(|e| DocumentError::Fetch(e.to_string()))?;

        // The payload is meaningful regardless of status (404 carries `error`)
        let status = response.status();
        let body: DocInfoResponse = response.json().await.map_err(|e| {
            DocumentError::Fetch(format!("Invalid lookup response ({}): {}", status, e))
        })?;

        body.into_location()
    }
}
