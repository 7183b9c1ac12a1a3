//! Configuration management for the document previewer server

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::formats::DecodeOptions;

/// Default upload limit (200 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub documents: DocumentsConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    /// Directory served under `/docs/`
    pub docs_dir: PathBuf,
    /// JSON object (name → file) replacing the built-in sample list
    pub samples_manifest: Option<PathBuf>,
    /// Remote lookup service; when set the viewer resolves and fetches
    /// through it instead of the local registry
    pub lookup_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    pub pdf_scale: f32,
    pub max_upload_bytes: usize,
}

impl ViewerConfig {
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            pdf_scale: self.pdf_scale,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            documents: DocumentsConfig {
                docs_dir: PathBuf::from("./sample_docs"),
                samples_manifest: None,
                lookup_url: None,
            },
            viewer: ViewerConfig {
                pdf_scale: DecodeOptions::default().pdf_scale,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let pdf_scale: f32 = parsed("PDF_SCALE", defaults.viewer.pdf_scale)?;
        if !(pdf_scale.is_finite() && pdf_scale > 0.0) {
            return Err(ConfigError::Invalid {
                name: "PDF_SCALE",
                value: pdf_scale.to_string(),
            });
        }

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parsed("SERVER_PORT", defaults.server.port)?,
            },
            documents: DocumentsConfig {
                docs_dir: optional("DOCS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.documents.docs_dir),
                samples_manifest: optional("SAMPLES_MANIFEST").map(PathBuf::from),
                lookup_url: optional("LOOKUP_URL"),
            },
            viewer: ViewerConfig {
                pdf_scale,
                max_upload_bytes: parsed("MAX_UPLOAD_BYTES", defaults.viewer.max_upload_bytes)?,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
