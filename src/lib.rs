//! Document Previewer Library
//!
//! Paginated viewer for PDF, DOCX, PPTX and XLSX documents. The server
//! binary is in main.rs; everything it wires together lives here so that
//! benchmarks and integration tests can reach it.
//!
//! # Modules
//!
//! - `document`: format-agnostic types, errors and the adapter trait
//! - `formats`: per-format adapters (PDF via MuPDF, OOXML via zip + quick-xml)
//! - `loader`: sample lookup, byte fetching, format detection
//! - `viewer`: Navigator state machine, view sync, shared session
//! - `routes`, `html`, `state`, `config`, `error`: HTTP server

pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod html;
pub mod loader;
pub mod routes;
pub mod state;
pub mod viewer;

// Internal wrapper the PDF adapter depends on
mod mupdf;
