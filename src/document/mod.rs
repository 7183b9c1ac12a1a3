//! Unified document abstraction
//!
//! This module provides the format-agnostic interface shared by every
//! adapter (PDF, DOCX, PPTX, XLSX) and the types that flow between the
//! loader, the adapters and the viewer.
//!
//! # Architecture
//!
//! ```text
//!   ┌──────────────┐   bytes + format   ┌──────────────────────────────┐
//!   │    loader    │ ─────────────────▶ │   formats::decode(format)    │
//!   └──────────────┘                    └──────────────────────────────┘
//!                                                      │
//!            ┌───────────────┬───────────────┬─────────┴─────┐
//!            ▼               ▼               ▼               ▼
//!     ┌────────────┐  ┌────────────┐  ┌────────────┐  ┌────────────┐
//!     │ PdfAdapter │  │DocxAdapter │  │PptxAdapter │  │XlsxAdapter │
//!     └────────────┘  └────────────┘  └────────────┘  └────────────┘
//!            └───────────────┴───────┬───────┴───────────────┘
//!                                    ▼
//!                     Box<dyn FormatAdapter> owned by Navigator
//! ```

mod error;
mod traits;
mod types;

pub use error::{DocumentError, DocumentResult, Result};
pub use traits::FormatAdapter;
pub use types::{extension_of, DocumentFormat, MarkupKind, RenderedView, SheetTable};
