//! Low-level MuPDF wrapper
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. [`SafeDocument`] keeps only
//! the document bytes and opens a fresh document under a mutex for every
//! operation, so callers can share it across blocking tasks.

mod safe;

pub use safe::SafeDocument;
