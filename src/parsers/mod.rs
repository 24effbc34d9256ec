//! Document parsers
//!
//! Pure functions from a local file path to a metadata mapping, one per
//! accepted document kind. Recoverable extraction problems are reported
//! in-band under the `error` key; unreadable paths and I/O failures come
//! back as `Err`.

pub mod html;
pub mod pdf;

pub use html::parse_html_file;
pub use pdf::parse_manual_pdf;

use crate::models::Metadata;

/// Mapping that signals a recoverable parse failure to the upload handler.
pub(crate) fn error_metadata(message: String) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("error".to_string(), serde_json::Value::String(message));
    metadata
}
