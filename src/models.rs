use sqlx::PgPool;
use crate::config::Config;
use crate::storage::TransientStorage;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub storage: TransientStorage,
}

/// Structured output of a parser: string keys, JSON-compatible values.
/// Treated opaquely by the upload handler except for the `error` key.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Document kind derived from the case-insensitive filename suffix.
/// Exactly two kinds are accepted; everything else is rejected upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DocumentKind {
    Html,
    Pdf,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".html") {
            Some(DocumentKind::Html)
        } else if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }

    pub fn target_table(&self) -> TargetTable {
        match self {
            DocumentKind::Html => TargetTable::TuningHtmlMetadata,
            DocumentKind::Pdf => TargetTable::Manuals,
        }
    }
}

/// Remote table receiving a given document kind's metadata. The table names
/// are an external contract; schemas are pre-provisioned, never created here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTable {
    TuningHtmlMetadata,
    Manuals,
}

impl TargetTable {
    pub fn name(&self) -> &'static str {
        match self {
            TargetTable::TuningHtmlMetadata => "tuning_html_metadata",
            TargetTable::Manuals => "manuals",
        }
    }
}

// API Request/Response types

#[derive(Debug, serde::Serialize)]
pub struct UploadResponse {
    pub status: String,
    pub metadata: Metadata,
}

impl UploadResponse {
    pub fn success(metadata: Metadata) -> Self {
        Self {
            status: "success".to_string(),
            metadata,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_html_case_insensitively() {
        assert_eq!(
            DocumentKind::from_filename("sample.html"),
            Some(DocumentKind::Html)
        );
        assert_eq!(
            DocumentKind::from_filename("SAMPLE.HTML"),
            Some(DocumentKind::Html)
        );
        assert_eq!(
            DocumentKind::from_filename("Tuning_Export.Html"),
            Some(DocumentKind::Html)
        );
    }

    #[test]
    fn classifies_pdf_case_insensitively() {
        assert_eq!(
            DocumentKind::from_filename("manual.pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_filename("MANUAL.PDF"),
            Some(DocumentKind::Pdf)
        );
    }

    #[test]
    fn rejects_other_suffixes() {
        assert_eq!(DocumentKind::from_filename("notes.txt"), None);
        assert_eq!(DocumentKind::from_filename("archive.pdf.zip"), None);
        assert_eq!(DocumentKind::from_filename("no_extension"), None);
        assert_eq!(DocumentKind::from_filename(""), None);
    }

    #[test]
    fn kind_selects_target_table() {
        assert_eq!(
            DocumentKind::Html.target_table().name(),
            "tuning_html_metadata"
        );
        assert_eq!(DocumentKind::Pdf.target_table().name(), "manuals");
    }

    #[test]
    fn success_response_shape() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), serde_json::json!("Tuning Guide"));

        let body = serde_json::to_value(UploadResponse::success(metadata)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "metadata": {"title": "Tuning Guide"}
            })
        );
    }
}
