//! PDF manual parser
//!
//! Extracts the document title (Info dictionary), page count, and a bounded
//! text excerpt from an uploaded manual.

use anyhow::Result;
use lopdf::{Document, Object};
use serde_json::json;
use std::path::Path;
use tracing::warn;

use super::error_metadata;
use crate::models::Metadata;

const EXCERPT_MAX_CHARS: usize = 500;

pub fn parse_manual_pdf(path: &Path) -> Result<Metadata> {
    let doc = match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => return Ok(error_metadata(format!("unreadable PDF: {}", e))),
    };

    let pages = doc.get_pages();
    let page_numbers: Vec<u32> = pages.keys().copied().collect();
    let text = doc.extract_text(&page_numbers).unwrap_or_else(|e| {
        warn!("Text extraction failed for {:?}: {}", path, e);
        String::new()
    });
    let excerpt: String = text.chars().take(EXCERPT_MAX_CHARS).collect();

    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), json!(info_title(&doc)));
    metadata.insert("page_count".to_string(), json!(pages.len()));
    metadata.insert("excerpt".to_string(), json!(excerpt.trim()));

    Ok(metadata)
}

/// Title from the trailer's Info dictionary, when one is present.
fn info_title(doc: &Document) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let dict = match info {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok()?,
        Object::Dictionary(dict) => dict,
        _ => return None,
    };

    match dict.get(b"Title").ok()? {
        Object::String(bytes, _) => {
            let title = String::from_utf8_lossy(bytes).trim().to_string();
            (!title.is_empty()).then_some(title)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};
    use tempfile::TempDir;

    /// One-page manual with an Info title, built the way lopdf documents are.
    fn write_sample_pdf(path: &Path) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Shift points")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Transmission Manual"),
        });
        doc.trailer.set("Info", info_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn extracts_metadata_from_manual() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manual.pdf");
        write_sample_pdf(&path);

        let metadata = parse_manual_pdf(&path).unwrap();

        assert!(!metadata.contains_key("error"));
        assert_eq!(metadata["title"], serde_json::json!("Transmission Manual"));
        assert_eq!(metadata["page_count"], serde_json::json!(1));
        assert!(metadata["excerpt"].as_str().unwrap().contains("Shift points"));
    }

    #[test]
    fn unreadable_pdf_reports_in_band_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let metadata = parse_manual_pdf(&path).unwrap();

        let detail = metadata["error"].as_str().unwrap();
        assert!(detail.starts_with("unreadable PDF"));
    }

    #[test]
    fn missing_file_is_an_in_band_error_too() {
        // lopdf surfaces the failed open as a load error, which the parser
        // reports in-band like any other unreadable document.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.pdf");

        let metadata = parse_manual_pdf(&path).unwrap();
        assert!(metadata.contains_key("error"));
    }
}
