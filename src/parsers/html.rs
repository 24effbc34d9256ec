//! HTML tuning file parser
//!
//! Extracts the document title, meta description, section headings, and a
//! count of tuning parameter rows from an exported tuning HTML file.

use anyhow::Result;
use scraper::{Html, Selector};
use serde_json::json;
use std::path::Path;

use super::error_metadata;
use crate::models::Metadata;

pub fn parse_html_file(path: &Path) -> Result<Metadata> {
    let raw = std::fs::read_to_string(path)?;
    let document = Html::parse_document(&raw);

    let body_text = collect_body_text(&document);
    if body_text.is_empty() {
        return Ok(error_metadata(
            "no extractable text in HTML document".to_string(),
        ));
    }

    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), json!(document_title(&document)));
    if let Some(description) = meta_description(&document) {
        metadata.insert("description".to_string(), json!(description));
    }
    metadata.insert("headings".to_string(), json!(headings(&document)));
    metadata.insert(
        "tuning_parameters".to_string(),
        json!(parameter_row_count(&document)),
    );
    metadata.insert("text_length".to_string(), json!(body_text.len()));

    Ok(metadata)
}

fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn headings(document: &Html) -> Vec<String> {
    let selector = Selector::parse("h1, h2, h3").unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

/// Tuning exports carry their parameters as table rows. The HTML5 parser
/// wraps bare `<tr>` elements in a `tbody`, so this matches header-less
/// exports too; `thead` rows are not counted.
fn parameter_row_count(document: &Html) -> usize {
    let selector = Selector::parse("table tbody tr").unwrap();
    document.select(&selector).count()
}

fn collect_body_text(document: &Html) -> String {
    let selector = Selector::parse("body").unwrap();
    let mut text = String::new();

    if let Some(body) = document.select(&selector).next() {
        for fragment in body.text() {
            let trimmed = fragment.trim();
            if !trimmed.is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(trimmed);
            }
        }
    }

    text
}
