//! PDF metadata extraction from partially downloaded documents
//!
//! Structured extraction reads the document Info dictionary and page tree
//! with `lopdf`; when the embedded title is missing, the extracted text is
//! scanned for a plausible title line. The input is usually a truncated
//! prefix of the real file, so parse failures are an expected outcome, not
//! an exceptional one.

use std::path::Path;
use thiserror::Error;

/// Errors during structured metadata extraction
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("Scratch file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metadata sniffed out of a document prefix
#[derive(Debug, Clone, Default)]
pub struct SniffedMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year_published: Option<u16>,
    pub pages: Option<u32>,
}

/// Extracts embedded metadata and a page count from a PDF on disk
///
/// Title and author come from the Info dictionary; the creation year from a
/// `D:YYYY…` date stamp. When no usable embedded title exists, the text of
/// the document is scanned for a title-like line.
pub fn extract_metadata(path: &Path) -> Result<SniffedMetadata, ExtractionError> {
    let doc = lopdf::Document::load(path)?;

    let mut metadata = SniffedMetadata {
        pages: Some(doc.get_pages().len() as u32),
        ..Default::default()
    };

    if let Some(info) = info_dictionary(&doc) {
        metadata.title = string_value(info, b"Title");
        metadata.author = string_value(info, b"Author");
        metadata.year_published =
            string_value(info, b"CreationDate").and_then(|d| year_from_date_stamp(&d));
    }

    if metadata.title.is_none() {
        metadata.title = title_from_text(path);
    }

    Ok(metadata)
}

/// Resolves the trailer's Info entry to its dictionary, if present
fn info_dictionary(doc: &lopdf::Document) -> Option<&lopdf::Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    match info {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        lopdf::Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Reads a text value from a PDF dictionary, dropping empty strings
fn string_value(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        lopdf::Object::String(bytes, _) => {
            let text = decode_pdf_text(bytes);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE when BOM-prefixed, bytes otherwise
fn decode_pdf_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Pulls a 4-digit year out of a `D:YYYYMMDDHHmmSS` date stamp
fn year_from_date_stamp(stamp: &str) -> Option<u16> {
    let digits = stamp.strip_prefix("D:")?;
    if digits.len() < 4 {
        return None;
    }

    let year: u16 = digits[..4].parse().ok()?;
    // Reject stamps that are clearly not calendar years
    if (1000..=2999).contains(&year) {
        Some(year)
    } else {
        None
    }
}

/// Scans extracted document text for the first plausible title line
///
/// A plausible title is 10 to 200 characters after trimming; only the
/// leading lines are considered.
fn title_from_text(path: &Path) -> Option<String> {
    let text = match pdf_extract::extract_text(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!("Text extraction failed for {}: {}", path.display(), e);
            return None;
        }
    };

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(10)
        .find(|line| (10..=200).contains(&line.chars().count()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Builds a one-page PDF with the given Info entries and body text
    fn build_pdf(title: Option<&str>, author: Option<&str>, creation: Option<&str>, body: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(body)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut info = lopdf::Dictionary::new();
        if let Some(t) = title {
            info.set("Title", Object::string_literal(t));
        }
        if let Some(a) = author {
            info.set("Author", Object::string_literal(a));
        }
        if let Some(c) = creation {
            info.set("CreationDate", Object::string_literal(c));
        }
        if title.is_some() || author.is_some() || creation.is_some() {
            let info_id = doc.add_object(Object::Dictionary(info));
            doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_extract_embedded_title_and_author() {
        let pdf = build_pdf(
            Some("Bounded Crawling in Practice"),
            Some("Jane Author"),
            Some("D:20190301120000Z"),
            "Body text",
        );
        let file = write_temp(&pdf);

        let meta = extract_metadata(file.path()).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Bounded Crawling in Practice"));
        assert_eq!(meta.author.as_deref(), Some("Jane Author"));
        assert_eq!(meta.year_published, Some(2019));
        assert_eq!(meta.pages, Some(1));
    }

    #[test]
    fn test_title_falls_back_to_page_text() {
        let pdf = build_pdf(
            None,
            None,
            None,
            "A Survey of Polite Web Crawling Techniques",
        );
        let file = write_temp(&pdf);

        let meta = extract_metadata(file.path()).unwrap();
        assert_eq!(
            meta.title.as_deref(),
            Some("A Survey of Polite Web Crawling Techniques")
        );
    }

    #[test]
    fn test_empty_embedded_title_ignored() {
        let pdf = build_pdf(Some("   "), None, None, "The Real Title Of This Paper");
        let file = write_temp(&pdf);

        let meta = extract_metadata(file.path()).unwrap();
        assert_eq!(meta.title.as_deref(), Some("The Real Title Of This Paper"));
    }

    #[test]
    fn test_short_text_line_not_a_title() {
        let pdf = build_pdf(None, None, None, "Intro");
        let file = write_temp(&pdf);

        let meta = extract_metadata(file.path()).unwrap();
        assert_eq!(meta.title, None);
        assert_eq!(meta.pages, Some(1));
    }

    #[test]
    fn test_truncated_document_is_an_error() {
        let pdf = build_pdf(Some("Title"), None, None, "Body");
        let file = write_temp(&pdf[..pdf.len() / 3]);

        assert!(extract_metadata(file.path()).is_err());
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let file = write_temp(b"this is not a pdf at all");
        assert!(extract_metadata(file.path()).is_err());
    }

    #[test]
    fn test_year_from_date_stamp() {
        assert_eq!(year_from_date_stamp("D:20190301120000Z"), Some(2019));
        assert_eq!(year_from_date_stamp("D:1998"), Some(1998));
        assert_eq!(year_from_date_stamp("20190301"), None);
        assert_eq!(year_from_date_stamp("D:03"), None);
        assert_eq!(year_from_date_stamp("D:0000"), None);
    }

    #[test]
    fn test_decode_utf16_text() {
        // UTF-16BE with BOM: "Hi"
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_text(&bytes), "Hi");
    }

    #[test]
    fn test_decode_plain_text() {
        assert_eq!(decode_pdf_text(b"Plain Title"), "Plain Title");
    }
}
