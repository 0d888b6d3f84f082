//! Shared helpers for the integration tests

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Builds a complete one-page PDF with the given Info entries and body text
///
/// Small enough to fit inside the validator's sniff prefix, so deep
/// verification sees a parseable document.
pub fn build_test_pdf(
    title: Option<&str>,
    author: Option<&str>,
    creation: Option<&str>,
    body: &str,
) -> Vec<u8> {
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

/// Builds a catalog entry for a URL, the way the pipeline would
pub fn test_entry(url: &str) -> pdfscout::DocumentEntry {
    let today = chrono::Utc::now().date_naive();
    pdfscout::DocumentEntry {
        id: pdfscout::collection::stable_id(url),
        url: url.to_string(),
        title: "Seeded Entry".to_string(),
        author: None,
        categories: Vec::new(),
        source: "test".to_string(),
        year_published: None,
        tags: Vec::new(),
        is_available: true,
        date_added: today,
        last_checked: today,
        last_status: 200,
        pages: None,
        size_mb: None,
    }
}
