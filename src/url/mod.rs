//! URL handling module for pdfscout
//!
//! Host extraction, registrable-domain scoping for the crawler, document
//! extension matching, and candidate normalization.

mod domain;
mod extension;
mod normalize;

pub use domain::{extract_host, registrable_domain, same_site};
pub use extension::{file_name, has_document_extension, is_document_url};
pub use normalize::normalize_candidate;
