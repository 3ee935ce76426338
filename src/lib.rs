//! Docweave - A Rust library for reading, editing and writing Word document bodies
//!
//! This library models the main document part of a WordprocessingML (`.docx`)
//! package as an owned tree of typed nodes and re-encodes it without losing the
//! content it understands.
//!
//! # Features
//!
//! - **Round-trip codec**: Decode `word/document.xml` into typed nodes and write it back
//! - **Tolerant decoding**: Unknown elements are skipped without losing their siblings
//! - **Field substitution**: Rewrite computed fields (`PAGE`, `MERGEFIELD ...`) even when
//!   the producing application split them across many runs
//! - **Search and replace**: Literal replacement across paragraphs, tables, nested
//!   tables and content controls
//! - **Construction API**: Build paragraphs, tables, hyperlinks and content controls
//!   with deterministic relationship and content-control ids
//! - **Settings part**: Protection, revision tracking, field updates and document
//!   variables of `word/settings.xml`, with untyped settings kept as markup
//!
//! The ZIP package itself is left to the caller: the library consumes and produces
//! the markup of the document part plus the relationships it minted.
//!
//! # Example - Replacing merge fields
//!
//! ```rust
//! use std::collections::HashMap;
//! use docweave::ooxml::docx::Document;
//!
//! let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
//!   <w:p>
//!     <w:r><w:fldChar w:fldCharType="begin"/></w:r>
//!     <w:r><w:instrText xml:space="preserve"> MERGEFIELD Name </w:instrText></w:r>
//!     <w:r><w:fldChar w:fldCharType="separate"/></w:r>
//!     <w:r><w:t>«Name»</w:t></w:r>
//!     <w:r><w:fldChar w:fldCharType="end"/></w:r>
//!   </w:p>
//! </w:body></w:document>"#;
//!
//! let mut doc = Document::from_xml(xml.as_bytes())?;
//! let mut fields = HashMap::new();
//! fields.insert("MERGEFIELD Name".to_string(), "Ada Lovelace".to_string());
//!
//! assert_eq!(doc.replace_fields(&fields), 1);
//! assert_eq!(doc.text(), "Ada Lovelace");
//!
//! let markup = doc.to_xml()?;
//! assert!(markup.contains("Ada Lovelace"));
//! # Ok::<(), docweave::ooxml::error::OoxmlError>(())
//! ```
//!
//! # Example - Building a document
//!
//! ```rust
//! use docweave::ooxml::docx::Document;
//!
//! let mut doc = Document::new();
//! doc.add_paragraph("Quarterly report").add_text(" (draft)").bold(true);
//! let r_id = doc.add_hyperlink_relationship("https://example.com/data");
//! doc.add_empty_paragraph().add_link("Source", &r_id);
//! assert_eq!(r_id, "rId1");
//!
//! let table = doc.add_table();
//! table.add_row().add_cell().add_paragraph("Revenue");
//!
//! assert_eq!(doc.relationships().len(), 1);
//! let markup = doc.to_xml()?;
//! assert!(markup.contains("<w:tbl>"));
//! # Ok::<(), docweave::ooxml::error::OoxmlError>(())
//! ```

pub mod common;
pub mod ooxml;

// Re-export the unified error type
pub use common::{Error, Result};
