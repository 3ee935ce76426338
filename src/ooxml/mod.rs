//! Office Open XML (OOXML) format implementation.
//!
//! This module provides the in-memory model of a WordprocessingML main
//! document part (`word/document.xml`), its round-trip codec, and the
//! algorithms that operate on the tree in place.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **OPC touch points** (`opc`): namespace table and relationship declarations
//! 2. **Errors** (`error`): the error type shared by every decoder
//! 3. **Word documents** (`docx`): the node types, field engine and search/replace
//!
//! # Example: Filling a Template
//!
//! ```rust
//! use std::collections::HashMap;
//! use docweave::ooxml::docx::Document;
//!
//! let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
//!   <w:body><w:p><w:r><w:t>Dear NAME,</w:t></w:r></w:p></w:body>
//! </w:document>"#;
//!
//! let mut doc = Document::from_xml(xml.as_bytes())?;
//! assert_eq!(doc.replace_all("NAME", "Ada"), 1);
//! assert_eq!(doc.text(), "Dear Ada,");
//!
//! let fields = HashMap::new();
//! assert_eq!(doc.replace_fields(&fields), 0);
//! # Ok::<(), docweave::ooxml::error::OoxmlError>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types
pub use error::{OoxmlError, Result};
pub use opc::{Relationship, Relationships};
