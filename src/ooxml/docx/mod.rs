/// Word (.docx) main document part support.
///
/// This module models `word/document.xml` as an owned tree of typed nodes,
/// decodes it tolerantly and encodes it back in schema order.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Document`: The part, its body and the id counters used to add content
/// - `Paragraph`: A paragraph with runs, hyperlinks and inline content controls
/// - `Run`: Text, breaks, field markers and drawings with shared formatting
/// - `Table`: A table with rows and cells; cells may hold nested tables
/// - `ContentControl`: A structured document tag with a typed interaction
/// - `Settings`: The companion `word/settings.xml` part
///
/// Beside the model, `walk` traverses the tree as run sequences, `replace`
/// performs literal search and replace, and `field_engine` reassembles fields
/// that were split across runs.
///
/// # Example
///
/// ```rust
/// use docweave::ooxml::docx::{Document, ListItem};
///
/// let mut doc = Document::new();
/// doc.add_paragraph("Order form");
/// doc.add_combo_box_content_control(
///     "Shipping",
///     "shipping",
///     vec![ListItem::new("Standard", "std"), ListItem::new("Express", "exp")],
///     "Standard",
/// );
///
/// let xml = doc.to_xml()?;
/// let decoded = Document::from_xml(&xml)?;
/// let control = decoded.find_content_control_by_tag("shipping").unwrap();
/// assert_eq!(control.text(), "Standard");
/// # Ok::<(), docweave::ooxml::error::OoxmlError>(())
/// ```
pub mod bookmark;
pub(crate) mod codec;
pub mod comment;
pub mod content_control;
pub mod document;
pub mod drawing;
pub mod enums;
pub mod field;
pub mod field_engine;
pub mod format;
pub mod hyperlink;
pub mod options;
pub mod paragraph;
pub mod replace;
pub mod run;
pub mod section;
pub mod settings;
pub mod table;
pub mod types;
pub mod walk;

pub use bookmark::{BookmarkEnd, BookmarkStart};
pub use comment::{CommentRangeEnd, CommentRangeStart};
pub use content_control::{
    CheckboxSymbol, ContentControl, ListItem, Placeholder, SdtContent, SdtContentChild,
    SdtProperties, SdtType, StructuredDocumentTag,
};
pub use document::{Body, Document, DocumentChild};
pub use drawing::{Drawing, DrawingObject};
pub use enums::{
    BreakType, FieldCharType, HeightRule, SdtLock, VMergeType, WdHeaderFooter, WdOrientation,
    WdSectionStart,
};
pub use field::{FFData, Field, FieldChar, FieldCode, FormFieldKind};
pub use format::{Background, Border, Color, Indent, Shading, Spacing};
pub use hyperlink::Hyperlink;
pub use options::{ReadOptions, WriteOptions};
pub use paragraph::{Paragraph, ParagraphChild, ParagraphProperties};
pub use run::{Break, Run, RunChild, RunProperties, Text};
pub use section::{Columns, HeaderFooterReference, Margins, PageSize, SectionProperties};
pub use settings::{DocumentProtection, ProtectionType, Settings};
pub use table::{Cell, Row, Table};
pub use types::{OnOff, Toggle};
