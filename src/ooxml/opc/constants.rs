/// Constant values related to the Open Packaging Convention.
///
/// This module contains the XML namespaces declared by the main document and
/// settings parts, and the relationship types the document part mints.

/// XML namespace URIs used by the main document part
pub mod namespace {
    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Office relationships namespace
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// DrawingML wordprocessing drawing namespace
    pub const DML_WORDPROCESSING_DRAWING: &str =
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";

    /// DrawingML main namespace
    pub const DML_MAIN: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

    /// DrawingML picture namespace
    pub const DML_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

    /// VML namespace
    pub const VML: &str = "urn:schemas-microsoft-com:vml";

    /// Office (VML extensions) namespace
    pub const OFFICE: &str = "urn:schemas-microsoft-com:office:office";

    /// Word (VML extensions) namespace
    pub const WORD_VML: &str = "urn:schemas-microsoft-com:office:word";

    /// Markup compatibility namespace
    pub const MARKUP_COMPATIBILITY: &str =
        "http://schemas.openxmlformats.org/markup-compatibility/2006";

    /// Word 2010 extensions
    pub const W14: &str = "http://schemas.microsoft.com/office/word/2010/wordml";

    /// Word 2012 extensions
    pub const W15: &str = "http://schemas.microsoft.com/office/word/2012/wordml";

    /// Word 2010 drawing extensions
    pub const WP14: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing";

    /// Word 2010 shapes
    pub const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";

    /// Word 2010 groups
    pub const WPG: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup";

    /// Office math namespace
    pub const MATH: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

    /// Custom XML schema library namespace
    pub const SCHEMA_LIBRARY: &str = "http://schemas.openxmlformats.org/schemaLibrary/2006/main";

    /// Prefix and URI pairs declared on `w:document`, in emission order.
    pub const DOCUMENT_DECLARATIONS: [(&str, &str); 14] = [
        ("w", WML_MAIN),
        ("o", OFFICE),
        ("r", OFC_RELATIONSHIPS),
        ("v", VML),
        ("w10", WORD_VML),
        ("wp", DML_WORDPROCESSING_DRAWING),
        ("a", DML_MAIN),
        ("pic", DML_PICTURE),
        ("wps", WPS),
        ("wpg", WPG),
        ("mc", MARKUP_COMPATIBILITY),
        ("wp14", WP14),
        ("w14", W14),
        ("w15", W15),
    ];

    /// Value of `mc:Ignorable` on `w:document`.
    pub const IGNORABLE: &str = "w14 wp14 w15";

    /// Prefix and URI pairs declared on a new `w:settings`, in emission order.
    pub const SETTINGS_DECLARATIONS: [(&str, &str); 10] = [
        ("mc", MARKUP_COMPATIBILITY),
        ("o", OFFICE),
        ("r", OFC_RELATIONSHIPS),
        ("m", MATH),
        ("v", VML),
        ("w10", WORD_VML),
        ("w", WML_MAIN),
        ("w14", W14),
        ("w15", W15),
        ("sl", SCHEMA_LIBRARY),
    ];

    /// Value of `mc:Ignorable` on a new `w:settings`.
    pub const SETTINGS_IGNORABLE: &str = "w14 w15";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs minted by the document part
pub mod relationship_type {
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
}
