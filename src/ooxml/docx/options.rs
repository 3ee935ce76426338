//! Read and write options for the document codec.

/// Options for decoding a document part.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Fail on attribute values that cannot be parsed instead of leaving
    /// the field unset
    pub strict_values: bool,
}

impl ReadOptions {
    /// Create new read options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict value parsing.
    pub fn with_strict_values(mut self, strict: bool) -> Self {
        self.strict_values = strict;
        self
    }

    /// Reject unparseable attribute values.
    pub fn strict(mut self) -> Self {
        self.strict_values = true;
        self
    }
}

/// Options for encoding a document part.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Emit the `<?xml ...?>` declaration
    pub xml_declaration: bool,

    /// Mark the declaration `standalone="yes"`
    pub standalone: bool,

    /// Add `xml:space="preserve"` to text whose edges are whitespace even
    /// when the decoded element did not carry it
    pub preserve_edge_whitespace: bool,
}

impl WriteOptions {
    /// Create new write options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the XML declaration.
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Enable or disable the standalone flag of the declaration.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Enable or disable automatic `xml:space="preserve"`.
    pub fn with_preserve_edge_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_edge_whitespace = preserve;
        self
    }

    /// Omit the XML declaration, for embedding the markup in a larger stream.
    pub fn fragment(mut self) -> Self {
        self.xml_declaration = false;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            standalone: true,
            preserve_edge_whitespace: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        assert!(!ReadOptions::default().strict_values);

        let write = WriteOptions::default();
        assert!(write.xml_declaration);
        assert!(write.standalone);
        assert!(write.preserve_edge_whitespace);
    }

    #[test]
    fn test_builders() {
        assert!(ReadOptions::new().strict().strict_values);
        assert!(!ReadOptions::new().with_strict_values(false).strict_values);

        let write = WriteOptions::new()
            .fragment()
            .with_standalone(false)
            .with_preserve_edge_whitespace(false);
        assert!(!write.xml_declaration);
        assert!(!write.standalone);
        assert!(!write.preserve_edge_whitespace);
    }
}
