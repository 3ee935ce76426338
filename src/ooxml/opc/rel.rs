/// Relationship declarations minted by the document part.
///
/// The document part references other parts (images, headers, external
/// hyperlinks) by relationship id only. Ids handed out here never reuse a
/// number that was observed. Decoding observes every `r:` attribute of the
/// part, but the package's `.rels` part also declares ids the markup never
/// mentions (styles, settings, theme). Those must be fed to
/// [`Relationships::observe`] before minting, or the minted ids may clash
/// when merged into the existing `.rels` part.
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::target_mode;
use std::collections::BTreeSet;

/// A single relationship from the document part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new relationship.
    ///
    /// # Arguments
    /// * `r_id` - Relationship ID (e.g., "rId1")
    /// * `reltype` - Relationship type URI
    /// * `target_ref` - Target reference (part URI or external URL)
    /// * `is_external` - Whether this is an external relationship
    pub fn new(r_id: String, reltype: String, target_ref: String, is_external: bool) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a relative part reference.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Relationships minted by a document, in minting order.
///
/// Also owns the relationship id counter. The counter only moves forward:
/// [`Relationships::observe`] raises it past ids seen in decoded markup and
/// [`Relationships::next_r_id`] returns a number above every id it has seen
/// or handed out. When that number would pass `u32::MAX`, the lowest number
/// not yet seen or handed out is used instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    rels: Vec<Relationship>,
    last_id: u32,
    used: BTreeSet<u32>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists in the package.
    ///
    /// Ids that are not of the `rIdN` form do not affect the counter.
    pub fn observe(&mut self, r_id: &str) {
        if let Some(n) = parse_r_id(r_id) {
            self.last_id = self.last_id.max(n);
            self.used.insert(n);
        }
    }

    /// Mint the next relationship id.
    pub fn next_r_id(&mut self) -> String {
        let n = match self.last_id.checked_add(1) {
            Some(n) => {
                self.last_id = n;
                n
            },
            None => {
                let n = self.lowest_free();
                log::debug!("relationship ids exhausted, reusing free id rId{}", n);
                n
            },
        };
        self.used.insert(n);

        let mut buffer = itoa::Buffer::new();
        let mut r_id = String::with_capacity(8);
        r_id.push_str("rId");
        r_id.push_str(buffer.format(n));
        r_id
    }

    fn lowest_free(&self) -> u32 {
        let mut candidate = 1;
        for &n in self.used.range(1..) {
            if n != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        candidate
    }

    /// Mint an id and declare a relationship under it.
    ///
    /// # Returns
    /// Reference to the newly added relationship
    pub fn add_relationship(
        &mut self,
        reltype: &str,
        target_ref: &str,
        is_external: bool,
    ) -> &Relationship {
        let r_id = self.next_r_id();
        let index = self.rels.len();
        self.rels.push(Relationship::new(
            r_id,
            reltype.to_string(),
            target_ref.to_string(),
            is_external,
        ));
        &self.rels[index]
    }

    /// Get or add a relationship to a target.
    ///
    /// If a relationship of the given type, target and mode was already
    /// declared, returns its id. Otherwise mints a new one.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str, is_external: bool) -> String {
        if let Some(rel) = self.rels.iter().find(|rel| {
            rel.reltype() == reltype
                && rel.target_ref() == target_ref
                && rel.is_external() == is_external
        }) {
            return rel.r_id().to_string();
        }
        self.add_relationship(reltype, target_ref, is_external)
            .r_id()
            .to_string()
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get an iterator over all relationships, in minting order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize the declarations as `<Relationship>` elements of a `.rels` part.
    ///
    /// The package layer merges these into the document's existing
    /// relationships part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 * (self.rels.len() + 1));

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for rel in &self.rels {
            xml.push_str(r#"<Relationship Id=""#);
            xml.push_str(&escape_xml(rel.r_id()));
            xml.push_str(r#"" Type=""#);
            xml.push_str(&escape_xml(rel.reltype()));
            xml.push_str(r#"" Target=""#);
            xml.push_str(&escape_xml(rel.target_ref()));
            xml.push('"');
            if rel.is_external() {
                xml.push_str(r#" TargetMode=""#);
                xml.push_str(target_mode::EXTERNAL);
                xml.push('"');
            }
            xml.push_str("/>");
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Extract the number from an id of the form `rId123`.
fn parse_r_id(r_id: &str) -> Option<u32> {
    let digits = r_id.strip_prefix("rId")?;
    atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;

    #[test]
    fn test_relationship_creation() {
        let rel = Relationship::new(
            "rId1".to_string(),
            "http://example.com/rel".to_string(),
            "target.xml".to_string(),
            false,
        );

        assert_eq!(rel.r_id(), "rId1");
        assert_eq!(rel.reltype(), "http://example.com/rel");
        assert!(!rel.is_external());
    }

    #[test]
    fn test_next_r_id_is_monotonic() {
        let mut rels = Relationships::new();
        assert_eq!(rels.next_r_id(), "rId1");
        assert_eq!(rels.next_r_id(), "rId2");

        rels.observe("rId10");
        assert_eq!(rels.next_r_id(), "rId11");

        // Observing a lower id never moves the counter back
        rels.observe("rId3");
        rels.observe("image1");
        assert_eq!(rels.next_r_id(), "rId12");
    }

    #[test]
    fn test_next_r_id_after_maximum_reuses_free_ids() {
        let mut rels = Relationships::new();
        rels.observe("rId1");
        rels.observe("rId3");
        rels.observe("rId4294967295");
        assert_eq!(rels.next_r_id(), "rId2");
        assert_eq!(rels.next_r_id(), "rId4");
        let rel = rels.add_relationship(relationship_type::IMAGE, "media/image1.png", false);
        assert_eq!(rel.r_id(), "rId5");
    }

    #[test]
    fn test_get_or_add() {
        let mut rels = Relationships::new();

        let first = rels.get_or_add(relationship_type::HYPERLINK, "https://example.com", true);
        assert_eq!(first, "rId1");

        // Getting the same relationship should return the same rId
        let again = rels.get_or_add(relationship_type::HYPERLINK, "https://example.com", true);
        assert_eq!(again, "rId1");

        // Different target should create new relationship
        let other = rels.get_or_add(relationship_type::HYPERLINK, "https://example.org", true);
        assert_eq!(other, "rId2");
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_to_xml_marks_external_targets() {
        let mut rels = Relationships::new();
        rels.add_relationship(relationship_type::HYPERLINK, "https://a.test/?x=1&y=2", true);
        rels.add_relationship(relationship_type::IMAGE, "media/image1.png", false);

        let xml = rels.to_xml();
        assert!(xml.contains(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://a.test/?x=1&amp;y=2" TargetMode="External"/>"#
        ));
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(!xml.contains(r#"Target="media/image1.png" TargetMode"#));
    }
}
