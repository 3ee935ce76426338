//! Reader cursor and writer shared by every node of the document tree.
//!
//! Decoding runs over a borrowed `quick_xml::Reader`. Each node receives the
//! start tag that opened it and pulls its own children from the cursor, so a
//! node never sees markup that belongs to its parent. Unknown children are
//! consumed with [`XmlCursor::skip`] and decoding continues with the next
//! sibling.
//!
//! Encoding appends to an [`XmlWriter`]. Attributes are written only when the
//! corresponding field is populated, always in the order the node declares
//! them.
use crate::common::xml::{escape_xml, resolve_entity, unescape_xml};
use crate::ooxml::docx::options::{ReadOptions, WriteOptions};
use crate::ooxml::docx::types::{IdCounter, OnOff, Toggle, parse_decimal};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Relationships;
use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::LocalName;
use std::ops::Range;

/// A node type that maps to exactly one element.
pub(crate) trait XmlElement: Sized {
    /// Decode the node from the element opened by `elem`, consuming
    /// everything up to and including its end tag.
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self>;

    /// Encode the node as one element.
    fn write(&self, out: &mut XmlWriter) -> Result<()>;
}

/// An opened element: its start tag and whether it was self-closing.
#[derive(Debug)]
pub(crate) struct Elem<'a> {
    start: BytesStart<'a>,
    empty: bool,
}

impl<'a> Elem<'a> {
    /// Local part of the element name, without prefix.
    #[inline]
    pub(crate) fn local_name(&self) -> LocalName<'_> {
        self.start.local_name()
    }

    /// Whether the element was written as `<x/>`.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.empty
    }

    /// Well-formed attributes of the start tag, in document order.
    #[inline]
    pub(crate) fn attributes(&self) -> impl Iterator<Item = Attribute<'_>> {
        self.start.attributes().flatten()
    }

    fn qualified_name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }
}

/// One step of the decoding stream.
#[derive(Debug)]
pub(crate) enum Node<'a> {
    /// A child element was opened
    Element(Elem<'a>),
    /// Character data, with references resolved
    Text(String),
    /// The current element was closed
    End,
}

/// Pull-style cursor over the markup of one part.
pub(crate) struct XmlCursor<'a> {
    reader: Reader<&'a [u8]>,
    input: &'a [u8],
    options: ReadOptions,
    relationships: Relationships,
    sdt_ids: IdCounter,
}

impl<'a> XmlCursor<'a> {
    pub(crate) fn new(input: &'a [u8], options: ReadOptions) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            input,
            options,
            relationships: Relationships::new(),
            sdt_ids: IdCounter::default(),
        }
    }

    /// Advance to the next element, text or end tag.
    ///
    /// Comments, processing instructions and declarations are skipped.
    /// Running out of input is an error: every caller is inside an element
    /// that has not been closed yet.
    pub(crate) fn next(&mut self) -> Result<Node<'a>> {
        loop {
            match self.reader.read_event()? {
                Event::Start(start) => {
                    return Ok(Node::Element(Elem {
                        start,
                        empty: false,
                    }));
                },
                Event::Empty(start) => return Ok(Node::Element(Elem { start, empty: true })),
                Event::End(_) => return Ok(Node::End),
                Event::Text(text) => {
                    return Ok(Node::Text(unescape_xml(&String::from_utf8_lossy(&text))));
                },
                Event::CData(data) => {
                    return Ok(Node::Text(String::from_utf8_lossy(&data).into_owned()));
                },
                Event::GeneralRef(reference) => {
                    let name = String::from_utf8_lossy(&reference);
                    return Ok(Node::Text(match resolve_entity(&name) {
                        Some(resolved) => resolved,
                        None => {
                            log::debug!("keeping unresolved entity reference &{};", name);
                            format!("&{};", name)
                        },
                    }));
                },
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of input".to_string()));
                },
                _ => {},
            }
        }
    }

    /// Find the root element of the part.
    pub(crate) fn root(&mut self) -> Result<Elem<'a>> {
        loop {
            match self.reader.read_event()? {
                Event::Start(start) => {
                    return Ok(Elem {
                        start,
                        empty: false,
                    });
                },
                Event::Empty(start) => return Ok(Elem { start, empty: true }),
                Event::End(_) => {
                    return Err(OoxmlError::Xml("end tag before root element".to_string()));
                },
                Event::Eof => return Err(OoxmlError::Xml("missing root element".to_string())),
                _ => {},
            }
        }
    }

    /// Feed every child element of `elem` to `on_child`.
    ///
    /// Character data between children is ignored. The callback must consume
    /// each child completely, typically by decoding it or by calling
    /// [`XmlCursor::skip`].
    pub(crate) fn read_children<F>(&mut self, elem: &Elem<'_>, mut on_child: F) -> Result<()>
    where
        F: FnMut(&mut Self, Elem<'a>) -> Result<()>,
    {
        if elem.empty {
            return Ok(());
        }
        loop {
            match self.next()? {
                Node::Element(child) => on_child(self, child)?,
                Node::Text(_) => {},
                Node::End => return Ok(()),
            }
        }
    }

    /// Collect the character data of `elem`, discarding any child elements.
    pub(crate) fn read_text(&mut self, elem: &Elem<'_>) -> Result<String> {
        let mut text = String::new();
        if elem.empty {
            return Ok(text);
        }
        loop {
            match self.next()? {
                Node::Element(child) => self.skip(&child)?,
                Node::Text(chunk) => text.push_str(&chunk),
                Node::End => return Ok(text),
            }
        }
    }

    /// Consume `elem` and everything inside it.
    ///
    /// Relationship ids in `r:` attributes of the skipped markup are still
    /// observed.
    pub(crate) fn skip(&mut self, elem: &Elem<'_>) -> Result<()> {
        self.consume(elem).map(|_| ())
    }

    /// Consume `elem`, returning the input range between its start and end
    /// tags.
    fn consume(&mut self, elem: &Elem<'_>) -> Result<Range<usize>> {
        self.observe_r_attributes(&elem.start);
        let inner_start = self.reader.buffer_position() as usize;
        if elem.empty {
            return Ok(inner_start..inner_start);
        }
        let mut depth = 0usize;
        loop {
            let before = self.reader.buffer_position() as usize;
            match self.reader.read_event()? {
                Event::Start(start) => {
                    self.observe_r_attributes(&start);
                    depth += 1;
                },
                Event::Empty(start) => self.observe_r_attributes(&start),
                Event::End(_) if depth == 0 => return Ok(inner_start..before),
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    return Err(OoxmlError::Xml("unexpected end of input".to_string()));
                },
                _ => {},
            }
        }
    }

    fn observe_r_attributes(&mut self, start: &BytesStart<'_>) {
        for attr in start.attributes().flatten() {
            if attr.key.prefix().is_some_and(|prefix| prefix.as_ref() == b"r") {
                self.relationships.observe(&attr_string(&attr));
            }
        }
    }

    /// Skip an element the model does not know.
    pub(crate) fn skip_unknown(&mut self, elem: &Elem<'_>) -> Result<()> {
        log::trace!("skipping unsupported element <{}>", elem.qualified_name());
        self.skip(elem)
    }

    /// Consume `elem` and return its markup verbatim.
    ///
    /// Used for subtrees the model keeps opaque. The captured markup keeps
    /// its original prefixes, which the document root declares.
    pub(crate) fn capture(&mut self, elem: &Elem<'_>) -> Result<String> {
        if elem.empty {
            self.observe_r_attributes(&elem.start);
        }
        let mut raw = String::with_capacity(64);
        raw.push('<');
        raw.push_str(&String::from_utf8_lossy(&elem.start));
        if elem.empty {
            raw.push_str("/>");
            return Ok(raw);
        }
        raw.push('>');

        let span = self.consume(elem)?;
        let inner = self.input.get(span).unwrap_or_default();
        raw.push_str(&String::from_utf8_lossy(inner));
        raw.push_str("</");
        raw.push_str(&elem.qualified_name());
        raw.push('>');
        Ok(raw)
    }

    /// Apply `parse` to an attribute value, honouring the strictness option.
    pub(crate) fn parse_value<T>(
        &self,
        attr: &Attribute<'_>,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let raw = attr_string(attr);
        if let Some(value) = parse(&raw) {
            return Ok(Some(value));
        }

        let name = String::from_utf8_lossy(attr.key.as_ref());
        if self.options.strict_values {
            return Err(OoxmlError::InvalidFormat(format!(
                "invalid value {:?} for attribute {}",
                raw, name
            )));
        }
        log::debug!("ignoring invalid value {:?} for attribute {}", raw, name);
        Ok(None)
    }

    /// Parse a decimal number attribute.
    #[inline]
    pub(crate) fn decimal(&self, attr: &Attribute<'_>) -> Result<Option<i64>> {
        self.parse_value(attr, parse_decimal)
    }

    /// Parse an on/off attribute.
    #[inline]
    pub(crate) fn on_off(&self, attr: &Attribute<'_>) -> Result<Option<OnOff>> {
        self.parse_value(attr, OnOff::from_xml)
    }

    /// Read the `val` attribute of a value element and consume the element.
    pub(crate) fn val_string(&mut self, elem: &Elem<'_>) -> Result<Option<String>> {
        let val = elem
            .attributes()
            .find(|attr| attr.key.local_name().as_ref() == b"val")
            .map(|attr| attr_string(&attr));
        self.skip(elem)?;
        Ok(val)
    }

    /// Read the `val` attribute of a value element through `parse`.
    pub(crate) fn val_with<T>(
        &mut self,
        elem: &Elem<'_>,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let mut val = None;
        if let Some(attr) = elem
            .attributes()
            .find(|attr| attr.key.local_name().as_ref() == b"val")
        {
            val = self.parse_value(&attr, parse)?;
        }
        self.skip(elem)?;
        Ok(val)
    }

    /// Read the `val` attribute of a decimal number element.
    #[inline]
    pub(crate) fn val_decimal(&mut self, elem: &Elem<'_>) -> Result<Option<i64>> {
        self.val_with(elem, parse_decimal)
    }

    /// Read an on/off element such as `<w:b/>`.
    #[inline]
    pub(crate) fn toggle(&mut self, elem: &Elem<'_>) -> Result<Toggle> {
        Ok(Toggle {
            val: self.val_with(elem, OnOff::from_xml)?,
        })
    }

    /// Record a relationship id referenced by the markup.
    pub(crate) fn observe_r_id(&mut self, r_id: &str) {
        self.relationships.observe(r_id);
    }

    /// Record a content-control id referenced by the markup.
    pub(crate) fn observe_sdt_id(&mut self, id: i64) {
        self.sdt_ids.observe(id);
    }

    /// Hand over the id counters seeded while decoding.
    pub(crate) fn into_ids(self) -> (Relationships, IdCounter) {
        (self.relationships, self.sdt_ids)
    }
}

/// Attribute value with references resolved.
#[inline]
pub(crate) fn attr_string(attr: &Attribute<'_>) -> String {
    unescape_xml(&String::from_utf8_lossy(&attr.value))
}

/// Whether an attribute is `xml:space="preserve"`.
#[inline]
pub(crate) fn is_preserve_space(attr: &Attribute<'_>) -> bool {
    attr.key.as_ref() == b"xml:space" && attr.value.as_ref() == b"preserve"
}

/// Markup sink with the attribute and value-element conventions of the part.
pub(crate) struct XmlWriter {
    xml: String,
    options: WriteOptions,
}

impl XmlWriter {
    pub(crate) fn new(options: WriteOptions) -> Self {
        Self {
            xml: String::with_capacity(4096),
            options,
        }
    }

    pub(crate) fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub(crate) fn into_string(self) -> String {
        self.xml
    }

    /// Append markup as-is.
    #[inline]
    pub(crate) fn raw(&mut self, markup: &str) {
        self.xml.push_str(markup);
    }

    /// Append escaped character data.
    #[inline]
    pub(crate) fn text(&mut self, text: &str) {
        self.xml.push_str(&escape_xml(text));
    }

    /// Begin a start tag: `<name`.
    #[inline]
    pub(crate) fn open(&mut self, name: &str) {
        self.xml.push('<');
        self.xml.push_str(name);
    }

    /// Finish a start tag that has content.
    #[inline]
    pub(crate) fn close(&mut self) {
        self.xml.push('>');
    }

    /// Finish a self-closing tag.
    #[inline]
    pub(crate) fn close_empty(&mut self) {
        self.xml.push_str("/>");
    }

    /// Write an end tag.
    #[inline]
    pub(crate) fn end(&mut self, name: &str) {
        self.xml.push_str("</");
        self.xml.push_str(name);
        self.xml.push('>');
    }

    pub(crate) fn attr(&mut self, name: &str, value: &str) {
        self.xml.push(' ');
        self.xml.push_str(name);
        self.xml.push_str("=\"");
        self.xml.push_str(&escape_xml(value));
        self.xml.push('"');
    }

    #[inline]
    pub(crate) fn opt_attr(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.attr(name, value);
        }
    }

    pub(crate) fn num_attr(&mut self, name: &str, value: Option<i64>) {
        if let Some(value) = value {
            let mut buffer = itoa::Buffer::new();
            self.xml.push(' ');
            self.xml.push_str(name);
            self.xml.push_str("=\"");
            self.xml.push_str(buffer.format(value));
            self.xml.push('"');
        }
    }

    #[inline]
    pub(crate) fn on_off_attr(&mut self, name: &str, value: Option<OnOff>) {
        self.opt_attr(name, value.map(OnOff::to_xml));
    }

    /// `<name w:val="..."/>` when the value is present.
    pub(crate) fn val_element(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.open(name);
            self.attr("w:val", value);
            self.close_empty();
        }
    }

    /// `<name w:val="n"/>` when the value is present.
    pub(crate) fn num_element(&mut self, name: &str, value: Option<i64>) {
        if value.is_some() {
            self.open(name);
            self.num_attr("w:val", value);
            self.close_empty();
        }
    }

    /// On/off element: `<name/>` or `<name w:val="..."/>`.
    pub(crate) fn toggle(&mut self, name: &str, value: Option<&Toggle>) {
        if let Some(toggle) = value {
            self.open(name);
            self.on_off_attr("w:val", toggle.val);
            self.close_empty();
        }
    }

    /// Element holding character data (`w:t`, `w:instrText`).
    ///
    /// `preserve` reflects the decoded `xml:space`; with the default options
    /// the marker is also added when the text starts or ends with whitespace.
    pub(crate) fn text_element(&mut self, name: &str, text: &str, preserve: bool) {
        let edges = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
        self.open(name);
        if preserve || (self.options.preserve_edge_whitespace && edges) {
            self.attr("xml:space", "preserve");
        }
        if text.is_empty() {
            self.close_empty();
        } else {
            self.close();
            self.text(text);
            self.end(name);
        }
    }
}

/// Decode a single node from a standalone fragment.
#[cfg(test)]
pub(crate) fn decode<T: XmlElement>(xml: &str) -> Result<T> {
    decode_with(xml, ReadOptions::default())
}

#[cfg(test)]
pub(crate) fn decode_with<T: XmlElement>(xml: &str, options: ReadOptions) -> Result<T> {
    let mut cursor = XmlCursor::new(xml.as_bytes(), options);
    let root = cursor.root()?;
    T::read(&mut cursor, &root)
}

/// Encode a single node without declaration.
#[cfg(test)]
pub(crate) fn encode<T: XmlElement>(node: &T) -> String {
    let mut out = XmlWriter::new(WriteOptions::default().fragment());
    node.write(&mut out).expect("encoding into a String cannot fail");
    out.into_string()
}

/// Prefix declarations wrapped around fragments in tests.
#[cfg(test)]
pub(crate) const TEST_NS: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml""#
);

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        names: Vec<String>,
        text: String,
    }

    impl XmlElement for Sample {
        fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
            let mut sample = Sample {
                names: Vec::new(),
                text: String::new(),
            };
            cursor.read_children(elem, |cursor, child| {
                match child.local_name().as_ref() {
                    b"t" => sample.text.push_str(&cursor.read_text(&child)?),
                    b"known" => {
                        sample.names.push("known".to_string());
                        cursor.skip(&child)?;
                    },
                    _ => cursor.skip_unknown(&child)?,
                }
                Ok(())
            })?;
            Ok(sample)
        }

        fn write(&self, out: &mut XmlWriter) -> Result<()> {
            out.raw("<sample/>");
            Ok(())
        }
    }

    #[test]
    fn test_unknown_children_are_skipped() {
        let sample: Sample =
            decode("<root><known/><x:other a='1'><deep><t>no</t></deep></x:other><known></known></root>")
                .unwrap();
        assert_eq!(sample.names, vec!["known", "known"]);
        assert!(sample.text.is_empty());
    }

    #[test]
    fn test_text_resolves_references() {
        let sample: Sample = decode("<root><t>a &amp; b &#x2713; <![CDATA[<c>]]></t></root>").unwrap();
        assert_eq!(sample.text, "a & b \u{2713} <c>");
    }

    #[test]
    fn test_truncated_input_is_an_error() {
        let result: Result<Sample> = decode("<root><known/>");
        assert!(matches!(result, Err(OoxmlError::Xml(_))));

        let result: Result<Sample> = decode("<root><t>abc");
        assert!(result.is_err());
    }

    #[test]
    fn test_mismatched_end_tag_is_an_error() {
        let result: Result<Sample> = decode("<root><known></other></root>");
        assert!(result.is_err());
    }

    #[test]
    fn test_capture_keeps_markup() {
        let xml = r#"<root><a:ext cx="1" cy="2"/><wp:effectExtent l="0"><x>y</x></wp:effectExtent></root>"#;
        let mut cursor = XmlCursor::new(xml.as_bytes(), ReadOptions::default());
        let root = cursor.root().unwrap();
        let mut captured = Vec::new();
        cursor
            .read_children(&root, |cursor, child| {
                captured.push(cursor.capture(&child)?);
                Ok(())
            })
            .unwrap();
        assert_eq!(
            captured,
            vec![
                r#"<a:ext cx="1" cy="2"/>"#.to_string(),
                r#"<wp:effectExtent l="0"><x>y</x></wp:effectExtent>"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_skipped_and_captured_markup_feeds_relationship_ids() {
        let xml = concat!(
            r#"<root><w:altChunk r:id="rId5"/>"#,
            r#"<a:graphicData><c:chart r:id="rId7"/></a:graphicData>"#,
            r#"<x><y r:embed="rId2" id="rId40"/></x></root>"#
        );
        let mut cursor = XmlCursor::new(xml.as_bytes(), ReadOptions::default());
        let root = cursor.root().unwrap();
        let mut captured = Vec::new();
        cursor
            .read_children(&root, |cursor, child| match child.local_name().as_ref() {
                b"graphicData" => {
                    captured.push(cursor.capture(&child)?);
                    Ok(())
                },
                _ => cursor.skip_unknown(&child),
            })
            .unwrap();
        assert_eq!(
            captured,
            vec![r#"<a:graphicData><c:chart r:id="rId7"/></a:graphicData>"#.to_string()]
        );
        let (mut rels, _) = cursor.into_ids();
        assert_eq!(rels.next_r_id(), "rId8");
        assert_eq!(rels.next_r_id(), "rId9");
    }

    #[test]
    fn test_strict_values() {
        let xml = r#"<w:sz w:val="twelve"/>"#;
        let mut cursor = XmlCursor::new(xml.as_bytes(), ReadOptions::default());
        let elem = cursor.root().unwrap();
        assert_eq!(cursor.val_decimal(&elem).unwrap(), None);

        let mut cursor = XmlCursor::new(xml.as_bytes(), ReadOptions::new().strict());
        let elem = cursor.root().unwrap();
        assert!(matches!(
            cursor.val_decimal(&elem),
            Err(OoxmlError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_writer_suppresses_absent_values() {
        let mut out = XmlWriter::new(WriteOptions::default());
        out.open("w:x");
        out.opt_attr("w:a", None);
        out.num_attr("w:b", None);
        out.num_attr("w:c", Some(-5));
        out.opt_attr("w:d", Some("\"q\" & <r>"));
        out.close_empty();
        out.val_element("w:y", None);
        out.num_element("w:z", None);
        out.toggle("w:b", None);
        out.toggle("w:i", Some(&Toggle::on()));
        assert_eq!(
            out.into_string(),
            r#"<w:x w:c="-5" w:d="&quot;q&quot; &amp; &lt;r&gt;"/><w:i/>"#
        );
    }

    #[test]
    fn test_text_element_preserve_policy() {
        let mut out = XmlWriter::new(WriteOptions::default());
        out.text_element("w:t", " lead", false);
        out.text_element("w:t", "plain", false);
        out.text_element("w:t", "kept", true);
        assert_eq!(
            out.into_string(),
            r#"<w:t xml:space="preserve"> lead</w:t><w:t>plain</w:t><w:t xml:space="preserve">kept</w:t>"#
        );

        let mut out = XmlWriter::new(WriteOptions::default().with_preserve_edge_whitespace(false));
        out.text_element("w:t", " lead", false);
        assert_eq!(out.into_string(), "<w:t> lead</w:t>");
    }
}
