/// Document - the main API for working with the document part.
///
/// A [`Document`] owns the decoded tree of `word/document.xml` together with
/// the two id counters the part needs when content is added: relationship
/// ids (`rIdN`) and content-control ids. Both counters are seeded from the
/// highest value seen while decoding, so minted ids never collide with ids
/// already in the part.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter};
use crate::ooxml::docx::content_control::{
    CheckboxSymbol, ContentControl, ListItem, SdtType, StructuredDocumentTag,
};
use crate::ooxml::docx::drawing::Drawing;
use crate::ooxml::docx::field::Field;
use crate::ooxml::docx::field_engine;
use crate::ooxml::docx::format::Background;
use crate::ooxml::docx::options::{ReadOptions, WriteOptions};
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphChild};
use crate::ooxml::docx::replace;
use crate::ooxml::docx::run::{Run, RunChild};
use crate::ooxml::docx::section::SectionProperties;
use crate::ooxml::docx::table::Table;
use crate::ooxml::docx::types::{IdCounter, OnOff};
use crate::ooxml::docx::walk;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::Relationships;
use crate::ooxml::opc::constants::{namespace, relationship_type};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// Block-level content of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentChild {
    Paragraph(Paragraph),
    Table(Table),
    /// Block-level content control
    Sdt(StructuredDocumentTag),
    SectionProperties(SectionProperties),
}

/// The document body (`w:body`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub children: Vec<DocumentChild>,
}

impl Body {
    /// Paragraphs directly in the body.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.children.iter().filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(para),
            _ => None,
        })
    }

    /// Tables directly in the body.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.children.iter().filter_map(|child| match child {
            DocumentChild::Table(table) => Some(table),
            _ => None,
        })
    }

    /// The final section properties of the body, if any.
    pub fn section(&self) -> Option<&SectionProperties> {
        self.children.iter().rev().find_map(|child| match child {
            DocumentChild::SectionProperties(section) => Some(section),
            _ => None,
        })
    }

    /// Append a block, keeping a trailing `w:sectPr` last.
    fn push(&mut self, child: DocumentChild) -> &mut DocumentChild {
        let index = match self.children.last() {
            Some(DocumentChild::SectionProperties(_)) => self.children.len() - 1,
            _ => self.children.len(),
        };
        self.children.insert(index, child);
        &mut self.children[index]
    }
}

impl XmlElement for Body {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut body = Body::default();
        cursor.read_children(elem, |cursor, child| {
            let block = match child.local_name().as_ref() {
                b"p" => DocumentChild::Paragraph(Paragraph::read(cursor, &child)?),
                b"tbl" => DocumentChild::Table(Table::read(cursor, &child)?),
                b"sdt" => DocumentChild::Sdt(StructuredDocumentTag::read(cursor, &child)?),
                b"sectPr" => {
                    DocumentChild::SectionProperties(SectionProperties::read(cursor, &child)?)
                },
                _ => return cursor.skip_unknown(&child),
            };
            body.children.push(block);
            Ok(())
        })?;
        Ok(body)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.children.is_empty() {
            out.raw("<w:body/>");
            return Ok(());
        }
        out.raw("<w:body>");
        for child in &self.children {
            match child {
                DocumentChild::Paragraph(para) => para.write(out)?,
                DocumentChild::Table(table) => table.write(out)?,
                DocumentChild::Sdt(sdt) => sdt.write(out)?,
                DocumentChild::SectionProperties(section) => section.write(out)?,
            }
        }
        out.raw("</w:body>");
        Ok(())
    }
}

/// A Word document part.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// doc.add_paragraph("Hello World! This is a test.");
/// assert_eq!(doc.replace_all("World", "Universe"), 1);
/// assert_eq!(doc.text(), "Hello Universe! This is a test.");
///
/// let control = doc.add_text_content_control("Name", "name", "Ada", false);
/// assert_eq!(control.id(), Some(1));
/// assert!(doc.find_content_control_by_tag("name").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub background: Option<Background>,
    pub body: Option<Body>,
    relationships: Relationships,
    sdt_ids: IdCounter,
    drawing_ids: IdCounter,
}

impl Document {
    /// Create a document with an empty body.
    pub fn new() -> Self {
        Self {
            body: Some(Body::default()),
            ..Default::default()
        }
    }

    /// Decode the markup of a document part.
    ///
    /// # Errors
    ///
    /// Returns [`OoxmlError::Xml`] for malformed or truncated markup, and
    /// [`OoxmlError::InvalidFormat`] when the root element is not
    /// `w:document`.
    pub fn from_xml(xml: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_xml_with_options(xml, ReadOptions::default())
    }

    /// Decode the markup of a document part with explicit options.
    pub fn from_xml_with_options(xml: impl AsRef<[u8]>, options: ReadOptions) -> Result<Self> {
        let mut cursor = XmlCursor::new(xml.as_ref(), options);
        let root = cursor.root()?;
        if root.local_name().as_ref() != b"document" {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected a document root, found {}",
                String::from_utf8_lossy(root.local_name().as_ref())
            )));
        }

        let mut background = None;
        let mut body = None;
        cursor.read_children(&root, |cursor, child| {
            match child.local_name().as_ref() {
                b"background" => background = Some(Background::read(cursor, &child)?),
                b"body" => body = Some(Body::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;

        let (relationships, sdt_ids) = cursor.into_ids();
        let mut doc = Self {
            background,
            body,
            relationships,
            sdt_ids,
            drawing_ids: IdCounter::default(),
        };
        doc.drawing_ids = doc.collect_drawing_ids();
        Ok(doc)
    }

    /// Encode the document part, with XML declaration.
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with_options(WriteOptions::default())
    }

    /// Encode the document part with explicit options.
    pub fn to_xml_with_options(&self, options: WriteOptions) -> Result<String> {
        let mut out = XmlWriter::new(options);
        if out.options().xml_declaration {
            if out.options().standalone {
                out.raw(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
            } else {
                out.raw(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            }
            out.raw("\n");
        }
        out.open("w:document");
        for (prefix, uri) in namespace::DOCUMENT_DECLARATIONS {
            out.attr(&format!("xmlns:{}", prefix), uri);
        }
        out.attr("mc:Ignorable", namespace::IGNORABLE);
        out.close();
        if let Some(background) = &self.background {
            background.write(&mut out)?;
        }
        if let Some(body) = &self.body {
            body.write(&mut out)?;
        }
        out.end("w:document");
        Ok(out.into_string())
    }

    #[inline]
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    #[inline]
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    fn body_or_insert(&mut self) -> &mut Body {
        self.body.get_or_insert_with(Body::default)
    }

    /// Relationships minted through this document, for the package layer.
    #[inline]
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Record relationship ids the package already declares for this part.
    ///
    /// Pass every `Id` of the part's `.rels` file before minting, so that new
    /// ids do not clash with relationships the markup never mentions
    /// (styles, settings, theme, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use docweave::ooxml::docx::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.observe_relationships(["rId1", "rId2", "rId3"]);
    /// assert_eq!(doc.add_hyperlink_relationship("https://example.com"), "rId4");
    /// ```
    pub fn observe_relationships<'r>(&mut self, r_ids: impl IntoIterator<Item = &'r str>) {
        for r_id in r_ids {
            self.relationships.observe(r_id);
        }
    }

    /// Mint the next relationship id without declaring a relationship.
    pub fn next_relationship_id(&mut self) -> String {
        self.relationships.next_r_id()
    }

    /// Mint the next content-control id.
    pub fn next_content_control_id(&mut self) -> i64 {
        self.sdt_ids.next()
    }

    /// Declare an external hyperlink target and return its relationship id.
    ///
    /// Declaring the same URL twice returns the same id.
    pub fn add_hyperlink_relationship(&mut self, url: &str) -> String {
        self.relationships
            .get_or_add(relationship_type::HYPERLINK, url, true)
    }

    /// Declare an image part and return its relationship id.
    ///
    /// `target` is the part name relative to the document part, e.g.
    /// `media/image1.png`.
    pub fn add_image_relationship(&mut self, target: &str) -> String {
        self.relationships
            .get_or_add(relationship_type::IMAGE, target, false)
    }

    /// Append a paragraph holding a single run of text.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.push_paragraph(Paragraph::with_text(text))
    }

    /// Append a paragraph without content.
    pub fn add_empty_paragraph(&mut self) -> &mut Paragraph {
        self.push_paragraph(Paragraph::new())
    }

    /// Append a paragraph holding only a page break.
    pub fn add_page_break(&mut self) -> &mut Paragraph {
        let para = self.add_empty_paragraph();
        para.add_page_break();
        para
    }

    fn push_paragraph(&mut self, para: Paragraph) -> &mut Paragraph {
        match self.body_or_insert().push(DocumentChild::Paragraph(para)) {
            DocumentChild::Paragraph(para) => para,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append an empty table.
    pub fn add_table(&mut self) -> &mut Table {
        match self.body_or_insert().push(DocumentChild::Table(Table::new())) {
            DocumentChild::Table(table) => table,
            _ => unreachable!("a table was just pushed"),
        }
    }

    /// Append a paragraph holding an inline picture of the image at `target`.
    ///
    /// `cx` and `cy` are the displayed size in EMUs.
    pub fn add_picture(&mut self, target: &str, cx: i64, cy: i64) -> &mut Paragraph {
        let r_id = self.add_image_relationship(target);
        let id = self.drawing_ids.next();
        let name = format!("Picture {}", id);
        let para = self.add_empty_paragraph();
        para.add_run(Run::new())
            .add_drawing(Drawing::inline_picture(&r_id, cx, cy, id, &name));
        para
    }

    /// Every `wp:docPr` id in the body.
    fn collect_drawing_ids(&self) -> IdCounter {
        let mut ids = IdCounter::default();
        walk::run_sequences(self.body(), |runs| {
            for run in runs {
                for child in &run.children {
                    if let RunChild::Drawing(drawing) = child
                        && let Some(id) = drawing.doc_properties().and_then(|pr| pr.id)
                    {
                        ids.observe(id);
                    }
                }
            }
        });
        ids
    }

    /// Append a content control of the given type in a new paragraph.
    ///
    /// The control is inline, with empty content and a freshly minted id.
    pub fn add_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        sdt_type: SdtType,
    ) -> &mut ContentControl {
        let id = self.next_content_control_id();
        let sdt = StructuredDocumentTag::new(id, alias, tag, sdt_type);
        let para = self.add_empty_paragraph();
        para.children.push(ParagraphChild::Sdt(sdt));
        match para.children.last_mut() {
            Some(ParagraphChild::Sdt(sdt)) => sdt,
            _ => unreachable!("a content control was just pushed"),
        }
    }

    /// Append a plain text content control.
    pub fn add_text_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        initial_text: &str,
        multi_line: bool,
    ) -> &mut ContentControl {
        let control = self.add_content_control(
            alias,
            tag,
            SdtType::Text {
                multi_line: Some(OnOff::from_bool(multi_line)),
            },
        );
        if !initial_text.is_empty() {
            control.add_run(Run::with_text(initial_text));
        }
        control
    }

    /// Append a combo box content control.
    ///
    /// A non-empty `last_value` is also shown as the control's content.
    pub fn add_combo_box_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        items: Vec<ListItem>,
        last_value: &str,
    ) -> &mut ContentControl {
        let last = (!last_value.is_empty()).then(|| last_value.to_string());
        let control = self.add_content_control(
            alias,
            tag,
            SdtType::ComboBox {
                last_value: last,
                items,
            },
        );
        if !last_value.is_empty() {
            control.add_run(Run::with_text(last_value));
        }
        control
    }

    /// Append a drop-down list content control.
    ///
    /// A non-empty `last_value` is also shown as the control's content.
    pub fn add_drop_down_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        items: Vec<ListItem>,
        last_value: &str,
    ) -> &mut ContentControl {
        let last = (!last_value.is_empty()).then(|| last_value.to_string());
        let control = self.add_content_control(
            alias,
            tag,
            SdtType::DropDownList {
                last_value: last,
                items,
            },
        );
        if !last_value.is_empty() {
            control.add_run(Run::with_text(last_value));
        }
        control
    }

    /// Append a date picker content control using the Gregorian calendar.
    ///
    /// With a date, the control stores it in ISO 8601 form and shows it as
    /// `YYYY-MM-DD`; `format` is the display pattern Word applies when the
    /// user picks another date.
    pub fn add_date_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        date: Option<DateTime<Utc>>,
        format: &str,
    ) -> &mut ContentControl {
        let sdt_type = SdtType::Date {
            full_date: date.map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            format: (!format.is_empty()).then(|| format.to_string()),
            lid: None,
            storage_format: None,
            calendar: Some("gregorian".to_string()),
        };
        let control = self.add_content_control(alias, tag, sdt_type);
        if let Some(date) = date {
            control.add_run(Run::with_text(date.format("%Y-%m-%d").to_string()));
        }
        control
    }

    /// Append a check box content control.
    pub fn add_checkbox_content_control(
        &mut self,
        alias: &str,
        tag: &str,
        checked: bool,
    ) -> &mut ContentControl {
        let sdt_type = SdtType::Checkbox {
            checked: Some(OnOff::from_bool(checked)),
            checked_state: Some(CheckboxSymbol::new("Wingdings", "2713")),
            unchecked_state: Some(CheckboxSymbol::new("Wingdings", "2717")),
        };
        let control = self.add_content_control(alias, tag, sdt_type);
        control.add_run(Run::with_text(if checked { "☑" } else { "☐" }));
        control
    }

    /// Find the first content control with the given tag.
    pub fn find_content_control_by_tag(&self, tag: &str) -> Option<&ContentControl> {
        walk::content_controls(self.body())
            .into_iter()
            .find(|sdt| sdt.tag() == tag)
    }

    /// Find the first content control with the given tag, for editing.
    pub fn find_content_control_by_tag_mut(&mut self, tag: &str) -> Option<&mut ContentControl> {
        walk::find_content_control_mut(self.body_mut(), |sdt| sdt.tag() == tag)
    }

    /// All content controls, block-level and inline, in document order.
    pub fn content_controls(&self) -> Vec<&ContentControl> {
        walk::content_controls(self.body())
    }

    /// Replace every occurrence of `search` with `replace`.
    ///
    /// Each text node is searched on its own, so a match split across runs
    /// is not found. Returns the number of occurrences replaced; an empty
    /// `search` returns 0 and changes nothing.
    pub fn replace_all(&mut self, search: &str, replace: &str) -> usize {
        replace::replace_all(self.body.as_mut(), search, replace)
    }

    /// Rewrite the results of fields whose trimmed instruction is a key of
    /// `values`. Returns the number of fields rewritten.
    pub fn replace_fields(&mut self, values: &HashMap<String, String>) -> usize {
        field_engine::replace_fields(self.body.as_mut(), values)
    }

    /// Complete fields of the document, in document order.
    pub fn fields(&self) -> Vec<Field> {
        field_engine::fields(self.body())
    }

    /// Text of the document for inspection.
    ///
    /// Body paragraphs are separated by newlines. Table rows are separated by
    /// newlines and their cells by tabs.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let Some(body) = &self.body else {
            return text;
        };
        let mut first = true;
        for child in &body.children {
            let block = match child {
                DocumentChild::Paragraph(para) => para.text(),
                DocumentChild::Table(table) => table.text(),
                DocumentChild::Sdt(sdt) => sdt.text(),
                DocumentChild::SectionProperties(_) => continue,
            };
            if !first {
                text.push('\n');
            }
            first = false;
            text.push_str(&block);
        }
        text
    }
}
