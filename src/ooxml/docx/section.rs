/// Section - page setup and layout properties (`w:sectPr`).
///
/// All measurements are in twips (1/20 of a point, 1/1440 of an inch), the
/// unit the markup uses for page geometry.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::enums::{WdHeaderFooter, WdOrientation, WdSectionStart};
use crate::ooxml::docx::types::Toggle;
use crate::ooxml::error::Result;

/// Twips per inch.
pub const TWIPS_PER_INCH: i64 = 1440;

/// Reference from a section to a header or footer part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFooterReference {
    pub kind: Option<WdHeaderFooter>,
    pub r_id: Option<String>,
}

impl HeaderFooterReference {
    pub fn new(kind: WdHeaderFooter, r_id: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            r_id: Some(r_id.into()),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut reference = HeaderFooterReference::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"type" => reference.kind = cursor.parse_value(&attr, WdHeaderFooter::from_xml)?,
                b"id" => {
                    let r_id = attr_string(&attr);
                    cursor.observe_r_id(&r_id);
                    reference.r_id = Some(r_id);
                },
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(reference)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.opt_attr("w:type", self.kind.map(WdHeaderFooter::to_xml));
        out.opt_attr("r:id", self.r_id.as_deref());
        out.close_empty();
    }
}

/// Page size for a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSize {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub orientation: Option<WdOrientation>,
}

impl PageSize {
    /// US Letter, portrait.
    pub const fn letter() -> Self {
        Self {
            width: Some(12240),
            height: Some(15840),
            orientation: None,
        }
    }

    /// ISO A4, portrait.
    pub const fn a4() -> Self {
        Self {
            width: Some(11906),
            height: Some(16838),
            orientation: None,
        }
    }

    /// Swap the dimensions and mark the page as landscape.
    pub fn landscape(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            orientation: Some(WdOrientation::Landscape),
        }
    }
}

/// Page margins for a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub top: Option<i64>,
    pub right: Option<i64>,
    pub bottom: Option<i64>,
    pub left: Option<i64>,
    /// Header distance from top edge
    pub header: Option<i64>,
    /// Footer distance from bottom edge
    pub footer: Option<i64>,
    /// Gutter margin (for binding)
    pub gutter: Option<i64>,
}

impl Margins {
    /// The same margin on all four sides.
    pub const fn uniform(twips: i64) -> Self {
        Self {
            top: Some(twips),
            right: Some(twips),
            bottom: Some(twips),
            left: Some(twips),
            header: None,
            footer: None,
            gutter: None,
        }
    }
}

/// Text columns of a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub count: Option<i64>,
    /// Space between columns
    pub space: Option<i64>,
}

/// Section properties.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::{Margins, PageSize, SectionProperties};
///
/// let mut section = SectionProperties::default();
/// section.page_size = Some(PageSize::a4().landscape());
/// section.margins = Some(Margins::uniform(1440));
/// assert_eq!(section.page_size.and_then(|size| size.width), Some(16838));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionProperties {
    pub headers: Vec<HeaderFooterReference>,
    pub footers: Vec<HeaderFooterReference>,
    pub start_type: Option<WdSectionStart>,
    pub page_size: Option<PageSize>,
    pub margins: Option<Margins>,
    pub columns: Option<Columns>,
    /// Distinct first page header and footer
    pub title_page: Option<Toggle>,
}

impl SectionProperties {
    /// Get the page orientation, portrait when unspecified.
    pub fn orientation(&self) -> WdOrientation {
        self.page_size
            .and_then(|size| size.orientation)
            .unwrap_or(WdOrientation::Portrait)
    }

    /// Get the section start type, a new page when unspecified.
    pub fn start_type(&self) -> WdSectionStart {
        self.start_type.unwrap_or(WdSectionStart::NewPage)
    }

    /// Relationship id of the header of the given kind.
    pub fn header(&self, kind: WdHeaderFooter) -> Option<&str> {
        find_reference(&self.headers, kind)
    }

    /// Relationship id of the footer of the given kind.
    pub fn footer(&self, kind: WdHeaderFooter) -> Option<&str> {
        find_reference(&self.footers, kind)
    }

    pub fn has_title_page(&self) -> bool {
        self.title_page.is_some_and(Toggle::is_on)
    }
}

fn find_reference(references: &[HeaderFooterReference], kind: WdHeaderFooter) -> Option<&str> {
    references
        .iter()
        .find(|reference| reference.kind == Some(kind))
        .and_then(|reference| reference.r_id.as_deref())
}

impl XmlElement for SectionProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut section = SectionProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"headerReference" => section
                    .headers
                    .push(HeaderFooterReference::read(cursor, &child)?),
                b"footerReference" => section
                    .footers
                    .push(HeaderFooterReference::read(cursor, &child)?),
                b"type" => section.start_type = cursor.val_with(&child, WdSectionStart::from_xml)?,
                b"pgSz" => {
                    let mut size = PageSize::default();
                    for attr in child.attributes() {
                        match attr.key.local_name().as_ref() {
                            b"w" => size.width = cursor.decimal(&attr)?,
                            b"h" => size.height = cursor.decimal(&attr)?,
                            b"orient" => {
                                size.orientation =
                                    cursor.parse_value(&attr, WdOrientation::from_xml)?
                            },
                            _ => {},
                        }
                    }
                    cursor.skip(&child)?;
                    section.page_size = Some(size);
                },
                b"pgMar" => {
                    let mut margins = Margins::default();
                    for attr in child.attributes() {
                        let slot = match attr.key.local_name().as_ref() {
                            b"top" => &mut margins.top,
                            b"right" => &mut margins.right,
                            b"bottom" => &mut margins.bottom,
                            b"left" => &mut margins.left,
                            b"header" => &mut margins.header,
                            b"footer" => &mut margins.footer,
                            b"gutter" => &mut margins.gutter,
                            _ => continue,
                        };
                        *slot = cursor.decimal(&attr)?;
                    }
                    cursor.skip(&child)?;
                    section.margins = Some(margins);
                },
                b"cols" => {
                    let mut columns = Columns::default();
                    for attr in child.attributes() {
                        match attr.key.local_name().as_ref() {
                            b"num" => columns.count = cursor.decimal(&attr)?,
                            b"space" => columns.space = cursor.decimal(&attr)?,
                            _ => {},
                        }
                    }
                    cursor.skip(&child)?;
                    section.columns = Some(columns);
                },
                b"titlePg" => section.title_page = Some(cursor.toggle(&child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(section)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == SectionProperties::default() {
            out.raw("<w:sectPr/>");
            return Ok(());
        }
        out.raw("<w:sectPr>");
        for reference in &self.headers {
            reference.write_as("w:headerReference", out);
        }
        for reference in &self.footers {
            reference.write_as("w:footerReference", out);
        }
        out.val_element("w:type", self.start_type.map(WdSectionStart::to_xml));
        if let Some(size) = &self.page_size {
            out.open("w:pgSz");
            out.num_attr("w:w", size.width);
            out.num_attr("w:h", size.height);
            out.opt_attr("w:orient", size.orientation.map(WdOrientation::to_xml));
            out.close_empty();
        }
        if let Some(margins) = &self.margins {
            out.open("w:pgMar");
            out.num_attr("w:top", margins.top);
            out.num_attr("w:right", margins.right);
            out.num_attr("w:bottom", margins.bottom);
            out.num_attr("w:left", margins.left);
            out.num_attr("w:header", margins.header);
            out.num_attr("w:footer", margins.footer);
            out.num_attr("w:gutter", margins.gutter);
            out.close_empty();
        }
        if let Some(columns) = &self.columns {
            out.open("w:cols");
            out.num_attr("w:num", columns.count);
            out.num_attr("w:space", columns.space);
            out.close_empty();
        }
        out.toggle("w:titlePg", self.title_page.as_ref());
        out.raw("</w:sectPr>");
        Ok(())
    }
}
