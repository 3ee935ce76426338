/// Paragraph structures for Word documents.
use crate::ooxml::docx::bookmark::{BookmarkEnd, BookmarkStart};
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter};
use crate::ooxml::docx::comment::{CommentRangeEnd, CommentRangeStart};
use crate::ooxml::docx::content_control::StructuredDocumentTag;
use crate::ooxml::docx::enums::BreakType;
use crate::ooxml::docx::format::{Indent, Spacing};
use crate::ooxml::docx::hyperlink::Hyperlink;
use crate::ooxml::docx::run::{Run, RunProperties};
use crate::ooxml::docx::types::Toggle;
use crate::ooxml::error::Result;

/// Paragraph properties (`w:pPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphProperties {
    /// Paragraph style id
    pub style: Option<String>,
    pub keep_next: Option<Toggle>,
    pub keep_lines: Option<Toggle>,
    pub page_break_before: Option<Toggle>,
    pub spacing: Option<Spacing>,
    pub indent: Option<Indent>,
    /// Justification, e.g. `left`, `center`, `both`
    pub justification: Option<String>,
    /// Formatting of the paragraph mark
    pub run_properties: Option<RunProperties>,
}

impl XmlElement for ParagraphProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"pStyle" => props.style = cursor.val_string(&child)?,
                b"keepNext" => props.keep_next = Some(cursor.toggle(&child)?),
                b"keepLines" => props.keep_lines = Some(cursor.toggle(&child)?),
                b"pageBreakBefore" => props.page_break_before = Some(cursor.toggle(&child)?),
                b"spacing" => props.spacing = Some(Spacing::read(cursor, &child)?),
                b"ind" => props.indent = Some(Indent::read(cursor, &child)?),
                b"jc" => props.justification = cursor.val_string(&child)?,
                b"rPr" => props.run_properties = Some(RunProperties::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == ParagraphProperties::default() {
            out.raw("<w:pPr/>");
            return Ok(());
        }
        out.raw("<w:pPr>");
        out.val_element("w:pStyle", self.style.as_deref());
        out.toggle("w:keepNext", self.keep_next.as_ref());
        out.toggle("w:keepLines", self.keep_lines.as_ref());
        out.toggle("w:pageBreakBefore", self.page_break_before.as_ref());
        if let Some(spacing) = &self.spacing {
            spacing.write(out)?;
        }
        if let Some(indent) = &self.indent {
            indent.write(out)?;
        }
        out.val_element("w:jc", self.justification.as_deref());
        if let Some(run_properties) = &self.run_properties {
            run_properties.write(out)?;
        }
        out.raw("</w:pPr>");
        Ok(())
    }
}

/// Content of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphChild {
    Run(Run),
    Hyperlink(Hyperlink),
    /// Inline content control
    Sdt(StructuredDocumentTag),
    BookmarkStart(BookmarkStart),
    BookmarkEnd(BookmarkEnd),
    CommentRangeStart(CommentRangeStart),
    CommentRangeEnd(CommentRangeEnd),
}

/// A paragraph (`w:p`).
///
/// # Example
///
/// ```
/// use docweave::ooxml::docx::Paragraph;
///
/// let mut para = Paragraph::new();
/// para.add_text("Total: ");
/// para.add_text("42").bold(true);
/// assert_eq!(para.text(), "Total: 42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    pub children: Vec<ParagraphChild>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single run of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            properties: None,
            children: vec![ParagraphChild::Run(Run::with_text(text))],
        }
    }

    /// Get the text content of this paragraph.
    ///
    /// Text of hyperlinks and inline content controls is included, in
    /// document order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => text.push_str(&run.text()),
                ParagraphChild::Hyperlink(link) => text.push_str(&link.text()),
                ParagraphChild::Sdt(sdt) => text.push_str(&sdt.text()),
                _ => {},
            }
        }
        text
    }

    /// Direct runs of the paragraph.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        })
    }

    /// Append a run and return it for formatting.
    pub fn add_run(&mut self, run: Run) -> &mut Run {
        self.children.push(ParagraphChild::Run(run));
        match self.children.last_mut() {
            Some(ParagraphChild::Run(run)) => run,
            _ => unreachable!("a run was just pushed"),
        }
    }

    /// Append a run of text and return it for formatting.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Run {
        self.add_run(Run::with_text(text))
    }

    /// Append a run holding a page break.
    pub fn add_page_break(&mut self) -> &mut Run {
        let mut run = Run::new();
        run.add_break(BreakType::Page);
        self.add_run(run)
    }

    /// Append a hyperlink to the target declared as relationship `r_id`.
    pub fn add_link(&mut self, text: impl Into<String>, r_id: &str) -> &mut Hyperlink {
        self.push_link(Hyperlink::external(r_id, text))
    }

    /// Append a hyperlink to a bookmark.
    pub fn add_internal_link(
        &mut self,
        text: impl Into<String>,
        anchor: impl Into<String>,
    ) -> &mut Hyperlink {
        self.push_link(Hyperlink::internal(anchor, text))
    }

    fn push_link(&mut self, link: Hyperlink) -> &mut Hyperlink {
        self.children.push(ParagraphChild::Hyperlink(link));
        match self.children.last_mut() {
            Some(ParagraphChild::Hyperlink(link)) => link,
            _ => unreachable!("a hyperlink was just pushed"),
        }
    }

    /// Surround the current content with a bookmark.
    pub fn add_bookmark(&mut self, id: i64, name: impl Into<String>) -> &mut Self {
        self.children
            .insert(0, ParagraphChild::BookmarkStart(BookmarkStart::new(id, name)));
        self.children
            .push(ParagraphChild::BookmarkEnd(BookmarkEnd::new(id)));
        self
    }

    /// Get the property block, creating it if needed.
    pub fn properties_mut(&mut self) -> &mut ParagraphProperties {
        self.properties
            .get_or_insert_with(ParagraphProperties::default)
    }

    /// Apply a paragraph style.
    pub fn style(&mut self, style_id: &str) -> &mut Self {
        self.properties_mut().style = Some(style_id.to_string());
        self
    }

    /// Set paragraph alignment (e.g., "left", "center", "right", "both").
    pub fn justification(&mut self, jc: &str) -> &mut Self {
        self.properties_mut().justification = Some(jc.to_string());
        self
    }

    /// Set spacing before and after the paragraph in twips.
    pub fn spacing(&mut self, before: Option<i64>, after: Option<i64>) -> &mut Self {
        let spacing = self.properties_mut().spacing.get_or_insert_with(Spacing::default);
        spacing.before = before;
        spacing.after = after;
        self
    }

    /// Set left and first-line indentation in twips.
    pub fn indent(&mut self, left: Option<i64>, first_line: Option<i64>) -> &mut Self {
        let indent = self.properties_mut().indent.get_or_insert_with(Indent::default);
        indent.left = left;
        indent.first_line = first_line;
        self
    }
}

impl XmlElement for Paragraph {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut para = Paragraph::default();
        cursor.read_children(elem, |cursor, child| {
            let node = match child.local_name().as_ref() {
                b"pPr" => {
                    para.properties = Some(ParagraphProperties::read(cursor, &child)?);
                    return Ok(());
                },
                b"r" => ParagraphChild::Run(Run::read(cursor, &child)?),
                b"hyperlink" => ParagraphChild::Hyperlink(Hyperlink::read(cursor, &child)?),
                b"sdt" => ParagraphChild::Sdt(StructuredDocumentTag::read(cursor, &child)?),
                b"bookmarkStart" => {
                    ParagraphChild::BookmarkStart(BookmarkStart::read(cursor, &child)?)
                },
                b"bookmarkEnd" => ParagraphChild::BookmarkEnd(BookmarkEnd::read(cursor, &child)?),
                b"commentRangeStart" => {
                    ParagraphChild::CommentRangeStart(CommentRangeStart::read(cursor, &child)?)
                },
                b"commentRangeEnd" => {
                    ParagraphChild::CommentRangeEnd(CommentRangeEnd::read(cursor, &child)?)
                },
                _ => return cursor.skip_unknown(&child),
            };
            para.children.push(node);
            Ok(())
        })?;
        Ok(para)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.children.is_empty() {
            out.raw("<w:p/>");
            return Ok(());
        }
        out.raw("<w:p>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => run.write(out)?,
                ParagraphChild::Hyperlink(link) => link.write(out)?,
                ParagraphChild::Sdt(sdt) => sdt.write(out)?,
                ParagraphChild::BookmarkStart(start) => start.write(out)?,
                ParagraphChild::BookmarkEnd(end) => end.write(out)?,
                ParagraphChild::CommentRangeStart(start) => start.write(out)?,
                ParagraphChild::CommentRangeEnd(end) => end.write(out)?,
            }
        }
        out.raw("</w:p>");
        Ok(())
    }
}
