/// Hyperlinks (`w:hyperlink`).
///
/// Hyperlinks point either to an external target through a relationship id,
/// or to a bookmark inside the document through an anchor. The model keeps a
/// single run per hyperlink.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::run::Run;
use crate::ooxml::docx::types::OnOff;
use crate::ooxml::error::Result;
use crate::ooxml::opc::Relationships;

/// A hyperlink in a paragraph.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::Hyperlink;
///
/// let link = Hyperlink::internal("Summary", "see summary");
/// assert!(link.is_internal());
/// assert_eq!(link.text(), "see summary");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hyperlink {
    /// Relationship id of an external target
    pub r_id: Option<String>,
    /// Bookmark name of an internal target
    pub anchor: Option<String>,
    pub tooltip: Option<String>,
    /// Add the target to the viewed hyperlinks
    pub history: Option<OnOff>,
    pub run: Option<Run>,
}

impl Hyperlink {
    /// A link to an external target declared as relationship `r_id`.
    pub fn external(r_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            r_id: Some(r_id.into()),
            history: Some(OnOff::One),
            run: Some(link_run(text)),
            ..Default::default()
        }
    }

    /// A link to a bookmark.
    pub fn internal(anchor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            anchor: Some(anchor.into()),
            history: Some(OnOff::One),
            run: Some(link_run(text)),
            ..Default::default()
        }
    }

    /// Display text of the hyperlink.
    pub fn text(&self) -> String {
        self.run.as_ref().map(Run::text).unwrap_or_default()
    }

    /// Check if this is an internal link (to a bookmark).
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.anchor.is_some() && self.r_id.is_none()
    }

    /// Resolve the external target through the part's relationships.
    pub fn url<'a>(&self, rels: &'a Relationships) -> Option<&'a str> {
        let rel = rels.get(self.r_id.as_deref()?)?;
        Some(rel.target_ref())
    }
}

fn link_run(text: impl Into<String>) -> Run {
    let mut run = Run::with_text(text);
    run.style("Hyperlink");
    run
}

impl XmlElement for Hyperlink {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut link = Hyperlink::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"id" => {
                    let r_id = attr_string(&attr);
                    cursor.observe_r_id(&r_id);
                    link.r_id = Some(r_id);
                },
                b"anchor" => link.anchor = Some(attr_string(&attr)),
                b"tooltip" => link.tooltip = Some(attr_string(&attr)),
                b"history" => link.history = cursor.on_off(&attr)?,
                _ => {},
            }
        }
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"r" => {
                    let run = Run::read(cursor, &child)?;
                    if link.run.is_none() {
                        link.run = Some(run);
                    } else {
                        log::warn!("dropping extra run of hyperlink: {:?}", run.text());
                    }
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(link)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:hyperlink");
        out.opt_attr("r:id", self.r_id.as_deref());
        out.opt_attr("w:anchor", self.anchor.as_deref());
        out.opt_attr("w:tooltip", self.tooltip.as_deref());
        out.on_off_attr("w:history", self.history);
        match &self.run {
            None => out.close_empty(),
            Some(run) => {
                out.close();
                run.write(out)?;
                out.end("w:hyperlink");
            },
        }
        Ok(())
    }
}
