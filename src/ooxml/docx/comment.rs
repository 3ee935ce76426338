/// Comment range markers.
///
/// The comments themselves live in their own part. The document part only
/// marks the commented region with a start and end marker sharing the
/// comment's id.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter};
use crate::ooxml::docx::enums::DisplacedByCustomXml;
use crate::ooxml::error::Result;

/// Start of a commented region (`w:commentRangeStart`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRangeStart {
    pub id: Option<i64>,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
}

/// End of a commented region (`w:commentRangeEnd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRangeEnd {
    pub id: Option<i64>,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
}

fn read_marker(
    cursor: &mut XmlCursor<'_>,
    elem: &Elem<'_>,
) -> Result<(Option<i64>, Option<DisplacedByCustomXml>)> {
    let (mut id, mut displaced) = (None, None);
    for attr in elem.attributes() {
        match attr.key.local_name().as_ref() {
            b"id" => id = cursor.decimal(&attr)?,
            b"displacedByCustomXml" => {
                displaced = cursor.parse_value(&attr, DisplacedByCustomXml::from_xml)?
            },
            _ => {},
        }
    }
    cursor.skip(elem)?;
    Ok((id, displaced))
}

fn write_marker(
    name: &str,
    id: Option<i64>,
    displaced: Option<DisplacedByCustomXml>,
    out: &mut XmlWriter,
) {
    out.open(name);
    out.num_attr("w:id", id);
    out.opt_attr(
        "w:displacedByCustomXml",
        displaced.map(DisplacedByCustomXml::to_xml),
    );
    out.close_empty();
}

impl CommentRangeStart {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            displaced_by_custom_xml: None,
        }
    }
}

impl CommentRangeEnd {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            displaced_by_custom_xml: None,
        }
    }
}

impl XmlElement for CommentRangeStart {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let (id, displaced_by_custom_xml) = read_marker(cursor, elem)?;
        Ok(Self {
            id,
            displaced_by_custom_xml,
        })
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        write_marker("w:commentRangeStart", self.id, self.displaced_by_custom_xml, out);
        Ok(())
    }
}

impl XmlElement for CommentRangeEnd {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let (id, displaced_by_custom_xml) = read_marker(cursor, elem)?;
        Ok(Self {
            id,
            displaced_by_custom_xml,
        })
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        write_marker("w:commentRangeEnd", self.id, self.displaced_by_custom_xml, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    #[test]
    fn test_comment_range_round_trip() {
        let start = CommentRangeStart {
            id: Some(12),
            displaced_by_custom_xml: Some(DisplacedByCustomXml::Next),
        };
        let xml = encode(&start);
        assert_eq!(
            xml,
            r#"<w:commentRangeStart w:id="12" w:displacedByCustomXml="next"/>"#
        );
        let wrapped = xml.replacen(
            "<w:commentRangeStart",
            &format!("<w:commentRangeStart {}", TEST_NS),
            1,
        );
        assert_eq!(decode::<CommentRangeStart>(&wrapped).unwrap(), start);

        let end = CommentRangeEnd::new(12);
        assert_eq!(encode(&end), r#"<w:commentRangeEnd w:id="12"/>"#);
    }

    #[test]
    fn test_comment_range_bad_id() {
        let xml = format!(r#"<w:commentRangeEnd {} w:id="x1"/>"#, TEST_NS);
        assert_eq!(
            decode::<CommentRangeEnd>(&xml).unwrap(),
            CommentRangeEnd::default()
        );
    }
}
