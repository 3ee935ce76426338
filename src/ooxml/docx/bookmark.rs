/// Bookmark markers.
///
/// Bookmarks mark locations or regions in a document. A region is opened by
/// `w:bookmarkStart` and closed by the `w:bookmarkEnd` carrying the same id;
/// the two markers are siblings in the paragraph content, not a container.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::enums::DisplacedByCustomXml;
use crate::ooxml::error::Result;

/// Start of a bookmark (`w:bookmarkStart`).
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::BookmarkStart;
///
/// let bookmark = BookmarkStart::new(0, "_Toc1");
/// assert_eq!(bookmark.name.as_deref(), Some("_Toc1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkStart {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// First table column covered by the bookmark
    pub col_first: Option<i64>,
    pub col_last: Option<i64>,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
}

impl BookmarkStart {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl XmlElement for BookmarkStart {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut bookmark = BookmarkStart::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"id" => bookmark.id = cursor.decimal(&attr)?,
                b"name" => bookmark.name = Some(attr_string(&attr)),
                b"colFirst" => bookmark.col_first = cursor.decimal(&attr)?,
                b"colLast" => bookmark.col_last = cursor.decimal(&attr)?,
                b"displacedByCustomXml" => {
                    bookmark.displaced_by_custom_xml =
                        cursor.parse_value(&attr, DisplacedByCustomXml::from_xml)?
                },
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(bookmark)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:bookmarkStart");
        out.num_attr("w:id", self.id);
        out.opt_attr("w:name", self.name.as_deref());
        out.num_attr("w:colFirst", self.col_first);
        out.num_attr("w:colLast", self.col_last);
        out.opt_attr(
            "w:displacedByCustomXml",
            self.displaced_by_custom_xml.map(DisplacedByCustomXml::to_xml),
        );
        out.close_empty();
        Ok(())
    }
}

/// End of a bookmark (`w:bookmarkEnd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkEnd {
    pub id: Option<i64>,
    pub displaced_by_custom_xml: Option<DisplacedByCustomXml>,
}

impl BookmarkEnd {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            displaced_by_custom_xml: None,
        }
    }
}

impl XmlElement for BookmarkEnd {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut bookmark = BookmarkEnd::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"id" => bookmark.id = cursor.decimal(&attr)?,
                b"displacedByCustomXml" => {
                    bookmark.displaced_by_custom_xml =
                        cursor.parse_value(&attr, DisplacedByCustomXml::from_xml)?
                },
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(bookmark)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:bookmarkEnd");
        out.num_attr("w:id", self.id);
        out.opt_attr(
            "w:displacedByCustomXml",
            self.displaced_by_custom_xml.map(DisplacedByCustomXml::to_xml),
        );
        out.close_empty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    #[test]
    fn test_bookmark_start_round_trip() {
        let full = BookmarkStart {
            id: Some(7),
            name: Some("Totals".to_string()),
            col_first: Some(0),
            col_last: Some(2),
            displaced_by_custom_xml: Some(DisplacedByCustomXml::Prev),
        };
        let xml = encode(&full);
        assert_eq!(
            xml,
            r#"<w:bookmarkStart w:id="7" w:name="Totals" w:colFirst="0" w:colLast="2" w:displacedByCustomXml="prev"/>"#
        );
        let wrapped = xml.replacen("<w:bookmarkStart", &format!("<w:bookmarkStart {}", TEST_NS), 1);
        assert_eq!(decode::<BookmarkStart>(&wrapped).unwrap(), full);

        let one = BookmarkStart::new(1, "_GoBack");
        assert_eq!(encode(&one), r#"<w:bookmarkStart w:id="1" w:name="_GoBack"/>"#);
    }

    #[test]
    fn test_bookmark_end_ignores_content() {
        let xml = format!(
            r#"<w:bookmarkEnd {} w:displacedByCustomXml="sideways" w:id="3"><w:junk/>text</w:bookmarkEnd>"#,
            TEST_NS
        );
        let end = decode::<BookmarkEnd>(&xml).unwrap();
        assert_eq!(end, BookmarkEnd::new(3));
        assert_eq!(encode(&BookmarkEnd::default()), "<w:bookmarkEnd/>");
    }
}
