/// Content control support for Word documents.
///
/// Content controls (structured document tags, `w:sdt`) are bounded regions
/// of a document with a declared interaction type (plain text, date picker,
/// check box, ...) and metadata such as a tag and a lock. The type is one
/// [`SdtType`] variant; the content has the same shape as block or inline
/// content depending on where the control sits.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::enums::SdtLock;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::run::Run;
use crate::ooxml::docx::table::Table;
use crate::ooxml::docx::types::{OnOff, Toggle};
use crate::ooxml::error::Result;

/// One entry of a combo box or drop-down list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    pub display_text: Option<String>,
    pub value: Option<String>,
}

impl ListItem {
    pub fn new(display_text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display_text: Some(display_text.into()),
            value: Some(value.into()),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut item = ListItem::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"displayText" => item.display_text = Some(attr_string(&attr)),
                b"value" => item.value = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(item)
    }

    fn write(&self, out: &mut XmlWriter) {
        out.open("w:listItem");
        out.opt_attr("w:displayText", self.display_text.as_deref());
        out.opt_attr("w:value", self.value.as_deref());
        out.close_empty();
    }
}

/// Symbol shown for a check box state (`w14:checkedState`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxSymbol {
    pub font: Option<String>,
    /// Character code in hex, e.g. `2612`
    pub val: Option<String>,
}

impl CheckboxSymbol {
    pub fn new(font: &str, val: &str) -> Self {
        Self {
            font: Some(font.to_string()),
            val: Some(val.to_string()),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut symbol = CheckboxSymbol::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"font" => symbol.font = Some(attr_string(&attr)),
                b"val" => symbol.val = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(symbol)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.opt_attr("w14:font", self.font.as_deref());
        out.opt_attr("w14:val", self.val.as_deref());
        out.close_empty();
    }
}

/// Interaction type of a content control. At most one per control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdtType {
    /// Plain text
    Text { multi_line: Option<OnOff> },
    RichText,
    Picture,
    ComboBox {
        last_value: Option<String>,
        items: Vec<ListItem>,
    },
    DropDownList {
        last_value: Option<String>,
        items: Vec<ListItem>,
    },
    Date {
        /// Selected date, ISO 8601
        full_date: Option<String>,
        /// Display format, e.g. `M/d/yyyy`
        format: Option<String>,
        /// Language id, e.g. `en-US`
        lid: Option<String>,
        storage_format: Option<String>,
        calendar: Option<String>,
    },
    Checkbox {
        checked: Option<OnOff>,
        checked_state: Option<CheckboxSymbol>,
        unchecked_state: Option<CheckboxSymbol>,
    },
    Group,
    Citation,
}

impl SdtType {
    /// Name of the control type as it appears in the markup.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::RichText => "richText",
            Self::Picture => "picture",
            Self::ComboBox { .. } => "comboBox",
            Self::DropDownList { .. } => "dropDownList",
            Self::Date { .. } => "date",
            Self::Checkbox { .. } => "checkbox",
            Self::Group => "group",
            Self::Citation => "citation",
        }
    }

    fn read_list(
        cursor: &mut XmlCursor<'_>,
        elem: &Elem<'_>,
    ) -> Result<(Option<String>, Vec<ListItem>)> {
        let last_value = elem
            .attributes()
            .find(|attr| attr.key.local_name().as_ref() == b"lastValue")
            .map(|attr| attr_string(&attr));
        let mut items = Vec::new();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"listItem" => items.push(ListItem::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok((last_value, items))
    }

    fn read_date(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let full_date = elem
            .attributes()
            .find(|attr| attr.key.local_name().as_ref() == b"fullDate")
            .map(|attr| attr_string(&attr));
        let (mut format, mut lid, mut storage_format, mut calendar) = (None, None, None, None);
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"dateFormat" => format = cursor.val_string(&child)?,
                b"lid" => lid = cursor.val_string(&child)?,
                b"storeMappedDataAs" | b"storageFormat" => {
                    storage_format = cursor.val_string(&child)?;
                },
                b"calendar" => calendar = cursor.val_string(&child)?,
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(Self::Date {
            full_date,
            format,
            lid,
            storage_format,
            calendar,
        })
    }

    fn read_checkbox(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let (mut checked, mut checked_state, mut unchecked_state) = (None, None, None);
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"checked" => checked = cursor.val_with(&child, OnOff::from_xml)?,
                b"checkedState" => checked_state = Some(CheckboxSymbol::read(cursor, &child)?),
                b"uncheckedState" => {
                    unchecked_state = Some(CheckboxSymbol::read(cursor, &child)?)
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(Self::Checkbox {
            checked,
            checked_state,
            unchecked_state,
        })
    }

    fn write(&self, out: &mut XmlWriter) {
        match self {
            Self::Text { multi_line } => {
                out.open("w:text");
                out.on_off_attr("w:multiLine", *multi_line);
                out.close_empty();
            },
            Self::RichText => out.raw("<w:richText/>"),
            Self::Picture => out.raw("<w:picture/>"),
            Self::ComboBox { last_value, items } => {
                write_list("w:comboBox", last_value.as_deref(), items, out)
            },
            Self::DropDownList { last_value, items } => {
                write_list("w:dropDownList", last_value.as_deref(), items, out)
            },
            Self::Date {
                full_date,
                format,
                lid,
                storage_format,
                calendar,
            } => {
                out.open("w:date");
                out.opt_attr("w:fullDate", full_date.as_deref());
                if format.is_none()
                    && lid.is_none()
                    && storage_format.is_none()
                    && calendar.is_none()
                {
                    out.close_empty();
                    return;
                }
                out.close();
                out.val_element("w:dateFormat", format.as_deref());
                out.val_element("w:lid", lid.as_deref());
                out.val_element("w:storeMappedDataAs", storage_format.as_deref());
                out.val_element("w:calendar", calendar.as_deref());
                out.end("w:date");
            },
            Self::Checkbox {
                checked,
                checked_state,
                unchecked_state,
            } => {
                if checked.is_none() && checked_state.is_none() && unchecked_state.is_none() {
                    out.raw("<w14:checkbox/>");
                    return;
                }
                out.raw("<w14:checkbox>");
                if let Some(checked) = checked {
                    out.open("w14:checked");
                    out.attr("w14:val", checked.to_xml());
                    out.close_empty();
                }
                if let Some(symbol) = checked_state {
                    symbol.write_as("w14:checkedState", out);
                }
                if let Some(symbol) = unchecked_state {
                    symbol.write_as("w14:uncheckedState", out);
                }
                out.raw("</w14:checkbox>");
            },
            Self::Group => out.raw("<w:group/>"),
            Self::Citation => out.raw("<w:citation/>"),
        }
    }
}

fn write_list(name: &str, last_value: Option<&str>, items: &[ListItem], out: &mut XmlWriter) {
    out.open(name);
    out.opt_attr("w:lastValue", last_value);
    if items.is_empty() {
        out.close_empty();
        return;
    }
    out.close();
    for item in items {
        item.write(out);
    }
    out.end(name);
}

/// Placeholder of an empty content control (`w:placeholder`).
///
/// An element without `w:docPart` is kept as `doc_part: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholder {
    /// Glossary document part shown while the control is empty
    pub doc_part: Option<String>,
}

impl Placeholder {
    pub fn new(doc_part: impl Into<String>) -> Self {
        Self {
            doc_part: Some(doc_part.into()),
        }
    }
}

impl XmlElement for Placeholder {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut placeholder = Placeholder::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"docPart" => placeholder.doc_part = cursor.val_string(&child)?,
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(placeholder)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        match &self.doc_part {
            Some(part) => {
                out.raw("<w:placeholder>");
                out.val_element("w:docPart", Some(part.as_str()));
                out.raw("</w:placeholder>");
            },
            None => out.raw("<w:placeholder/>"),
        }
        Ok(())
    }
}

/// Content control properties (`w:sdtPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdtProperties {
    /// Friendly name
    pub alias: Option<String>,
    /// Programmatic identifier
    pub tag: Option<String>,
    pub id: Option<i64>,
    pub lock: Option<SdtLock>,
    pub placeholder: Option<Placeholder>,
    /// Remove the control when its content is first edited
    pub temporary: Option<Toggle>,
    pub showing_placeholder: Option<Toggle>,
    pub sdt_type: Option<SdtType>,
}

impl XmlElement for SdtProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = SdtProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"alias" => props.alias = cursor.val_string(&child)?,
                b"tag" => props.tag = cursor.val_string(&child)?,
                b"id" => {
                    props.id = cursor.val_decimal(&child)?;
                    if let Some(id) = props.id {
                        cursor.observe_sdt_id(id);
                    }
                },
                b"lock" => props.lock = cursor.val_with(&child, SdtLock::from_xml)?,
                b"placeholder" => props.placeholder = Some(Placeholder::read(cursor, &child)?),
                b"temporary" => props.temporary = Some(cursor.toggle(&child)?),
                b"showingPlcHdr" => props.showing_placeholder = Some(cursor.toggle(&child)?),
                b"text" => {
                    let multi_line = child
                        .attributes()
                        .find(|attr| attr.key.local_name().as_ref() == b"multiLine")
                        .map(|attr| cursor.on_off(&attr))
                        .transpose()?
                        .flatten();
                    cursor.skip(&child)?;
                    props.sdt_type = Some(SdtType::Text { multi_line });
                },
                b"richText" => {
                    cursor.skip(&child)?;
                    props.sdt_type = Some(SdtType::RichText);
                },
                b"picture" => {
                    cursor.skip(&child)?;
                    props.sdt_type = Some(SdtType::Picture);
                },
                b"comboBox" => {
                    let (last_value, items) = SdtType::read_list(cursor, &child)?;
                    props.sdt_type = Some(SdtType::ComboBox { last_value, items });
                },
                b"dropDownList" => {
                    let (last_value, items) = SdtType::read_list(cursor, &child)?;
                    props.sdt_type = Some(SdtType::DropDownList { last_value, items });
                },
                b"date" => props.sdt_type = Some(SdtType::read_date(cursor, &child)?),
                b"checkbox" => props.sdt_type = Some(SdtType::read_checkbox(cursor, &child)?),
                b"group" => {
                    cursor.skip(&child)?;
                    props.sdt_type = Some(SdtType::Group);
                },
                b"citation" => {
                    cursor.skip(&child)?;
                    props.sdt_type = Some(SdtType::Citation);
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == SdtProperties::default() {
            out.raw("<w:sdtPr/>");
            return Ok(());
        }
        out.raw("<w:sdtPr>");
        out.val_element("w:alias", self.alias.as_deref());
        out.val_element("w:tag", self.tag.as_deref());
        out.num_element("w:id", self.id);
        out.val_element("w:lock", self.lock.map(SdtLock::to_xml));
        if let Some(placeholder) = &self.placeholder {
            placeholder.write(out)?;
        }
        out.toggle("w:temporary", self.temporary.as_ref());
        out.toggle("w:showingPlcHdr", self.showing_placeholder.as_ref());
        if let Some(sdt_type) = &self.sdt_type {
            sdt_type.write(out);
        }
        out.raw("</w:sdtPr>");
        Ok(())
    }
}

/// Child of a content control's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdtContentChild {
    Paragraph(Paragraph),
    Run(Run),
    Table(Box<Table>),
}

/// Content of a content control (`w:sdtContent`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdtContent {
    pub children: Vec<SdtContentChild>,
}

impl XmlElement for SdtContent {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut content = SdtContent::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"p" => content
                    .children
                    .push(SdtContentChild::Paragraph(Paragraph::read(cursor, &child)?)),
                b"r" => content
                    .children
                    .push(SdtContentChild::Run(Run::read(cursor, &child)?)),
                b"tbl" => content
                    .children
                    .push(SdtContentChild::Table(Box::new(Table::read(cursor, &child)?))),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(content)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.children.is_empty() {
            out.raw("<w:sdtContent/>");
            return Ok(());
        }
        out.raw("<w:sdtContent>");
        for child in &self.children {
            match child {
                SdtContentChild::Paragraph(para) => para.write(out)?,
                SdtContentChild::Run(run) => run.write(out)?,
                SdtContentChild::Table(table) => table.write(out)?,
            }
        }
        out.raw("</w:sdtContent>");
        Ok(())
    }
}

/// A content control (`w:sdt`).
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::{ContentControl, SdtLock, SdtType};
///
/// let mut control = ContentControl::new(1, "Customer", "customer", SdtType::RichText);
/// control.set_text("ACME Corp.").set_lock(SdtLock::SdtLocked);
/// assert_eq!(control.tag(), "customer");
/// assert_eq!(control.text(), "ACME Corp.");
/// assert!(control.lock().unwrap().locks_control());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredDocumentTag {
    pub properties: Option<SdtProperties>,
    pub content: Option<SdtContent>,
}

/// Content controls are structured document tags.
pub type ContentControl = StructuredDocumentTag;

impl StructuredDocumentTag {
    /// Create a control with empty content.
    pub fn new(id: i64, alias: &str, tag: &str, sdt_type: SdtType) -> Self {
        Self {
            properties: Some(SdtProperties {
                alias: Some(alias.to_string()),
                tag: Some(tag.to_string()),
                id: Some(id),
                sdt_type: Some(sdt_type),
                ..Default::default()
            }),
            content: Some(SdtContent::default()),
        }
    }

    /// Get the control tag, or an empty string.
    pub fn tag(&self) -> &str {
        self.properties
            .as_ref()
            .and_then(|props| props.tag.as_deref())
            .unwrap_or_default()
    }

    /// Get the control alias, or an empty string.
    pub fn alias(&self) -> &str {
        self.properties
            .as_ref()
            .and_then(|props| props.alias.as_deref())
            .unwrap_or_default()
    }

    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.properties.as_ref()?.id
    }

    #[inline]
    pub fn lock(&self) -> Option<SdtLock> {
        self.properties.as_ref()?.lock
    }

    pub fn sdt_type(&self) -> Option<&SdtType> {
        self.properties.as_ref()?.sdt_type.as_ref()
    }

    /// Text of the content.
    ///
    /// Runs are concatenated; paragraphs are separated by newlines.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let Some(content) = &self.content else {
            return text;
        };
        let mut paragraphs = 0;
        for child in &content.children {
            match child {
                SdtContentChild::Run(run) => text.push_str(&run.text()),
                SdtContentChild::Paragraph(para) => {
                    if paragraphs > 0 {
                        text.push('\n');
                    }
                    paragraphs += 1;
                    text.push_str(&para.text());
                },
                SdtContentChild::Table(_) => {},
            }
        }
        text
    }

    /// Replace the content with a single run of text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        let content = self.content.get_or_insert_with(SdtContent::default);
        content.children.clear();
        content.children.push(SdtContentChild::Run(Run::with_text(text)));
        self
    }

    /// Append a run to the content.
    pub fn add_run(&mut self, run: Run) -> &mut Self {
        self.content
            .get_or_insert_with(SdtContent::default)
            .children
            .push(SdtContentChild::Run(run));
        self
    }

    pub fn set_lock(&mut self, lock: SdtLock) -> &mut Self {
        self.properties_mut().lock = Some(lock);
        self
    }

    pub fn set_temporary(&mut self, temporary: bool) -> &mut Self {
        self.properties_mut().temporary = Some(Toggle::from_bool(temporary));
        self
    }

    /// Change the interaction type, replacing the previous one.
    pub fn set_sdt_type(&mut self, sdt_type: SdtType) -> &mut Self {
        self.properties_mut().sdt_type = Some(sdt_type);
        self
    }

    /// Get the property block, creating it if needed.
    pub fn properties_mut(&mut self) -> &mut SdtProperties {
        self.properties.get_or_insert_with(SdtProperties::default)
    }
}

impl XmlElement for StructuredDocumentTag {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut sdt = StructuredDocumentTag::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"sdtPr" => sdt.properties = Some(SdtProperties::read(cursor, &child)?),
                b"sdtContent" => sdt.content = Some(SdtContent::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(sdt)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.content.is_none() {
            out.raw("<w:sdt/>");
            return Ok(());
        }
        out.raw("<w:sdt>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        if let Some(content) = &self.content {
            content.write(out)?;
        }
        out.raw("</w:sdt>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, XmlCursor, decode, encode};
    use crate::ooxml::docx::options::ReadOptions;

    fn wrap(xml: &str) -> String {
        xml.replacen("<w:sdt", &format!("<w:sdt {}", TEST_NS), 1)
    }

    fn round_trip(sdt: &StructuredDocumentTag) -> StructuredDocumentTag {
        decode::<StructuredDocumentTag>(&wrap(&encode(sdt))).unwrap()
    }

    #[test]
    fn test_every_type_round_trips() {
        let kinds = vec![
            SdtType::Text {
                multi_line: Some(OnOff::One),
            },
            SdtType::Text { multi_line: None },
            SdtType::RichText,
            SdtType::Picture,
            SdtType::ComboBox {
                last_value: Some("b".to_string()),
                items: vec![ListItem::new("A", "a"), ListItem::new("B & C", "b")],
            },
            SdtType::DropDownList {
                last_value: None,
                items: Vec::new(),
            },
            SdtType::Date {
                full_date: Some("2024-03-01T00:00:00Z".to_string()),
                format: Some("M/d/yyyy".to_string()),
                lid: Some("en-US".to_string()),
                storage_format: Some("dateTime".to_string()),
                calendar: Some("gregorian".to_string()),
            },
            SdtType::Checkbox {
                checked: Some(OnOff::One),
                checked_state: Some(CheckboxSymbol::new("MS Gothic", "2612")),
                unchecked_state: Some(CheckboxSymbol::new("MS Gothic", "2610")),
            },
            SdtType::Group,
            SdtType::Citation,
        ];
        for kind in kinds {
            let mut sdt = StructuredDocumentTag::new(7, "Alias", "tag", kind);
            sdt.set_text("value");
            assert_eq!(round_trip(&sdt), sdt);
        }
    }

    #[test]
    fn test_properties_round_trip() {
        let props = SdtProperties {
            alias: Some("Client".to_string()),
            tag: Some("client".to_string()),
            id: Some(-1_234_567),
            lock: Some(SdtLock::ContentLocked),
            placeholder: Some(Placeholder::new("DefaultPlaceholder_1081868574")),
            temporary: Some(Toggle::on()),
            showing_placeholder: Some(Toggle::on()),
            sdt_type: Some(SdtType::RichText),
        };
        let xml = encode(&props);
        assert_eq!(
            xml,
            concat!(
                r#"<w:sdtPr><w:alias w:val="Client"/><w:tag w:val="client"/><w:id w:val="-1234567"/>"#,
                r#"<w:lock w:val="contentLocked"/><w:placeholder><w:docPart w:val="DefaultPlaceholder_1081868574"/></w:placeholder>"#,
                r#"<w:temporary/><w:showingPlcHdr/><w:richText/></w:sdtPr>"#
            )
        );
        let wrapped = xml.replacen("<w:sdtPr", &format!("<w:sdtPr {}", TEST_NS), 1);
        assert_eq!(decode::<SdtProperties>(&wrapped).unwrap(), props);
    }

    #[test]
    fn test_empty_placeholder_survives() {
        let xml = format!(
            r#"<w:sdtPr {}><w:id w:val="3"/><w:placeholder/><w:text/></w:sdtPr>"#,
            TEST_NS
        );
        let props = decode::<SdtProperties>(&xml).unwrap();
        assert_eq!(props.placeholder, Some(Placeholder::default()));
        assert_eq!(
            encode(&props),
            r#"<w:sdtPr><w:id w:val="3"/><w:placeholder/><w:text/></w:sdtPr>"#
        );
    }

    #[test]
    fn test_date_storage_element_names() {
        for name in ["storeMappedDataAs", "storageFormat"] {
            let xml = format!(
                r#"<w:sdtPr {}><w:date><w:dateFormat w:val="d.M.yyyy"/><w:{} w:val="date"/></w:date></w:sdtPr>"#,
                TEST_NS, name
            );
            let props = decode::<SdtProperties>(&xml).unwrap();
            match props.sdt_type {
                Some(SdtType::Date {
                    format,
                    storage_format,
                    ..
                }) => {
                    assert_eq!(format.as_deref(), Some("d.M.yyyy"));
                    assert_eq!(storage_format.as_deref(), Some("date"));
                },
                other => panic!("unexpected type {:?}", other),
            }
        }
    }

    #[test]
    fn test_block_content() {
        let xml = wrap(concat!(
            r#"<w:sdt><w:sdtPr><w:id w:val="99"/><w:docPartObj><w:docPartGallery w:val="Table of Contents"/></w:docPartObj></w:sdtPr>"#,
            r#"<w:sdtEndPr/><w:sdtContent><w:p><w:r><w:t>First</w:t></w:r></w:p><w:tbl/><w:p><w:r><w:t>Second</w:t></w:r></w:p></w:sdtContent></w:sdt>"#
        ));
        let mut cursor = XmlCursor::new(xml.as_bytes(), ReadOptions::default());
        let root = cursor.root().unwrap();
        let sdt = StructuredDocumentTag::read(&mut cursor, &root).unwrap();
        assert_eq!(sdt.id(), Some(99));
        assert_eq!(sdt.sdt_type(), None);
        assert_eq!(sdt.text(), "First\nSecond");
        assert_eq!(cursor.into_ids().1.next(), 100);
        assert_eq!(round_trip(&sdt), sdt);
    }

    #[test]
    fn test_helpers() {
        let mut sdt = StructuredDocumentTag::default();
        assert_eq!(sdt.tag(), "");
        assert_eq!(sdt.alias(), "");
        assert_eq!(sdt.text(), "");
        sdt.set_temporary(true)
            .set_sdt_type(SdtType::Picture)
            .set_sdt_type(SdtType::Group);
        assert_eq!(sdt.sdt_type(), Some(&SdtType::Group));
        assert_eq!(sdt.sdt_type().map(SdtType::name), Some("group"));
        sdt.add_run(Run::with_text("a")).add_run(Run::with_text("b"));
        assert_eq!(sdt.text(), "ab");
        sdt.set_text("c");
        assert_eq!(sdt.text(), "c");
    }
}
