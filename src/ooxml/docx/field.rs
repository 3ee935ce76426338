/// Field markers and the field summary.
///
/// A field is physically a sequence of run content: a `begin` field
/// character, instruction text, a `separate` field character, the current
/// result, and an `end` field character. This module holds the nodes of that
/// sequence. Reassembling them is the job of the field engine.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string, is_preserve_space};
use crate::ooxml::docx::enums::{FieldCharType, InfoTextType, TextFormFieldType};
use crate::ooxml::docx::types::{OnOff, Toggle};
use crate::ooxml::error::Result;

/// A complete field found in a paragraph.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::Field;
///
/// let field = Field::new("PAGE".to_string(), Some("1".to_string()), false);
/// assert_eq!(field.field_type(), "PAGE");
///
/// let field = Field::new("DATE \\@ \"MMMM d, yyyy\"".to_string(), None, false);
/// assert_eq!(field.field_type(), "DATE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The trimmed instruction (e.g., "PAGE", "MERGEFIELD Name")
    instruction: String,
    /// The current result text
    result: Option<String>,
    /// Whether the begin marker flags the field for recalculation
    dirty: bool,
}

impl Field {
    pub fn new(instruction: String, result: Option<String>, dirty: bool) -> Self {
        Self {
            instruction,
            result,
            dirty,
        }
    }

    /// Get the field instruction.
    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Get the result text, if the field shows any.
    #[inline]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The first word of the instruction, which names the field type.
    pub fn field_type(&self) -> &str {
        self.instruction
            .split_whitespace()
            .next()
            .unwrap_or(&self.instruction)
    }
}

/// Field character (`w:fldChar`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldChar {
    pub field_char_type: Option<FieldCharType>,
    pub dirty: Option<OnOff>,
    pub lock: Option<OnOff>,
    pub ff_data: Option<FFData>,
    pub num_id: Option<i64>,
}

impl FieldChar {
    pub fn new(field_char_type: FieldCharType) -> Self {
        Self {
            field_char_type: Some(field_char_type),
            ..Default::default()
        }
    }
}

impl XmlElement for FieldChar {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut fc = FieldChar::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"fldCharType" => {
                    fc.field_char_type = cursor.parse_value(&attr, FieldCharType::from_xml)?
                },
                b"dirty" => fc.dirty = cursor.on_off(&attr)?,
                b"fldLock" | b"lock" => fc.lock = cursor.on_off(&attr)?,
                _ => {},
            }
        }
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"ffData" => fc.ff_data = Some(FFData::read(cursor, &child)?),
                b"numId" => fc.num_id = cursor.val_decimal(&child)?,
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(fc)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:fldChar");
        out.opt_attr("w:fldCharType", self.field_char_type.map(FieldCharType::to_xml));
        out.on_off_attr("w:dirty", self.dirty);
        out.on_off_attr("w:fldLock", self.lock);
        if self.ff_data.is_none() && self.num_id.is_none() {
            out.close_empty();
            return Ok(());
        }
        out.close();
        if let Some(ff_data) = &self.ff_data {
            ff_data.write(out)?;
        }
        out.num_element("w:numId", self.num_id);
        out.end("w:fldChar");
        Ok(())
    }
}

/// Field instruction text (`w:instrText`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCode {
    pub text: String,
    pub preserve_space: bool,
}

impl FieldCode {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let preserve_space = crate::ooxml::docx::run::has_whitespace_edges(&text);
        Self {
            text,
            preserve_space,
        }
    }
}

impl XmlElement for FieldCode {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let preserve_space = elem.attributes().any(|attr| is_preserve_space(&attr));
        let text = cursor.read_text(elem)?;
        Ok(FieldCode {
            text,
            preserve_space,
        })
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.text_element("w:instrText", &self.text, self.preserve_space);
        Ok(())
    }
}

/// Help or status text of a legacy form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoText {
    pub text_type: Option<InfoTextType>,
    pub val: Option<String>,
}

impl InfoText {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut info = InfoText::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"type" => info.text_type = cursor.parse_value(&attr, InfoTextType::from_xml)?,
                b"val" => info.val = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(info)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.opt_attr("w:type", self.text_type.map(InfoTextType::to_xml));
        out.opt_attr("w:val", self.val.as_deref());
        out.close_empty();
    }
}

/// Text input properties (`w:textInput`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FFTextInput {
    pub input_type: Option<TextFormFieldType>,
    pub default: Option<String>,
    pub max_length: Option<i64>,
    pub format: Option<String>,
}

impl XmlElement for FFTextInput {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut input = FFTextInput::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"type" => input.input_type = cursor.val_with(&child, TextFormFieldType::from_xml)?,
                b"default" => input.default = cursor.val_string(&child)?,
                b"maxLength" => input.max_length = cursor.val_decimal(&child)?,
                b"format" => input.format = cursor.val_string(&child)?,
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(input)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == FFTextInput::default() {
            out.raw("<w:textInput/>");
            return Ok(());
        }
        out.raw("<w:textInput>");
        out.val_element("w:type", self.input_type.map(TextFormFieldType::to_xml));
        out.val_element("w:default", self.default.as_deref());
        out.num_element("w:maxLength", self.max_length);
        out.val_element("w:format", self.format.as_deref());
        out.raw("</w:textInput>");
        Ok(())
    }
}

/// Check box properties (`w:checkBox`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FFCheckBox {
    /// Size in half-points
    pub size: Option<i64>,
    pub size_auto: Option<Toggle>,
    pub default: Option<Toggle>,
    pub checked: Option<Toggle>,
}

impl XmlElement for FFCheckBox {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut check_box = FFCheckBox::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"size" => check_box.size = cursor.val_decimal(&child)?,
                b"sizeAuto" => check_box.size_auto = Some(cursor.toggle(&child)?),
                b"default" => check_box.default = Some(cursor.toggle(&child)?),
                b"checked" => check_box.checked = Some(cursor.toggle(&child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(check_box)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == FFCheckBox::default() {
            out.raw("<w:checkBox/>");
            return Ok(());
        }
        out.raw("<w:checkBox>");
        out.num_element("w:size", self.size);
        out.toggle("w:sizeAuto", self.size_auto.as_ref());
        out.toggle("w:default", self.default.as_ref());
        out.toggle("w:checked", self.checked.as_ref());
        out.raw("</w:checkBox>");
        Ok(())
    }
}

/// Drop-down list properties (`w:ddList`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FFDropDownList {
    /// Index of the selected entry
    pub result: Option<i64>,
    pub default: Option<i64>,
    pub entries: Vec<String>,
}

impl XmlElement for FFDropDownList {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut list = FFDropDownList::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"result" => list.result = cursor.val_decimal(&child)?,
                b"default" => list.default = cursor.val_decimal(&child)?,
                b"listEntry" => {
                    if let Some(entry) = cursor.val_string(&child)? {
                        list.entries.push(entry);
                    }
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(list)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == FFDropDownList::default() {
            out.raw("<w:ddList/>");
            return Ok(());
        }
        out.raw("<w:ddList>");
        out.num_element("w:result", self.result);
        out.num_element("w:default", self.default);
        for entry in &self.entries {
            out.val_element("w:listEntry", Some(entry));
        }
        out.raw("</w:ddList>");
        Ok(())
    }
}

/// Legacy form field data (`w:ffData`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FFData {
    pub name: Option<String>,
    pub enabled: Option<Toggle>,
    pub calc_on_exit: Option<Toggle>,
    pub status_text: Option<InfoText>,
    pub help_text: Option<InfoText>,
    pub entry_macro: Option<String>,
    pub exit_macro: Option<String>,
    pub kind: Option<FormFieldKind>,
}

/// Type-specific data of a legacy form field. Exactly one per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFieldKind {
    /// `w:textInput`
    TextInput(FFTextInput),
    /// `w:checkBox`
    CheckBox(FFCheckBox),
    /// `w:ddList`
    DropDownList(FFDropDownList),
}

impl FormFieldKind {
    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        match self {
            Self::TextInput(input) => input.write(out),
            Self::CheckBox(check_box) => check_box.write(out),
            Self::DropDownList(list) => list.write(out),
        }
    }
}

impl XmlElement for FFData {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut data = FFData::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"name" => data.name = cursor.val_string(&child)?,
                b"enabled" => data.enabled = Some(cursor.toggle(&child)?),
                b"calcOnExit" => data.calc_on_exit = Some(cursor.toggle(&child)?),
                b"statusText" => data.status_text = Some(InfoText::read(cursor, &child)?),
                b"helpText" => data.help_text = Some(InfoText::read(cursor, &child)?),
                b"entryMacro" => data.entry_macro = cursor.val_string(&child)?,
                b"exitMacro" => data.exit_macro = cursor.val_string(&child)?,
                b"textInput" => {
                    data.kind = Some(FormFieldKind::TextInput(FFTextInput::read(cursor, &child)?));
                },
                b"checkBox" => {
                    data.kind = Some(FormFieldKind::CheckBox(FFCheckBox::read(cursor, &child)?));
                },
                b"ddList" => {
                    let list = FFDropDownList::read(cursor, &child)?;
                    data.kind = Some(FormFieldKind::DropDownList(list));
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(data)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == FFData::default() {
            out.raw("<w:ffData/>");
            return Ok(());
        }
        out.raw("<w:ffData>");
        out.val_element("w:name", self.name.as_deref());
        out.toggle("w:enabled", self.enabled.as_ref());
        out.toggle("w:calcOnExit", self.calc_on_exit.as_ref());
        out.val_element("w:entryMacro", self.entry_macro.as_deref());
        out.val_element("w:exitMacro", self.exit_macro.as_deref());
        if let Some(help) = &self.help_text {
            help.write_as("w:helpText", out);
        }
        if let Some(status) = &self.status_text {
            status.write_as("w:statusText", out);
        }
        if let Some(kind) = &self.kind {
            kind.write(out)?;
        }
        out.raw("</w:ffData>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    fn wrap(xml: &str, tag: &str) -> String {
        xml.replacen(tag, &format!("{} {}", tag, TEST_NS), 1)
    }

    #[test]
    fn test_field_summary() {
        let field = Field::new(
            "REF bookmark1 \\h".to_string(),
            Some("See Section 1".to_string()),
            true,
        );
        assert_eq!(field.field_type(), "REF");
        assert_eq!(field.result(), Some("See Section 1"));
        assert!(field.is_dirty());
    }

    #[test]
    fn test_field_char_round_trip() {
        let begin = FieldChar::new(FieldCharType::Begin);
        assert_eq!(encode(&begin), r#"<w:fldChar w:fldCharType="begin"/>"#);

        let full = FieldChar {
            field_char_type: Some(FieldCharType::Begin),
            dirty: Some(OnOff::True),
            lock: Some(OnOff::Zero),
            ff_data: Some(FFData {
                name: Some("Text1".to_string()),
                enabled: Some(Toggle::on()),
                calc_on_exit: Some(Toggle::from_bool(false)),
                status_text: Some(InfoText {
                    text_type: Some(InfoTextType::Text),
                    val: Some("Type here".to_string()),
                }),
                help_text: None,
                entry_macro: Some("OnEnter".to_string()),
                exit_macro: None,
                kind: Some(FormFieldKind::TextInput(FFTextInput {
                    input_type: Some(TextFormFieldType::Number),
                    default: Some("0".to_string()),
                    max_length: Some(8),
                    format: Some("0.00".to_string()),
                })),
            }),
            num_id: Some(3),
        };
        let xml = encode(&full);
        assert!(xml.starts_with(
            r#"<w:fldChar w:fldCharType="begin" w:dirty="true" w:fldLock="0"><w:ffData><w:name w:val="Text1"/><w:enabled/>"#
        ));
        assert!(xml.ends_with(r#"</w:ffData><w:numId w:val="3"/></w:fldChar>"#));
        assert_eq!(decode::<FieldChar>(&wrap(&xml, "<w:fldChar")).unwrap(), full);
    }

    #[test]
    fn test_form_field_kinds() {
        let kinds = vec![
            FormFieldKind::CheckBox(FFCheckBox {
                size: Some(20),
                size_auto: None,
                default: Some(Toggle::from_bool(false)),
                checked: Some(Toggle::on()),
            }),
            FormFieldKind::DropDownList(FFDropDownList {
                result: Some(1),
                default: Some(0),
                entries: vec!["Red".to_string(), "Green".to_string()],
            }),
            FormFieldKind::TextInput(FFTextInput::default()),
        ];
        for kind in kinds {
            let data = FFData {
                name: Some("Field".to_string()),
                kind: Some(kind),
                ..Default::default()
            };
            let xml = encode(&data);
            assert_eq!(decode::<FFData>(&wrap(&xml, "<w:ffData")).unwrap(), data);
        }

        // A later choice replaces an earlier one.
        let xml = wrap(
            r#"<w:ffData><w:checkBox><w:sizeAuto/></w:checkBox><w:textInput/></w:ffData>"#,
            "<w:ffData",
        );
        let data = decode::<FFData>(&xml).unwrap();
        assert_eq!(data.kind, Some(FormFieldKind::TextInput(FFTextInput::default())));
        assert_eq!(encode(&data), "<w:ffData><w:textInput/></w:ffData>");
    }

    #[test]
    fn test_field_char_none_set() {
        let empty = FieldChar::default();
        assert_eq!(encode(&empty), "<w:fldChar/>");
        assert_eq!(decode::<FieldChar>(&wrap("<w:fldChar/>", "<w:fldChar")).unwrap(), empty);
    }

    #[test]
    fn test_invalid_field_char_type_is_dropped() {
        let xml = wrap(r#"<w:fldChar w:fldCharType="middle"/>"#, "<w:fldChar");
        assert_eq!(decode::<FieldChar>(&xml).unwrap().field_char_type, None);
    }

    #[test]
    fn test_instr_text_keeps_spacing() {
        let xml = wrap(
            r#"<w:instrText xml:space="preserve"> MERGEFIELD Name </w:instrText>"#,
            "<w:instrText",
        );
        let code = decode::<FieldCode>(&xml).unwrap();
        assert_eq!(code.text, " MERGEFIELD Name ");
        assert!(code.preserve_space);
        assert_eq!(
            encode(&code),
            r#"<w:instrText xml:space="preserve"> MERGEFIELD Name </w:instrText>"#
        );
        assert_eq!(FieldCode::new(" PAGE "), code_with(" PAGE "));
    }

    fn code_with(text: &str) -> FieldCode {
        FieldCode {
            text: text.to_string(),
            preserve_space: true,
        }
    }
}
