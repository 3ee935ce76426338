/// Runs and their leaf content.
///
/// A run (`w:r`) is the smallest unit of formatted content in a paragraph. It
/// owns an optional property block and an ordered list of leaf nodes. Field
/// characters and instruction text live here too, which is why a field can be
/// scattered over several runs.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string, is_preserve_space};
use crate::ooxml::docx::drawing::Drawing;
use crate::ooxml::docx::enums::{BreakClear, BreakType, FieldCharType, VerticalAlignRun};
use crate::ooxml::docx::field::{FieldChar, FieldCode};
use crate::ooxml::docx::format::Color;
use crate::ooxml::docx::types::Toggle;
use crate::ooxml::error::Result;

/// Literal text (`w:t`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    /// Carries `xml:space="preserve"`
    pub preserve_space: bool,
}

impl Text {
    /// Create a text node, marking it preserved when its edges are whitespace.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let preserve_space = has_whitespace_edges(&text);
        Self {
            text,
            preserve_space,
        }
    }

    /// Replace the text, keeping the node's preserve marker in step.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.preserve_space |= has_whitespace_edges(&self.text);
    }
}

pub(crate) fn has_whitespace_edges(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

impl XmlElement for Text {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let preserve_space = elem.attributes().any(|attr| is_preserve_space(&attr));
        let text = cursor.read_text(elem)?;
        Ok(Text {
            text,
            preserve_space,
        })
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.text_element("w:t", &self.text, self.preserve_space);
        Ok(())
    }
}

/// Break (`w:br`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Break {
    pub break_type: Option<BreakType>,
    pub clear: Option<BreakClear>,
}

impl Break {
    pub fn new(break_type: BreakType) -> Self {
        Self {
            break_type: Some(break_type),
            clear: None,
        }
    }
}

impl XmlElement for Break {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut br = Break::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"type" => br.break_type = cursor.parse_value(&attr, BreakType::from_xml)?,
                b"clear" => br.clear = cursor.parse_value(&attr, BreakClear::from_xml)?,
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(br)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:br");
        out.opt_attr("w:type", self.break_type.map(BreakType::to_xml));
        out.opt_attr("w:clear", self.clear.map(BreakClear::to_xml));
        out.close_empty();
        Ok(())
    }
}

/// Fonts of a run (`w:rFonts`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFonts {
    pub ascii: Option<String>,
    pub h_ansi: Option<String>,
    pub east_asia: Option<String>,
    pub cs: Option<String>,
}

impl XmlElement for RunFonts {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut fonts = RunFonts::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"ascii" => fonts.ascii = Some(attr_string(&attr)),
                b"hAnsi" => fonts.h_ansi = Some(attr_string(&attr)),
                b"eastAsia" => fonts.east_asia = Some(attr_string(&attr)),
                b"cs" => fonts.cs = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(fonts)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:rFonts");
        out.opt_attr("w:ascii", self.ascii.as_deref());
        out.opt_attr("w:hAnsi", self.h_ansi.as_deref());
        out.opt_attr("w:eastAsia", self.east_asia.as_deref());
        out.opt_attr("w:cs", self.cs.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Underline (`w:u`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Underline {
    /// Line style, e.g. `single`, `double`, `wave`
    pub val: Option<String>,
    pub color: Option<String>,
}

impl XmlElement for Underline {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut underline = Underline::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"val" => underline.val = Some(attr_string(&attr)),
                b"color" => underline.color = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(underline)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:u");
        out.opt_attr("w:val", self.val.as_deref());
        out.opt_attr("w:color", self.color.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Run properties (`w:rPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProperties {
    /// Character style id
    pub style: Option<String>,
    pub fonts: Option<RunFonts>,
    pub bold: Option<Toggle>,
    pub italic: Option<Toggle>,
    pub strike: Option<Toggle>,
    pub color: Option<Color>,
    /// Font size in half-points
    pub size: Option<i64>,
    pub highlight: Option<String>,
    pub underline: Option<Underline>,
    pub vert_align: Option<VerticalAlignRun>,
}

impl XmlElement for RunProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = RunProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"rStyle" => props.style = cursor.val_string(&child)?,
                b"rFonts" => props.fonts = Some(RunFonts::read(cursor, &child)?),
                b"b" => props.bold = Some(cursor.toggle(&child)?),
                b"i" => props.italic = Some(cursor.toggle(&child)?),
                b"strike" => props.strike = Some(cursor.toggle(&child)?),
                b"color" => props.color = Some(Color::read(cursor, &child)?),
                b"sz" => props.size = cursor.val_decimal(&child)?,
                b"highlight" => props.highlight = cursor.val_string(&child)?,
                b"u" => props.underline = Some(Underline::read(cursor, &child)?),
                b"vertAlign" => {
                    props.vert_align = cursor.val_with(&child, VerticalAlignRun::from_xml)?
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == RunProperties::default() {
            out.raw("<w:rPr/>");
            return Ok(());
        }
        out.raw("<w:rPr>");
        out.val_element("w:rStyle", self.style.as_deref());
        if let Some(fonts) = &self.fonts {
            fonts.write(out)?;
        }
        out.toggle("w:b", self.bold.as_ref());
        out.toggle("w:i", self.italic.as_ref());
        out.toggle("w:strike", self.strike.as_ref());
        if let Some(color) = &self.color {
            color.write(out)?;
        }
        out.num_element("w:sz", self.size);
        out.val_element("w:highlight", self.highlight.as_deref());
        if let Some(underline) = &self.underline {
            underline.write(out)?;
        }
        out.val_element("w:vertAlign", self.vert_align.map(VerticalAlignRun::to_xml));
        out.raw("</w:rPr>");
        Ok(())
    }
}

/// One leaf of a run. Exactly one kind per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunChild {
    Text(Text),
    FieldChar(FieldChar),
    InstrText(FieldCode),
    Break(Break),
    Drawing(Drawing),
}

impl RunChild {
    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        match self {
            RunChild::Text(text) => text.write(out),
            RunChild::FieldChar(field_char) => field_char.write(out),
            RunChild::InstrText(code) => code.write(out),
            RunChild::Break(br) => br.write(out),
            RunChild::Drawing(drawing) => drawing.write(out),
        }
    }
}

/// A run (`w:r`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub properties: Option<RunProperties>,
    pub children: Vec<RunChild>,
}

impl Run {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a run holding a single text node.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            properties: None,
            children: vec![RunChild::Text(Text::new(text))],
        }
    }

    /// Concatenated text of the run's `w:t` children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            if let RunChild::Text(t) = child {
                text.push_str(&t.text);
            }
        }
        text
    }

    /// Append a text node.
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(RunChild::Text(Text::new(text)));
        self
    }

    /// Append a break.
    pub fn add_break(&mut self, break_type: BreakType) -> &mut Self {
        self.children.push(RunChild::Break(Break::new(break_type)));
        self
    }

    /// Append a field character.
    pub fn add_field_char(&mut self, kind: FieldCharType) -> &mut Self {
        self.children.push(RunChild::FieldChar(FieldChar::new(kind)));
        self
    }

    /// Append field instruction text.
    pub fn add_instr_text(&mut self, code: impl Into<String>) -> &mut Self {
        self.children.push(RunChild::InstrText(FieldCode::new(code)));
        self
    }

    /// Append a drawing.
    pub fn add_drawing(&mut self, drawing: Drawing) -> &mut Self {
        self.children.push(RunChild::Drawing(drawing));
        self
    }

    /// Get the property block, creating it if needed.
    pub fn properties_mut(&mut self) -> &mut RunProperties {
        self.properties.get_or_insert_with(RunProperties::default)
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties_mut().bold = Some(Toggle::from_bool(bold));
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties_mut().italic = Some(Toggle::from_bool(italic));
        self
    }

    /// Strike the text through.
    pub fn strike(&mut self, strike: bool) -> &mut Self {
        self.properties_mut().strike = Some(Toggle::from_bool(strike));
        self
    }

    /// Set underline style (e.g., "single", "double").
    pub fn underline(&mut self, style: &str) -> &mut Self {
        self.properties_mut().underline = Some(Underline {
            val: Some(style.to_string()),
            color: None,
        });
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn size(&mut self, half_points: i64) -> &mut Self {
        self.properties_mut().size = Some(half_points);
        self
    }

    /// Set text color using hex RGB (e.g., "FF0000" for red).
    pub fn color(&mut self, rgb: &str) -> &mut Self {
        self.properties_mut().color = Some(Color::rgb(rgb));
        self
    }

    /// Set text highlight color.
    pub fn highlight(&mut self, color: &str) -> &mut Self {
        self.properties_mut().highlight = Some(color.to_string());
        self
    }

    /// Set the font for every script.
    pub fn font(&mut self, name: &str) -> &mut Self {
        self.properties_mut().fonts = Some(RunFonts {
            ascii: Some(name.to_string()),
            h_ansi: Some(name.to_string()),
            east_asia: Some(name.to_string()),
            cs: Some(name.to_string()),
        });
        self
    }

    /// Apply a character style.
    pub fn style(&mut self, style_id: &str) -> &mut Self {
        self.properties_mut().style = Some(style_id.to_string());
        self
    }
}

impl XmlElement for Run {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut run = Run::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"rPr" => run.properties = Some(RunProperties::read(cursor, &child)?),
                b"t" => run.children.push(RunChild::Text(Text::read(cursor, &child)?)),
                b"fldChar" => run
                    .children
                    .push(RunChild::FieldChar(FieldChar::read(cursor, &child)?)),
                b"instrText" => run
                    .children
                    .push(RunChild::InstrText(FieldCode::read(cursor, &child)?)),
                b"br" => run.children.push(RunChild::Break(Break::read(cursor, &child)?)),
                b"drawing" => run
                    .children
                    .push(RunChild::Drawing(Drawing::read(cursor, &child)?)),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(run)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.children.is_empty() {
            out.raw("<w:r/>");
            return Ok(());
        }
        out.raw("<w:r>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        for child in &self.children {
            child.write(out)?;
        }
        out.raw("</w:r>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};
    use crate::ooxml::docx::types::OnOff;

    fn wrap(xml: &str) -> String {
        xml.replacen("<w:r", &format!("<w:r {}", TEST_NS), 1)
    }

    #[test]
    fn test_run_round_trip_all_properties() {
        let mut run = Run::with_text(" padded ");
        run.bold(true)
            .italic(false)
            .strike(true)
            .underline("double")
            .size(28)
            .color("1F497D")
            .highlight("yellow")
            .font("Calibri")
            .style("Emphasis");
        run.properties_mut().vert_align = Some(VerticalAlignRun::Superscript);
        run.add_break(BreakType::Page);

        let xml = encode(&run);
        assert!(xml.starts_with(
            r#"<w:r><w:rPr><w:rStyle w:val="Emphasis"/><w:rFonts w:ascii="Calibri""#
        ));
        assert!(xml.contains(r#"<w:b/><w:i w:val="false"/><w:strike/><w:color w:val="1F497D"/><w:sz w:val="28"/>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve"> padded </w:t><w:br w:type="page"/>"#));

        assert_eq!(decode::<Run>(&wrap(&xml)).unwrap(), run);
    }

    #[test]
    fn test_run_round_trip_single_and_no_fields() {
        let mut run = Run::new();
        run.size(20);
        let xml = encode(&run);
        assert_eq!(xml, r#"<w:r><w:rPr><w:sz w:val="20"/></w:rPr></w:r>"#);
        assert_eq!(decode::<Run>(&wrap(&xml)).unwrap(), run);

        let empty = Run::new();
        assert_eq!(encode(&empty), "<w:r/>");
        assert_eq!(decode::<Run>(&wrap("<w:r/>")).unwrap(), empty);
    }

    #[test]
    fn test_unknown_run_content_keeps_siblings() {
        let xml = wrap(
            r#"<w:r><w:t>one</w:t><w:tab/><w:sym w:font="Symbol" w:char="F0B7"/><w:t>two</w:t><w:lastRenderedPageBreak/><w:br/></w:r>"#,
        );
        let run = decode::<Run>(&xml).unwrap();
        assert_eq!(run.children.len(), 3);
        assert_eq!(run.text(), "onetwo");
        assert!(matches!(run.children[2], RunChild::Break(_)));
    }

    #[test]
    fn test_on_off_literal_tokens_survive() {
        let xml = wrap(r#"<w:r><w:rPr><w:b w:val="on"/><w:i w:val="0"/></w:rPr></w:r>"#);
        let run = decode::<Run>(&xml).unwrap();
        let props = run.properties.as_ref().unwrap();
        assert_eq!(props.bold.unwrap().val, Some(OnOff::On));
        assert!(!props.italic.unwrap().is_on());
        assert!(encode(&run).contains(r#"<w:b w:val="on"/><w:i w:val="0"/>"#));
    }

    #[test]
    fn test_text_escaping() {
        let run = Run::with_text("a < b && c > \"d\"");
        let xml = encode(&run);
        assert!(xml.contains("<w:t>a &lt; b &amp;&amp; c &gt; &quot;d&quot;</w:t>"));
        assert_eq!(decode::<Run>(&wrap(&xml)).unwrap().text(), "a < b && c > \"d\"");
    }

    #[test]
    fn test_decoded_preserve_marker_is_kept() {
        let xml = wrap(r#"<w:r><w:t xml:space="preserve">tight</w:t></w:r>"#);
        let run = decode::<Run>(&xml).unwrap();
        assert!(matches!(&run.children[0], RunChild::Text(t) if t.preserve_space));
        assert!(encode(&run).contains(r#"<w:t xml:space="preserve">tight</w:t>"#));
    }
}
