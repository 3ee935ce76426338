/// Attribute-only formatting descriptors.
///
/// These elements never carry content. Their decoders read the attributes
/// and discard anything else inside the element.
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::enums::LineSpacingRule;
use crate::ooxml::docx::types::OnOff;
use crate::ooxml::error::Result;

/// Document background (`w:background`).
///
/// All four attributes are independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    /// RGB hex color or `auto`
    pub color: Option<String>,
    pub theme_color: Option<String>,
    pub theme_tint: Option<String>,
    pub theme_shade: Option<String>,
}

impl Background {
    /// Create a background with an RGB color.
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for Background {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut background = Background::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"color" => background.color = Some(attr_string(&attr)),
                b"themeColor" => background.theme_color = Some(attr_string(&attr)),
                b"themeTint" => background.theme_tint = Some(attr_string(&attr)),
                b"themeShade" => background.theme_shade = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(background)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:background");
        out.opt_attr("w:color", self.color.as_deref());
        out.opt_attr("w:themeColor", self.theme_color.as_deref());
        out.opt_attr("w:themeTint", self.theme_tint.as_deref());
        out.opt_attr("w:themeShade", self.theme_shade.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Run color (`w:color`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Color {
    pub val: Option<String>,
    pub theme_color: Option<String>,
    pub theme_tint: Option<String>,
    pub theme_shade: Option<String>,
}

impl Color {
    /// Create a color from an RGB hex value such as `FF0000`.
    pub fn rgb(val: impl Into<String>) -> Self {
        Self {
            val: Some(val.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for Color {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut color = Color::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"val" => color.val = Some(attr_string(&attr)),
                b"themeColor" => color.theme_color = Some(attr_string(&attr)),
                b"themeTint" => color.theme_tint = Some(attr_string(&attr)),
                b"themeShade" => color.theme_shade = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(color)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:color");
        out.opt_attr("w:val", self.val.as_deref());
        out.opt_attr("w:themeColor", self.theme_color.as_deref());
        out.opt_attr("w:themeTint", self.theme_tint.as_deref());
        out.opt_attr("w:themeShade", self.theme_shade.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Paragraph spacing (`w:spacing`), in twentieths of a point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spacing {
    pub before: Option<i64>,
    pub after: Option<i64>,
    /// Hundredths of a line
    pub before_lines: Option<i64>,
    pub before_autospacing: Option<OnOff>,
    pub after_autospacing: Option<OnOff>,
    pub line: Option<i64>,
    pub line_rule: Option<LineSpacingRule>,
}

impl XmlElement for Spacing {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut spacing = Spacing::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"before" => spacing.before = cursor.decimal(&attr)?,
                b"after" => spacing.after = cursor.decimal(&attr)?,
                b"beforeLines" => spacing.before_lines = cursor.decimal(&attr)?,
                b"beforeAutospacing" => spacing.before_autospacing = cursor.on_off(&attr)?,
                b"afterAutospacing" => spacing.after_autospacing = cursor.on_off(&attr)?,
                b"line" => spacing.line = cursor.decimal(&attr)?,
                b"lineRule" => {
                    spacing.line_rule = cursor.parse_value(&attr, LineSpacingRule::from_xml)?
                },
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(spacing)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:spacing");
        out.num_attr("w:before", self.before);
        out.num_attr("w:after", self.after);
        out.num_attr("w:beforeLines", self.before_lines);
        out.on_off_attr("w:beforeAutospacing", self.before_autospacing);
        out.on_off_attr("w:afterAutospacing", self.after_autospacing);
        out.num_attr("w:line", self.line);
        out.opt_attr("w:lineRule", self.line_rule.map(LineSpacingRule::to_xml));
        out.close_empty();
        Ok(())
    }
}

/// Paragraph indentation (`w:ind`), in twentieths of a point or hundredths
/// of a character for the `*_chars` variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indent {
    pub left: Option<i64>,
    pub left_chars: Option<i64>,
    pub right: Option<i64>,
    pub right_chars: Option<i64>,
    pub hanging: Option<i64>,
    pub hanging_chars: Option<i64>,
    pub first_line: Option<i64>,
    pub first_line_chars: Option<i64>,
}

impl XmlElement for Indent {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut indent = Indent::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                // `start`/`end` are the bidi-aware spellings of left/right
                b"left" | b"start" => indent.left = cursor.decimal(&attr)?,
                b"leftChars" | b"startChars" => indent.left_chars = cursor.decimal(&attr)?,
                b"right" | b"end" => indent.right = cursor.decimal(&attr)?,
                b"rightChars" | b"endChars" => indent.right_chars = cursor.decimal(&attr)?,
                b"hanging" => indent.hanging = cursor.decimal(&attr)?,
                b"hangingChars" => indent.hanging_chars = cursor.decimal(&attr)?,
                b"firstLine" => indent.first_line = cursor.decimal(&attr)?,
                b"firstLineChars" => indent.first_line_chars = cursor.decimal(&attr)?,
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(indent)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:ind");
        out.num_attr("w:left", self.left);
        out.num_attr("w:leftChars", self.left_chars);
        out.num_attr("w:right", self.right);
        out.num_attr("w:rightChars", self.right_chars);
        out.num_attr("w:hanging", self.hanging);
        out.num_attr("w:hangingChars", self.hanging_chars);
        out.num_attr("w:firstLine", self.first_line);
        out.num_attr("w:firstLineChars", self.first_line_chars);
        out.close_empty();
        Ok(())
    }
}

/// Shading (`w:shd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shading {
    /// Pattern, e.g. `clear` or `solid`
    pub val: Option<String>,
    pub color: Option<String>,
    pub fill: Option<String>,
}

impl XmlElement for Shading {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut shading = Shading::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"val" => shading.val = Some(attr_string(&attr)),
                b"color" => shading.color = Some(attr_string(&attr)),
                b"fill" => shading.fill = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(shading)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("w:shd");
        out.opt_attr("w:val", self.val.as_deref());
        out.opt_attr("w:color", self.color.as_deref());
        out.opt_attr("w:fill", self.fill.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// One edge of a border group (`w:top`, `w:insideH`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Border {
    /// Line style, e.g. `single` or `nil`
    pub val: Option<String>,
    /// Width in eighths of a point
    pub size: Option<i64>,
    /// Spacing in points
    pub space: Option<i64>,
    pub color: Option<String>,
}

impl Border {
    /// A single line of the given width.
    pub fn single(size: i64) -> Self {
        Self {
            val: Some("single".to_string()),
            size: Some(size),
            space: Some(0),
            color: Some("auto".to_string()),
        }
    }

    pub(crate) fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut border = Border::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"val" => border.val = Some(attr_string(&attr)),
                b"sz" => border.size = cursor.decimal(&attr)?,
                b"space" => border.space = cursor.decimal(&attr)?,
                b"color" => border.color = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(border)
    }

    /// Encode under the edge name chosen by the containing group.
    pub(crate) fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.opt_attr("w:val", self.val.as_deref());
        out.num_attr("w:sz", self.size);
        out.num_attr("w:space", self.space);
        out.opt_attr("w:color", self.color.as_deref());
        out.close_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    #[test]
    fn test_background_round_trip() {
        let full = Background {
            color: Some("FFFF00".to_string()),
            theme_color: Some("accent1".to_string()),
            theme_tint: Some("99".to_string()),
            theme_shade: Some("BF".to_string()),
        };
        let xml = encode(&full);
        assert_eq!(
            xml,
            r#"<w:background w:color="FFFF00" w:themeColor="accent1" w:themeTint="99" w:themeShade="BF"/>"#
        );
        let wrapped = xml.replacen("<w:background", &format!("<w:background {}", TEST_NS), 1);
        assert_eq!(decode::<Background>(&wrapped).unwrap(), full);

        let one = Background::with_color("00FF00");
        assert_eq!(encode(&one), r#"<w:background w:color="00FF00"/>"#);

        assert_eq!(encode(&Background::default()), "<w:background/>");
    }

    #[test]
    fn test_attribute_only_nodes_discard_content() {
        let xml = format!(
            r#"<w:color {} w:val="FF0000"><w:junk>text</w:junk>more</w:color>"#,
            TEST_NS
        );
        assert_eq!(decode::<Color>(&xml).unwrap(), Color::rgb("FF0000"));
    }

    #[test]
    fn test_spacing_attribute_order_and_suppression() {
        let spacing = Spacing {
            before: Some(120),
            after: None,
            before_lines: None,
            before_autospacing: None,
            after_autospacing: Some(OnOff::On),
            line: Some(360),
            line_rule: Some(LineSpacingRule::Auto),
        };
        assert_eq!(
            encode(&spacing),
            r#"<w:spacing w:before="120" w:afterAutospacing="on" w:line="360" w:lineRule="auto"/>"#
        );
    }

    #[test]
    fn test_spacing_invalid_number_is_left_unset() {
        let xml = format!(
            r#"<w:spacing {} w:line="1.5" w:lineRule="sometimes" w:before="20"/>"#,
            TEST_NS
        );
        let spacing = decode::<Spacing>(&xml).unwrap();
        assert_eq!(spacing.line, None);
        assert_eq!(spacing.line_rule, None);
        assert_eq!(spacing.before, Some(20));
    }

    #[test]
    fn test_indent_round_trip() {
        let indent = Indent {
            left: Some(720),
            hanging: Some(-360),
            first_line_chars: Some(200),
            ..Indent::default()
        };
        let xml = encode(&indent);
        assert_eq!(
            xml,
            r#"<w:ind w:left="720" w:hanging="-360" w:firstLineChars="200"/>"#
        );
        let wrapped = xml.replacen("<w:ind", &format!("<w:ind {}", TEST_NS), 1);
        assert_eq!(decode::<Indent>(&wrapped).unwrap(), indent);
    }
}
