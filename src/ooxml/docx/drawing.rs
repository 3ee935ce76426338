/// Drawings embedded in runs (`w:drawing`).
///
/// A drawing is either an inline object, positioned like a character, or an
/// anchored object floating relative to the page. The model reads the parts a
/// caller is likely to touch: the extent, the non-visual properties and the
/// relationship id of a picture's image. Geometry, effects and positioning are
/// carried as opaque markup and written back unchanged.
///
/// # Example
///
/// ```
/// use docweave::ooxml::docx::{Drawing, DrawingObject};
///
/// // 2 x 1 inches, in EMUs
/// let drawing = Drawing::inline_picture("rId7", 1_828_800, 914_400, 1, "Chart");
/// match &drawing.object {
///     Some(DrawingObject::Inline(inline)) => {
///         assert_eq!(inline.image_r_id(), Some("rId7"));
///     },
///     _ => unreachable!(),
/// }
/// ```
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::types::parse_decimal;
use crate::ooxml::error::Result;

/// URI of graphic data holding a picture.
pub const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// A drawing (`w:drawing`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drawing {
    pub object: Option<DrawingObject>,
}

/// The single object of a drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingObject {
    Inline(Inline),
    Anchor(Anchor),
}

impl Drawing {
    /// Build an inline picture referencing an image relationship.
    ///
    /// `cx` and `cy` are in EMUs; `id` must be unique among the drawings of
    /// the document.
    pub fn inline_picture(r_id: &str, cx: i64, cy: i64, id: i64, name: &str) -> Self {
        let picture = Picture {
            non_visual: Some(format!(
                r#"<pic:nvPicPr><pic:cNvPr id="0" name="{}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                crate::common::xml::escape_xml(name)
            )),
            blip_fill: Some(BlipFill {
                blip: Some(Blip {
                    embed: Some(r_id.to_string()),
                    link: None,
                    compression: None,
                }),
                fill_mode: Some(FillMode::Stretch {
                    fill_rect: Some(RelativeRect::default()),
                }),
                ..Default::default()
            }),
            shape_properties: Some(format!(
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                cx, cy
            )),
        };
        let inline = Inline {
            dist_t: Some(0),
            dist_b: Some(0),
            dist_l: Some(0),
            dist_r: Some(0),
            extent: Some(Extent { cx, cy }),
            doc_pr: Some(DocProperties {
                id: Some(id),
                name: Some(name.to_string()),
                ..Default::default()
            }),
            graphic: Some(Graphic {
                data: Some(GraphicData {
                    uri: Some(PICTURE_URI.to_string()),
                    picture: Some(picture),
                    other: Vec::new(),
                }),
            }),
            ..Default::default()
        };
        Self {
            object: Some(DrawingObject::Inline(inline)),
        }
    }

    /// Relationship id of the picture's image, if any.
    pub fn image_r_id(&self) -> Option<&str> {
        match self.object.as_ref()? {
            DrawingObject::Inline(inline) => inline.image_r_id(),
            DrawingObject::Anchor(anchor) => anchor.graphic.as_ref()?.image_r_id(),
        }
    }

    /// Non-visual properties of the drawing object.
    pub fn doc_properties(&self) -> Option<&DocProperties> {
        match self.object.as_ref()? {
            DrawingObject::Inline(inline) => inline.doc_pr.as_ref(),
            DrawingObject::Anchor(anchor) => anchor.doc_pr.as_ref(),
        }
    }
}

impl XmlElement for Drawing {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut drawing = Drawing::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"inline" => {
                    drawing.object = Some(DrawingObject::Inline(Inline::read(cursor, &child)?))
                },
                b"anchor" => {
                    drawing.object = Some(DrawingObject::Anchor(Anchor::read(cursor, &child)?))
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(drawing)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        match &self.object {
            None => out.raw("<w:drawing/>"),
            Some(object) => {
                out.raw("<w:drawing>");
                match object {
                    DrawingObject::Inline(inline) => inline.write(out)?,
                    DrawingObject::Anchor(anchor) => anchor.write(out)?,
                }
                out.raw("</w:drawing>");
            },
        }
        Ok(())
    }
}

/// Size of a drawing in EMUs (`wp:extent`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub cx: i64,
    pub cy: i64,
}

impl XmlElement for Extent {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut extent = Extent::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"cx" => extent.cx = cursor.decimal(&attr)?.unwrap_or_default(),
                b"cy" => extent.cy = cursor.decimal(&attr)?.unwrap_or_default(),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(extent)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("wp:extent");
        out.num_attr("cx", Some(self.cx));
        out.num_attr("cy", Some(self.cy));
        out.close_empty();
        Ok(())
    }
}

/// Non-visual drawing properties (`wp:docPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocProperties {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub hidden: Option<String>,
}

impl XmlElement for DocProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = DocProperties::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"id" => props.id = cursor.decimal(&attr)?,
                b"name" => props.name = Some(attr_string(&attr)),
                b"descr" => props.description = Some(attr_string(&attr)),
                b"title" => props.title = Some(attr_string(&attr)),
                b"hidden" => props.hidden = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("wp:docPr");
        out.num_attr("id", self.id);
        out.opt_attr("name", self.name.as_deref());
        out.opt_attr("descr", self.description.as_deref());
        out.opt_attr("title", self.title.as_deref());
        out.opt_attr("hidden", self.hidden.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Inline drawing (`wp:inline`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inline {
    pub dist_t: Option<i64>,
    pub dist_b: Option<i64>,
    pub dist_l: Option<i64>,
    pub dist_r: Option<i64>,
    pub anchor_id: Option<String>,
    pub edit_id: Option<String>,
    pub extent: Option<Extent>,
    /// `wp:effectExtent`, verbatim
    pub effect_extent: Option<String>,
    pub doc_pr: Option<DocProperties>,
    /// `wp:cNvGraphicFramePr`, verbatim
    pub frame_properties: Option<String>,
    pub graphic: Option<Graphic>,
}

impl Inline {
    pub fn image_r_id(&self) -> Option<&str> {
        self.graphic.as_ref()?.image_r_id()
    }
}

impl XmlElement for Inline {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut inline = Inline::default();
        for attr in elem.attributes() {
            match attr.key.as_ref() {
                b"distT" => inline.dist_t = cursor.decimal(&attr)?,
                b"distB" => inline.dist_b = cursor.decimal(&attr)?,
                b"distL" => inline.dist_l = cursor.decimal(&attr)?,
                b"distR" => inline.dist_r = cursor.decimal(&attr)?,
                b"wp14:anchorId" => inline.anchor_id = Some(attr_string(&attr)),
                b"wp14:editId" => inline.edit_id = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"extent" => inline.extent = Some(Extent::read(cursor, &child)?),
                b"effectExtent" => inline.effect_extent = Some(cursor.capture(&child)?),
                b"docPr" => inline.doc_pr = Some(DocProperties::read(cursor, &child)?),
                b"cNvGraphicFramePr" => inline.frame_properties = Some(cursor.capture(&child)?),
                b"graphic" => inline.graphic = Some(Graphic::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(inline)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("wp:inline");
        out.num_attr("distT", self.dist_t);
        out.num_attr("distB", self.dist_b);
        out.num_attr("distL", self.dist_l);
        out.num_attr("distR", self.dist_r);
        out.opt_attr("wp14:anchorId", self.anchor_id.as_deref());
        out.opt_attr("wp14:editId", self.edit_id.as_deref());
        out.close();
        if let Some(extent) = &self.extent {
            extent.write(out)?;
        }
        if let Some(effect_extent) = &self.effect_extent {
            out.raw(effect_extent);
        }
        if let Some(doc_pr) = &self.doc_pr {
            doc_pr.write(out)?;
        }
        if let Some(frame) = &self.frame_properties {
            out.raw(frame);
        }
        if let Some(graphic) = &self.graphic {
            graphic.write(out)?;
        }
        out.end("wp:inline");
        Ok(())
    }
}

/// Floating drawing (`wp:anchor`).
///
/// Positioning and wrapping are kept as markup. The attributes, of which
/// there are many, are kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    /// Qualified attribute names and values, in document order
    pub attributes: Vec<(String, String)>,
    /// `wp:simplePos`, `wp:positionH` and `wp:positionV`, verbatim
    pub position: Vec<String>,
    pub extent: Option<Extent>,
    pub effect_extent: Option<String>,
    /// The `wp:wrap*` element, verbatim
    pub wrap: Option<String>,
    pub doc_pr: Option<DocProperties>,
    pub frame_properties: Option<String>,
    pub graphic: Option<Graphic>,
}

impl Anchor {
    /// Value of an attribute by qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the object is drawn behind the text.
    pub fn behind_doc(&self) -> bool {
        matches!(self.attribute("behindDoc"), Some("1" | "true" | "on"))
    }
}

impl XmlElement for Anchor {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut anchor = Anchor::default();
        for attr in elem.attributes() {
            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            anchor.attributes.push((name, attr_string(&attr)));
        }
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"simplePos" | b"positionH" | b"positionV" => {
                    anchor.position.push(cursor.capture(&child)?)
                },
                b"extent" => anchor.extent = Some(Extent::read(cursor, &child)?),
                b"effectExtent" => anchor.effect_extent = Some(cursor.capture(&child)?),
                b"wrapNone" | b"wrapSquare" | b"wrapTight" | b"wrapThrough"
                | b"wrapTopAndBottom" => anchor.wrap = Some(cursor.capture(&child)?),
                b"docPr" => anchor.doc_pr = Some(DocProperties::read(cursor, &child)?),
                b"cNvGraphicFramePr" => anchor.frame_properties = Some(cursor.capture(&child)?),
                b"graphic" => anchor.graphic = Some(Graphic::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(anchor)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("wp:anchor");
        for (name, value) in &self.attributes {
            out.attr(name, value);
        }
        out.close();
        for position in &self.position {
            out.raw(position);
        }
        if let Some(extent) = &self.extent {
            extent.write(out)?;
        }
        for raw in [&self.effect_extent, &self.wrap].into_iter().flatten() {
            out.raw(raw);
        }
        if let Some(doc_pr) = &self.doc_pr {
            doc_pr.write(out)?;
        }
        if let Some(frame) = &self.frame_properties {
            out.raw(frame);
        }
        if let Some(graphic) = &self.graphic {
            graphic.write(out)?;
        }
        out.end("wp:anchor");
        Ok(())
    }
}

/// Graphic frame content (`a:graphic`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graphic {
    pub data: Option<GraphicData>,
}

impl Graphic {
    pub fn image_r_id(&self) -> Option<&str> {
        let picture = self.data.as_ref()?.picture.as_ref()?;
        picture.blip_fill.as_ref()?.blip.as_ref()?.embed.as_deref()
    }
}

impl XmlElement for Graphic {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut graphic = Graphic::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"graphicData" => graphic.data = Some(GraphicData::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(graphic)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        match &self.data {
            None => out.raw("<a:graphic/>"),
            Some(data) => {
                out.raw("<a:graphic>");
                data.write(out)?;
                out.raw("</a:graphic>");
            },
        }
        Ok(())
    }
}

/// Graphic payload (`a:graphicData`).
///
/// Pictures are modelled; shapes, groups and charts are kept as markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicData {
    pub uri: Option<String>,
    pub picture: Option<Picture>,
    pub other: Vec<String>,
}

impl XmlElement for GraphicData {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut data = GraphicData {
            uri: elem
                .attributes()
                .find(|attr| attr.key.local_name().as_ref() == b"uri")
                .map(|attr| attr_string(&attr)),
            ..Default::default()
        };
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"pic" => data.picture = Some(Picture::read(cursor, &child)?),
                _ => data.other.push(cursor.capture(&child)?),
            }
            Ok(())
        })?;
        Ok(data)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("a:graphicData");
        out.opt_attr("uri", self.uri.as_deref());
        out.close();
        if let Some(picture) = &self.picture {
            picture.write(out)?;
        }
        for raw in &self.other {
            out.raw(raw);
        }
        out.end("a:graphicData");
        Ok(())
    }
}

/// Picture (`pic:pic`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picture {
    /// `pic:nvPicPr`, verbatim
    pub non_visual: Option<String>,
    pub blip_fill: Option<BlipFill>,
    /// `pic:spPr`, verbatim
    pub shape_properties: Option<String>,
}

impl XmlElement for Picture {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut picture = Picture::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"nvPicPr" => picture.non_visual = Some(cursor.capture(&child)?),
                b"blipFill" => picture.blip_fill = Some(BlipFill::read(cursor, &child)?),
                b"spPr" => picture.shape_properties = Some(cursor.capture(&child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(picture)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.raw("<pic:pic>");
        if let Some(non_visual) = &self.non_visual {
            out.raw(non_visual);
        }
        if let Some(blip_fill) = &self.blip_fill {
            blip_fill.write(out)?;
        }
        if let Some(shape_properties) = &self.shape_properties {
            out.raw(shape_properties);
        }
        out.raw("</pic:pic>");
        Ok(())
    }
}

/// Image reference (`a:blip`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blip {
    /// `r:embed`, resolved by the package layer
    pub embed: Option<String>,
    /// `r:link`, for linked images
    pub link: Option<String>,
    /// `cstate`
    pub compression: Option<String>,
}

impl XmlElement for Blip {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut blip = Blip::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"embed" => {
                    let r_id = attr_string(&attr);
                    cursor.observe_r_id(&r_id);
                    blip.embed = Some(r_id);
                },
                b"link" => {
                    let r_id = attr_string(&attr);
                    cursor.observe_r_id(&r_id);
                    blip.link = Some(r_id);
                },
                b"cstate" => blip.compression = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(blip)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("a:blip");
        out.opt_attr("r:embed", self.embed.as_deref());
        out.opt_attr("r:link", self.link.as_deref());
        out.opt_attr("cstate", self.compression.as_deref());
        out.close_empty();
        Ok(())
    }
}

/// Insets in thousandths of a percent (`a:fillRect`, `a:srcRect`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeRect {
    pub left: Option<i64>,
    pub top: Option<i64>,
    pub right: Option<i64>,
    pub bottom: Option<i64>,
}

impl RelativeRect {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut rect = RelativeRect::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"l" => rect.left = cursor.decimal(&attr)?,
                b"t" => rect.top = cursor.decimal(&attr)?,
                b"r" => rect.right = cursor.decimal(&attr)?,
                b"b" => rect.bottom = cursor.decimal(&attr)?,
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(rect)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.num_attr("l", self.left);
        out.num_attr("t", self.top);
        out.num_attr("r", self.right);
        out.num_attr("b", self.bottom);
        out.close_empty();
    }
}

/// How the image fills its shape. Exactly one per fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillMode {
    /// `a:stretch`
    Stretch { fill_rect: Option<RelativeRect> },
    /// `a:tile`
    Tile {
        tx: Option<i64>,
        ty: Option<i64>,
        sx: Option<i64>,
        sy: Option<i64>,
        flip: Option<String>,
        align: Option<String>,
    },
}

impl FillMode {
    fn read_stretch(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut fill_rect = None;
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"fillRect" => fill_rect = Some(RelativeRect::read(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(FillMode::Stretch { fill_rect })
    }

    fn read_tile(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let (mut tx, mut ty, mut sx, mut sy, mut flip, mut align) =
            (None, None, None, None, None, None);
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"tx" => tx = cursor.decimal(&attr)?,
                b"ty" => ty = cursor.decimal(&attr)?,
                b"sx" => sx = cursor.decimal(&attr)?,
                b"sy" => sy = cursor.decimal(&attr)?,
                b"flip" => flip = Some(attr_string(&attr)),
                b"algn" => align = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(FillMode::Tile {
            tx,
            ty,
            sx,
            sy,
            flip,
            align,
        })
    }

    fn write(&self, out: &mut XmlWriter) {
        match self {
            FillMode::Stretch { fill_rect: None } => out.raw("<a:stretch/>"),
            FillMode::Stretch {
                fill_rect: Some(rect),
            } => {
                out.raw("<a:stretch>");
                rect.write_as("a:fillRect", out);
                out.raw("</a:stretch>");
            },
            FillMode::Tile {
                tx,
                ty,
                sx,
                sy,
                flip,
                align,
            } => {
                out.open("a:tile");
                out.num_attr("tx", *tx);
                out.num_attr("ty", *ty);
                out.num_attr("sx", *sx);
                out.num_attr("sy", *sy);
                out.opt_attr("flip", flip.as_deref());
                out.opt_attr("algn", align.as_deref());
                out.close_empty();
            },
        }
    }
}

/// Picture fill (`pic:blipFill`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlipFill {
    pub dpi: Option<u32>,
    pub rotate_with_shape: Option<String>,
    pub blip: Option<Blip>,
    pub source_rect: Option<RelativeRect>,
    pub fill_mode: Option<FillMode>,
}

impl XmlElement for BlipFill {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut fill = BlipFill::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"dpi" => {
                    fill.dpi = cursor.parse_value(&attr, |s| {
                        parse_decimal(s).and_then(|v| u32::try_from(v).ok())
                    })?
                },
                b"rotWithShape" => fill.rotate_with_shape = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"blip" => fill.blip = Some(Blip::read(cursor, &child)?),
                b"srcRect" => fill.source_rect = Some(RelativeRect::read(cursor, &child)?),
                b"stretch" => fill.fill_mode = Some(FillMode::read_stretch(cursor, &child)?),
                b"tile" => fill.fill_mode = Some(FillMode::read_tile(cursor, &child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(fill)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        out.open("pic:blipFill");
        out.num_attr("dpi", self.dpi.map(i64::from));
        out.opt_attr("rotWithShape", self.rotate_with_shape.as_deref());
        out.close();
        if let Some(blip) = &self.blip {
            blip.write(out)?;
        }
        if let Some(rect) = &self.source_rect {
            rect.write_as("a:srcRect", out);
        }
        if let Some(mode) = &self.fill_mode {
            mode.write(out);
        }
        out.end("pic:blipFill");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    fn wrap(xml: &str) -> String {
        xml.replacen("<w:drawing", &format!("<w:drawing {}", TEST_NS), 1)
    }

    const ANCHORED: &str = concat!(
        r#"<w:drawing><wp:anchor distT="0" distB="0" distL="114300" distR="114300" simplePos="0" relativeHeight="251659264" behindDoc="1" locked="0" layoutInCell="1" allowOverlap="1">"#,
        r#"<wp:simplePos x="0" y="0"/>"#,
        r#"<wp:positionH relativeFrom="column"><wp:posOffset>0</wp:posOffset></wp:positionH>"#,
        r#"<wp:positionV relativeFrom="paragraph"><wp:posOffset>127000</wp:posOffset></wp:positionV>"#,
        r#"<wp:extent cx="2743200" cy="1828800"/>"#,
        r#"<wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
        r#"<wp:wrapSquare wrapText="bothSides"/>"#,
        r#"<wp:docPr id="4" name="Logo" descr="Company &amp; logo"/>"#,
        r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
        r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
        r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="logo.png"/><pic:cNvPicPr/></pic:nvPicPr>"#,
        r#"<pic:blipFill dpi="96"><a:blip r:embed="rId12" cstate="print"><a:extLst/></a:blip><a:srcRect l="10" r="20"/><a:tile tx="0" ty="0" sx="100000" sy="100000" flip="none" algn="tl"/></pic:blipFill>"#,
        r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="2743200" cy="1828800"/></a:xfrm></pic:spPr>"#,
        r#"</pic:pic></a:graphicData></a:graphic></wp:anchor></w:drawing>"#,
    );

    #[test]
    fn test_anchor_decode() {
        let drawing = decode::<Drawing>(&wrap(ANCHORED)).unwrap();
        let Some(DrawingObject::Anchor(anchor)) = &drawing.object else {
            panic!("expected an anchored drawing");
        };
        assert!(anchor.behind_doc());
        assert_eq!(anchor.attribute("distL"), Some("114300"));
        assert_eq!(anchor.position.len(), 3);
        assert_eq!(
            anchor.extent,
            Some(Extent {
                cx: 2_743_200,
                cy: 1_828_800
            })
        );
        assert_eq!(
            anchor.doc_pr.as_ref().unwrap().description.as_deref(),
            Some("Company & logo")
        );
        assert_eq!(drawing.image_r_id(), Some("rId12"));

        let fill = anchor.graphic.as_ref().unwrap().data.as_ref().unwrap();
        let fill = fill.picture.as_ref().unwrap().blip_fill.as_ref().unwrap();
        assert_eq!(fill.dpi, Some(96));
        assert!(matches!(fill.fill_mode, Some(FillMode::Tile { sx: Some(100_000), .. })));
    }

    #[test]
    fn test_anchor_round_trip() {
        let drawing = decode::<Drawing>(&wrap(ANCHORED)).unwrap();
        let xml = encode(&drawing);
        assert!(xml.contains(r#"<wp:wrapSquare wrapText="bothSides"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId12" cstate="print"/>"#));
        assert_eq!(decode::<Drawing>(&wrap(&xml)).unwrap(), drawing);
    }

    #[test]
    fn test_inline_picture_round_trip() {
        let drawing = Drawing::inline_picture("rId3", 914_400, 457_200, 2, "Photo <1>");
        let xml = encode(&drawing);
        assert!(xml.starts_with(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="914400" cy="457200"/><wp:docPr id="2" name="Photo &lt;1&gt;"/>"#
        ));
        assert!(xml.contains(r#"<a:stretch><a:fillRect/></a:stretch>"#));
        assert_eq!(decode::<Drawing>(&wrap(&xml)).unwrap(), drawing);
    }

    #[test]
    fn test_empty_drawing() {
        let drawing = Drawing::default();
        assert_eq!(encode(&drawing), "<w:drawing/>");
        assert_eq!(decode::<Drawing>(&wrap("<w:drawing/>")).unwrap(), drawing);
        assert_eq!(drawing.image_r_id(), None);
    }
}
