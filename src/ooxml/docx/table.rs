/// Table, Row, and Cell structures for Word documents.
///
/// A cell holds block content, which may itself be a table, so tables nest
/// to any depth. The nested table is boxed inside [`TCBlockContent`].
use crate::ooxml::docx::codec::{Elem, XmlCursor, XmlElement, XmlWriter, attr_string};
use crate::ooxml::docx::enums::{CellVerticalAlign, HeightRule, TableLayoutType, VMergeType};
use crate::ooxml::docx::format::{Border, Shading};
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::types::Toggle;
use crate::ooxml::error::Result;

/// A measurement with its unit (`w:tblW`, `w:tcW`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableWidth {
    /// Width value; twips for `dxa`, fiftieths of a percent for `pct`
    pub width: Option<String>,
    /// Unit: `dxa`, `pct`, `auto` or `nil`
    pub width_type: Option<String>,
}

impl TableWidth {
    /// A width in twentieths of a point.
    pub fn dxa(twips: i64) -> Self {
        Self {
            width: Some(itoa::Buffer::new().format(twips).to_string()),
            width_type: Some("dxa".to_string()),
        }
    }

    /// Automatic width.
    pub fn auto() -> Self {
        Self {
            width: Some("0".to_string()),
            width_type: Some("auto".to_string()),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut width = TableWidth::default();
        for attr in elem.attributes() {
            match attr.key.local_name().as_ref() {
                b"w" => width.width = Some(attr_string(&attr)),
                b"type" => width.width_type = Some(attr_string(&attr)),
                _ => {},
            }
        }
        cursor.skip(elem)?;
        Ok(width)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        out.open(name);
        out.opt_attr("w:w", self.width.as_deref());
        out.opt_attr("w:type", self.width_type.as_deref());
        out.close_empty();
    }
}

/// Border group of a table (`w:tblBorders`) or cell (`w:tcBorders`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

impl TableBorders {
    /// The same border on every edge.
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border.clone()),
            left: Some(border.clone()),
            bottom: Some(border.clone()),
            right: Some(border.clone()),
            inside_h: Some(border.clone()),
            inside_v: Some(border),
        }
    }

    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut borders = TableBorders::default();
        cursor.read_children(elem, |cursor, child| {
            let slot = match child.local_name().as_ref() {
                b"top" => &mut borders.top,
                b"left" | b"start" => &mut borders.left,
                b"bottom" => &mut borders.bottom,
                b"right" | b"end" => &mut borders.right,
                b"insideH" => &mut borders.inside_h,
                b"insideV" => &mut borders.inside_v,
                _ => return cursor.skip_unknown(&child),
            };
            *slot = Some(Border::read(cursor, &child)?);
            Ok(())
        })?;
        Ok(borders)
    }

    fn write_as(&self, name: &str, out: &mut XmlWriter) {
        if *self == TableBorders::default() {
            out.open(name);
            out.close_empty();
            return;
        }
        out.open(name);
        out.close();
        let edges = [
            ("w:top", &self.top),
            ("w:left", &self.left),
            ("w:bottom", &self.bottom),
            ("w:right", &self.right),
            ("w:insideH", &self.inside_h),
            ("w:insideV", &self.inside_v),
        ];
        for (edge, border) in edges {
            if let Some(border) = border {
                border.write_as(edge, out);
            }
        }
        out.end(name);
    }
}

/// Table properties (`w:tblPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProperties {
    pub style: Option<String>,
    pub width: Option<TableWidth>,
    pub justification: Option<String>,
    pub borders: Option<TableBorders>,
    pub shading: Option<Shading>,
    pub layout: Option<TableLayoutType>,
    /// `w:tblLook`, verbatim
    pub look: Option<String>,
}

impl XmlElement for TableProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = TableProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"tblStyle" => props.style = cursor.val_string(&child)?,
                b"tblW" => props.width = Some(TableWidth::read(cursor, &child)?),
                b"jc" => props.justification = cursor.val_string(&child)?,
                b"tblBorders" => props.borders = Some(TableBorders::read(cursor, &child)?),
                b"shd" => props.shading = Some(Shading::read(cursor, &child)?),
                b"tblLayout" => {
                    props.layout = child
                        .attributes()
                        .find(|attr| attr.key.local_name().as_ref() == b"type")
                        .map(|attr| cursor.parse_value(&attr, TableLayoutType::from_xml))
                        .transpose()?
                        .flatten();
                    cursor.skip(&child)?;
                },
                b"tblLook" => props.look = Some(cursor.capture(&child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == TableProperties::default() {
            out.raw("<w:tblPr/>");
            return Ok(());
        }
        out.raw("<w:tblPr>");
        out.val_element("w:tblStyle", self.style.as_deref());
        if let Some(width) = &self.width {
            width.write_as("w:tblW", out);
        }
        out.val_element("w:jc", self.justification.as_deref());
        if let Some(borders) = &self.borders {
            borders.write_as("w:tblBorders", out);
        }
        if let Some(shading) = &self.shading {
            shading.write(out)?;
        }
        if let Some(layout) = self.layout {
            out.open("w:tblLayout");
            out.attr("w:type", layout.to_xml());
            out.close_empty();
        }
        if let Some(look) = &self.look {
            out.raw(look);
        }
        out.raw("</w:tblPr>");
        Ok(())
    }
}

/// Column widths of a table in twips (`w:tblGrid`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGrid {
    pub columns: Vec<i64>,
}

impl XmlElement for TableGrid {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut grid = TableGrid::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"gridCol" => {
                    let mut width = 0;
                    for attr in child.attributes() {
                        if attr.key.local_name().as_ref() == b"w" {
                            width = cursor.decimal(&attr)?.unwrap_or_default();
                        }
                    }
                    grid.columns.push(width);
                    cursor.skip(&child)?;
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(grid)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.columns.is_empty() {
            out.raw("<w:tblGrid/>");
            return Ok(());
        }
        out.raw("<w:tblGrid>");
        for width in &self.columns {
            out.open("w:gridCol");
            out.num_attr("w:w", Some(*width));
            out.close_empty();
        }
        out.raw("</w:tblGrid>");
        Ok(())
    }
}

/// Row properties (`w:trPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowProperties {
    pub cant_split: Option<Toggle>,
    /// Height in twips
    pub height: Option<i64>,
    pub height_rule: Option<HeightRule>,
    /// Repeat the row at the top of each page
    pub header: Option<Toggle>,
}

impl XmlElement for RowProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = RowProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"cantSplit" => props.cant_split = Some(cursor.toggle(&child)?),
                b"trHeight" => {
                    for attr in child.attributes() {
                        match attr.key.local_name().as_ref() {
                            b"val" => props.height = cursor.decimal(&attr)?,
                            b"hRule" => {
                                props.height_rule =
                                    cursor.parse_value(&attr, HeightRule::from_xml)?
                            },
                            _ => {},
                        }
                    }
                    cursor.skip(&child)?;
                },
                b"tblHeader" => props.header = Some(cursor.toggle(&child)?),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == RowProperties::default() {
            out.raw("<w:trPr/>");
            return Ok(());
        }
        out.raw("<w:trPr>");
        out.toggle("w:cantSplit", self.cant_split.as_ref());
        if self.height.is_some() || self.height_rule.is_some() {
            out.open("w:trHeight");
            out.num_attr("w:val", self.height);
            out.opt_attr("w:hRule", self.height_rule.map(HeightRule::to_xml));
            out.close_empty();
        }
        out.toggle("w:tblHeader", self.header.as_ref());
        out.raw("</w:trPr>");
        Ok(())
    }
}

/// Vertical merge marker (`w:vMerge`). A missing value continues the merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalMerge {
    pub val: Option<VMergeType>,
}

impl VerticalMerge {
    #[inline]
    pub fn state(&self) -> VMergeType {
        self.val.unwrap_or(VMergeType::Continue)
    }
}

/// Cell properties (`w:tcPr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellProperties {
    pub width: Option<TableWidth>,
    /// Number of grid columns spanned
    pub grid_span: Option<i64>,
    pub vertical_merge: Option<VerticalMerge>,
    pub borders: Option<TableBorders>,
    pub shading: Option<Shading>,
    pub vertical_align: Option<CellVerticalAlign>,
}

impl XmlElement for CellProperties {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut props = CellProperties::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"tcW" => props.width = Some(TableWidth::read(cursor, &child)?),
                b"gridSpan" => props.grid_span = cursor.val_decimal(&child)?,
                b"vMerge" => {
                    props.vertical_merge = Some(VerticalMerge {
                        val: cursor.val_with(&child, VMergeType::from_xml)?,
                    })
                },
                b"tcBorders" => props.borders = Some(TableBorders::read(cursor, &child)?),
                b"shd" => props.shading = Some(Shading::read(cursor, &child)?),
                b"vAlign" => {
                    props.vertical_align = cursor.val_with(&child, CellVerticalAlign::from_xml)?
                },
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(props)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if *self == CellProperties::default() {
            out.raw("<w:tcPr/>");
            return Ok(());
        }
        out.raw("<w:tcPr>");
        if let Some(width) = &self.width {
            width.write_as("w:tcW", out);
        }
        out.num_element("w:gridSpan", self.grid_span);
        if let Some(merge) = &self.vertical_merge {
            out.open("w:vMerge");
            out.opt_attr("w:val", merge.val.map(VMergeType::to_xml));
            out.close_empty();
        }
        if let Some(borders) = &self.borders {
            borders.write_as("w:tcBorders", out);
        }
        if let Some(shading) = &self.shading {
            shading.write(out)?;
        }
        out.val_element("w:vAlign", self.vertical_align.map(CellVerticalAlign::to_xml));
        out.raw("</w:tcPr>");
        Ok(())
    }
}

/// Block content of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TCBlockContent {
    Paragraph(Paragraph),
    Table(Box<Table>),
}

/// A table cell (`w:tc`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub properties: Option<CellProperties>,
    pub content: Vec<TCBlockContent>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text content of this cell.
    ///
    /// Paragraphs are separated by newlines. Nested tables are not included.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, para) in self.paragraphs().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&para.text());
        }
        text
    }

    /// Paragraphs directly in the cell.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|block| match block {
            TCBlockContent::Paragraph(para) => Some(para),
            TCBlockContent::Table(_) => None,
        })
    }

    /// Tables nested directly in the cell.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.content.iter().filter_map(|block| match block {
            TCBlockContent::Table(table) => Some(table.as_ref()),
            TCBlockContent::Paragraph(_) => None,
        })
    }

    /// Number of grid columns the cell spans.
    pub fn grid_span(&self) -> usize {
        self.properties
            .as_ref()
            .and_then(|props| props.grid_span)
            .and_then(|span| usize::try_from(span).ok())
            .filter(|span| *span > 0)
            .unwrap_or(1)
    }

    /// Vertical merge state, if the cell takes part in a merge.
    pub fn v_merge(&self) -> Option<VMergeType> {
        Some(self.properties.as_ref()?.vertical_merge?.state())
    }

    /// Append a paragraph of text and return it.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.content
            .push(TCBlockContent::Paragraph(Paragraph::with_text(text)));
        match self.content.last_mut() {
            Some(TCBlockContent::Paragraph(para)) => para,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append a nested table and return it.
    pub fn add_table(&mut self) -> &mut Table {
        self.content
            .push(TCBlockContent::Table(Box::new(Table::new())));
        match self.content.last_mut() {
            Some(TCBlockContent::Table(table)) => table,
            _ => unreachable!("a table was just pushed"),
        }
    }

    /// Set the cell width in twips.
    pub fn width(&mut self, twips: i64) -> &mut Self {
        self.properties
            .get_or_insert_with(CellProperties::default)
            .width = Some(TableWidth::dxa(twips));
        self
    }

    /// Span several grid columns.
    pub fn span(&mut self, columns: i64) -> &mut Self {
        self.properties
            .get_or_insert_with(CellProperties::default)
            .grid_span = Some(columns);
        self
    }
}

impl XmlElement for Cell {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut cell = Cell::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"tcPr" => cell.properties = Some(CellProperties::read(cursor, &child)?),
                b"p" => cell
                    .content
                    .push(TCBlockContent::Paragraph(Paragraph::read(cursor, &child)?)),
                b"tbl" => cell
                    .content
                    .push(TCBlockContent::Table(Box::new(Table::read(cursor, &child)?))),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(cell)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.content.is_empty() {
            out.raw("<w:tc/>");
            return Ok(());
        }
        out.raw("<w:tc>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        for block in &self.content {
            match block {
                TCBlockContent::Paragraph(para) => para.write(out)?,
                TCBlockContent::Table(table) => table.write(out)?,
            }
        }
        out.raw("</w:tc>");
        Ok(())
    }
}

/// Content of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TRCellContent {
    Cell(Cell),
}

/// A table row (`w:tr`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub properties: Option<RowProperties>,
    pub cells: Vec<TRCellContent>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of cells in this row.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().map(|content| match content {
            TRCellContent::Cell(cell) => cell,
        })
    }

    /// Append an empty cell and return it.
    pub fn add_cell(&mut self) -> &mut Cell {
        self.cells.push(TRCellContent::Cell(Cell::new()));
        match self.cells.last_mut() {
            Some(TRCellContent::Cell(cell)) => cell,
            None => unreachable!("a cell was just pushed"),
        }
    }

    /// Set the row height in twips.
    pub fn height(&mut self, twips: i64, rule: HeightRule) -> &mut Self {
        let props = self.properties.get_or_insert_with(RowProperties::default);
        props.height = Some(twips);
        props.height_rule = Some(rule);
        self
    }

    /// Repeat the row as a header on each page.
    pub fn header(&mut self, header: bool) -> &mut Self {
        self.properties
            .get_or_insert_with(RowProperties::default)
            .header = Some(Toggle::from_bool(header));
        self
    }
}

impl XmlElement for Row {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut row = Row::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"trPr" => row.properties = Some(RowProperties::read(cursor, &child)?),
                b"tc" => row
                    .cells
                    .push(TRCellContent::Cell(Cell::read(cursor, &child)?)),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(row)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.cells.is_empty() {
            out.raw("<w:tr/>");
            return Ok(());
        }
        out.raw("<w:tr>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        for content in &self.cells {
            match content {
                TRCellContent::Cell(cell) => cell.write(out)?,
            }
        }
        out.raw("</w:tr>");
        Ok(())
    }
}

/// Content of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent {
    Row(Row),
}

/// A table (`w:tbl`).
///
/// # Example
///
/// ```
/// use docweave::ooxml::docx::Table;
///
/// let mut table = Table::with_grid(&[2400, 2400]);
/// let row = table.add_row();
/// row.add_cell().add_paragraph("Item");
/// row.add_cell().add_paragraph("Qty");
/// assert_eq!(table.row_count(), 1);
/// assert_eq!(table.column_count(), 2);
/// assert_eq!(table.cell(0, 1).unwrap().text(), "Qty");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub properties: Option<TableProperties>,
    pub grid: Option<TableGrid>,
    pub rows: Vec<RowContent>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given column widths in twips.
    pub fn with_grid(columns: &[i64]) -> Self {
        Self {
            properties: None,
            grid: Some(TableGrid {
                columns: columns.to_vec(),
            }),
            rows: Vec::new(),
        }
    }

    /// Get the number of rows in this table.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    ///
    /// Taken from the grid when present, otherwise from the first row.
    pub fn column_count(&self) -> usize {
        match &self.grid {
            Some(grid) if !grid.columns.is_empty() => grid.columns.len(),
            _ => self.rows().next().map(Row::cell_count).unwrap_or(0),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().map(|content| match content {
            RowContent::Row(row) => row,
        })
    }

    /// Get the text of the table: rows separated by newlines, cells by tabs.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            for (j, cell) in row.cells().enumerate() {
                if j > 0 {
                    text.push('\t');
                }
                text.push_str(&cell.text());
            }
        }
        text
    }

    /// Get a specific cell by row and column index.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&Cell> {
        self.rows().nth(row_idx)?.cells().nth(col_idx)
    }

    /// Append an empty row and return it.
    pub fn add_row(&mut self) -> &mut Row {
        self.rows.push(RowContent::Row(Row::new()));
        match self.rows.last_mut() {
            Some(RowContent::Row(row)) => row,
            None => unreachable!("a row was just pushed"),
        }
    }

    /// Get the property block, creating it if needed.
    pub fn properties_mut(&mut self) -> &mut TableProperties {
        self.properties.get_or_insert_with(TableProperties::default)
    }

    /// Apply a table style.
    pub fn style(&mut self, style_id: &str) -> &mut Self {
        self.properties_mut().style = Some(style_id.to_string());
        self
    }

    /// Put the same border on every edge and between all cells.
    pub fn borders(&mut self, border: Border) -> &mut Self {
        self.properties_mut().borders = Some(TableBorders::all(border));
        self
    }
}

impl XmlElement for Table {
    fn read(cursor: &mut XmlCursor<'_>, elem: &Elem<'_>) -> Result<Self> {
        let mut table = Table::default();
        cursor.read_children(elem, |cursor, child| {
            match child.local_name().as_ref() {
                b"tblPr" => table.properties = Some(TableProperties::read(cursor, &child)?),
                b"tblGrid" => table.grid = Some(TableGrid::read(cursor, &child)?),
                b"tr" => table
                    .rows
                    .push(RowContent::Row(Row::read(cursor, &child)?)),
                _ => cursor.skip_unknown(&child)?,
            }
            Ok(())
        })?;
        Ok(table)
    }

    fn write(&self, out: &mut XmlWriter) -> Result<()> {
        if self.properties.is_none() && self.grid.is_none() && self.rows.is_empty() {
            out.raw("<w:tbl/>");
            return Ok(());
        }
        out.raw("<w:tbl>");
        if let Some(props) = &self.properties {
            props.write(out)?;
        }
        if let Some(grid) = &self.grid {
            grid.write(out)?;
        }
        for content in &self.rows {
            match content {
                RowContent::Row(row) => row.write(out)?,
            }
        }
        out.raw("</w:tbl>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::codec::{TEST_NS, decode, encode};

    fn wrap(xml: &str) -> String {
        xml.replacen("<w:tbl", &format!("<w:tbl {}", TEST_NS), 1)
    }

    #[test]
    fn test_table_properties_round_trip() {
        let mut table = Table::with_grid(&[3000, 1500]);
        table.style("TableGrid").borders(Border::single(4));
        {
            let props = table.properties_mut();
            props.width = Some(TableWidth::auto());
            props.justification = Some("center".to_string());
            props.layout = Some(TableLayoutType::Fixed);
        }
        let row = table.add_row();
        row.height(400, HeightRule::AtLeast).header(true);
        row.add_cell().width(3000).add_paragraph("a");
        row.add_cell().span(1).add_paragraph("b");

        let xml = encode(&table);
        assert!(xml.starts_with(concat!(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/><w:tblW w:w="0" w:type="auto"/>"#,
            r#"<w:jc w:val="center"/><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#
        )));
        assert!(xml.contains(r#"<w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid><w:gridCol w:w="3000"/>"#));
        assert!(xml.contains(r#"<w:trPr><w:trHeight w:val="400" w:hRule="atLeast"/><w:tblHeader/></w:trPr>"#));
        assert_eq!(decode::<Table>(&wrap(&xml)).unwrap(), table);
    }

    #[test]
    fn test_empty_cells_and_rows_survive() {
        let xml = wrap(
            r#"<w:tbl><w:tr><w:tc/><w:tc><w:p/></w:tc><w:tc></w:tc></w:tr><w:tr/></w:tbl>"#,
        );
        let table = decode::<Table>(&xml).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows().next().unwrap().cell_count(), 3);
        assert_eq!(table.rows().nth(1).unwrap().cell_count(), 0);

        let again = decode::<Table>(&wrap(&encode(&table))).unwrap();
        assert_eq!(again, table);
        assert_eq!(
            encode(&again),
            "<w:tbl><w:tr><w:tc/><w:tc><w:p/></w:tc><w:tc/></w:tr><w:tr/></w:tbl>"
        );
    }

    #[test]
    fn test_nested_tables() {
        let mut table = Table::new();
        let cell = table.add_row().add_cell();
        cell.add_paragraph("outer");
        let inner = cell.add_table();
        inner.add_row().add_cell().add_table().add_row().add_cell().add_paragraph("deep");

        let decoded = decode::<Table>(&wrap(&encode(&table))).unwrap();
        assert_eq!(decoded, table);
        let cell = decoded.cell(0, 0).unwrap();
        assert_eq!(cell.text(), "outer");
        let inner = cell.tables().next().unwrap();
        let deepest = inner.cell(0, 0).unwrap().tables().next().unwrap();
        assert_eq!(deepest.cell(0, 0).unwrap().text(), "deep");
    }

    #[test]
    fn test_vertical_merge() {
        let xml = wrap(concat!(
            r#"<w:tbl><w:tr><w:tc><w:tcPr><w:vMerge w:val="restart"/><w:vAlign w:val="center"/></w:tcPr></w:tc></w:tr>"#,
            r#"<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/><w:vMerge/></w:tcPr></w:tc></w:tr></w:tbl>"#
        ));
        let table = decode::<Table>(&xml).unwrap();
        assert_eq!(table.cell(0, 0).unwrap().v_merge(), Some(VMergeType::Restart));
        let continued = table.cell(1, 0).unwrap();
        assert_eq!(continued.v_merge(), Some(VMergeType::Continue));
        assert_eq!(continued.grid_span(), 2);
        assert!(encode(&table).contains(r#"<w:gridSpan w:val="2"/><w:vMerge/>"#));
        assert_eq!(table.column_count(), 1);
    }
}
