/// Traversal of the document tree as run sequences.
///
/// A run sequence is the ordered list of runs that field markers can span:
/// the direct runs and hyperlink runs of one paragraph, or the direct runs of
/// one content control's content. Paragraphs inside table cells, nested
/// tables and content controls each produce their own sequences.
///
/// The walk keeps its pending containers on an explicit stack, so the depth
/// of table nesting does not grow the call stack.
use crate::ooxml::docx::content_control::{SdtContentChild, StructuredDocumentTag};
use crate::ooxml::docx::document::{Body, DocumentChild};
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphChild};
use crate::ooxml::docx::run::Run;
use crate::ooxml::docx::table::{RowContent, TCBlockContent, TRCellContent, Table};

/// A container still to be visited.
enum Scope<'a> {
    Paragraph(&'a Paragraph),
    Table(&'a Table),
    Sdt(&'a StructuredDocumentTag),
}

enum ScopeMut<'a> {
    Paragraph(&'a mut Paragraph),
    Table(&'a mut Table),
    Sdt(&'a mut StructuredDocumentTag),
}

/// Call `visit` once per run sequence of the body, in document order.
///
/// # Examples
///
/// ```
/// use docweave::ooxml::docx::{Document, walk};
///
/// let mut doc = Document::new();
/// doc.add_paragraph("one").add_text("two");
/// doc.add_table().add_row().add_cell().add_paragraph("three");
///
/// let mut sequences = Vec::new();
/// walk::run_sequences(doc.body(), |runs| {
///     sequences.push(runs.iter().map(|run| run.text()).collect::<Vec<_>>());
/// });
/// assert_eq!(sequences, vec![vec!["one", "two"], vec!["three"]]);
/// ```
pub fn run_sequences<F>(body: Option<&Body>, mut visit: F)
where
    F: FnMut(&[&Run]),
{
    let Some(body) = body else {
        return;
    };
    let mut stack: Vec<Scope<'_>> = Vec::new();
    push_blocks(&body.children, &mut stack);

    while let Some(scope) = stack.pop() {
        match scope {
            Scope::Paragraph(para) => {
                let mut runs = Vec::new();
                let mut nested = Vec::new();
                for child in &para.children {
                    match child {
                        ParagraphChild::Run(run) => runs.push(run),
                        ParagraphChild::Hyperlink(link) => runs.extend(link.run.as_ref()),
                        ParagraphChild::Sdt(sdt) => nested.push(Scope::Sdt(sdt)),
                        _ => {},
                    }
                }
                if !runs.is_empty() {
                    visit(&runs);
                }
                stack.extend(nested.into_iter().rev());
            },
            Scope::Table(table) => {
                let mut nested = Vec::new();
                for RowContent::Row(row) in &table.rows {
                    for TRCellContent::Cell(cell) in &row.cells {
                        for block in &cell.content {
                            nested.push(match block {
                                TCBlockContent::Paragraph(para) => Scope::Paragraph(para),
                                TCBlockContent::Table(table) => Scope::Table(table),
                            });
                        }
                    }
                }
                stack.extend(nested.into_iter().rev());
            },
            Scope::Sdt(sdt) => {
                let Some(content) = &sdt.content else {
                    continue;
                };
                let mut runs = Vec::new();
                let mut nested = Vec::new();
                for child in &content.children {
                    match child {
                        SdtContentChild::Run(run) => runs.push(run),
                        SdtContentChild::Paragraph(para) => nested.push(Scope::Paragraph(para)),
                        SdtContentChild::Table(table) => nested.push(Scope::Table(table)),
                    }
                }
                if !runs.is_empty() {
                    visit(&runs);
                }
                stack.extend(nested.into_iter().rev());
            },
        }
    }
}

fn push_blocks<'a>(children: &'a [DocumentChild], stack: &mut Vec<Scope<'a>>) {
    for child in children.iter().rev() {
        match child {
            DocumentChild::Paragraph(para) => stack.push(Scope::Paragraph(para)),
            DocumentChild::Table(table) => stack.push(Scope::Table(table)),
            DocumentChild::Sdt(sdt) => stack.push(Scope::Sdt(sdt)),
            DocumentChild::SectionProperties(_) => {},
        }
    }
}

/// Mutable counterpart of [`run_sequences`].
pub fn run_sequences_mut<F>(body: Option<&mut Body>, mut visit: F)
where
    F: FnMut(&mut [&mut Run]),
{
    let Some(body) = body else {
        return;
    };
    let mut stack: Vec<ScopeMut<'_>> = Vec::new();
    push_blocks_mut(&mut body.children, &mut stack);

    while let Some(scope) = stack.pop() {
        match scope {
            ScopeMut::Paragraph(para) => {
                let mut runs = Vec::new();
                let mut nested = Vec::new();
                for child in &mut para.children {
                    match child {
                        ParagraphChild::Run(run) => runs.push(run),
                        ParagraphChild::Hyperlink(link) => runs.extend(link.run.as_mut()),
                        ParagraphChild::Sdt(sdt) => nested.push(ScopeMut::Sdt(sdt)),
                        _ => {},
                    }
                }
                if !runs.is_empty() {
                    visit(&mut runs);
                }
                stack.extend(nested.into_iter().rev());
            },
            ScopeMut::Table(table) => {
                let mut nested = Vec::new();
                for RowContent::Row(row) in &mut table.rows {
                    for TRCellContent::Cell(cell) in &mut row.cells {
                        for block in &mut cell.content {
                            nested.push(match block {
                                TCBlockContent::Paragraph(para) => ScopeMut::Paragraph(para),
                                TCBlockContent::Table(table) => ScopeMut::Table(table),
                            });
                        }
                    }
                }
                stack.extend(nested.into_iter().rev());
            },
            ScopeMut::Sdt(sdt) => {
                let Some(content) = &mut sdt.content else {
                    continue;
                };
                let mut runs = Vec::new();
                let mut nested = Vec::new();
                for child in &mut content.children {
                    match child {
                        SdtContentChild::Run(run) => runs.push(run),
                        SdtContentChild::Paragraph(para) => {
                            nested.push(ScopeMut::Paragraph(para))
                        },
                        SdtContentChild::Table(table) => nested.push(ScopeMut::Table(table)),
                    }
                }
                if !runs.is_empty() {
                    visit(&mut runs);
                }
                stack.extend(nested.into_iter().rev());
            },
        }
    }
}

fn push_blocks_mut<'a>(children: &'a mut [DocumentChild], stack: &mut Vec<ScopeMut<'a>>) {
    for child in children.iter_mut().rev() {
        match child {
            DocumentChild::Paragraph(para) => stack.push(ScopeMut::Paragraph(para)),
            DocumentChild::Table(table) => stack.push(ScopeMut::Table(table)),
            DocumentChild::Sdt(sdt) => stack.push(ScopeMut::Sdt(sdt)),
            DocumentChild::SectionProperties(_) => {},
        }
    }
}

/// Content controls of the body, block-level and inline, in document order.
///
/// Controls nested inside another control's content follow their parent.
pub fn content_controls(body: Option<&Body>) -> Vec<&StructuredDocumentTag> {
    let mut found = Vec::new();
    let Some(body) = body else {
        return found;
    };
    let mut stack: Vec<Scope<'_>> = Vec::new();
    push_blocks(&body.children, &mut stack);

    while let Some(scope) = stack.pop() {
        let mut nested = Vec::new();
        match scope {
            Scope::Paragraph(para) => {
                for child in &para.children {
                    if let ParagraphChild::Sdt(sdt) = child {
                        nested.push(Scope::Sdt(sdt));
                    }
                }
            },
            Scope::Table(table) => {
                for RowContent::Row(row) in &table.rows {
                    for TRCellContent::Cell(cell) in &row.cells {
                        for block in &cell.content {
                            nested.push(match block {
                                TCBlockContent::Paragraph(para) => Scope::Paragraph(para),
                                TCBlockContent::Table(table) => Scope::Table(table),
                            });
                        }
                    }
                }
            },
            Scope::Sdt(sdt) => {
                found.push(sdt);
                for child in sdt.content.iter().flat_map(|content| &content.children) {
                    match child {
                        SdtContentChild::Paragraph(para) => nested.push(Scope::Paragraph(para)),
                        SdtContentChild::Table(table) => nested.push(Scope::Table(table)),
                        SdtContentChild::Run(_) => {},
                    }
                }
            },
        }
        stack.extend(nested.into_iter().rev());
    }
    found
}

/// First content control, in document order, accepted by `predicate`.
pub fn find_content_control_mut<P>(
    body: Option<&mut Body>,
    mut predicate: P,
) -> Option<&mut StructuredDocumentTag>
where
    P: FnMut(&StructuredDocumentTag) -> bool,
{
    let body = body?;
    let mut stack: Vec<ScopeMut<'_>> = Vec::new();
    push_blocks_mut(&mut body.children, &mut stack);

    while let Some(scope) = stack.pop() {
        let mut nested = Vec::new();
        match scope {
            ScopeMut::Paragraph(para) => {
                for child in &mut para.children {
                    if let ParagraphChild::Sdt(sdt) = child {
                        nested.push(ScopeMut::Sdt(sdt));
                    }
                }
            },
            ScopeMut::Table(table) => {
                for RowContent::Row(row) in &mut table.rows {
                    for TRCellContent::Cell(cell) in &mut row.cells {
                        for block in &mut cell.content {
                            nested.push(match block {
                                TCBlockContent::Paragraph(para) => ScopeMut::Paragraph(para),
                                TCBlockContent::Table(table) => ScopeMut::Table(table),
                            });
                        }
                    }
                }
            },
            ScopeMut::Sdt(sdt) => {
                if predicate(&*sdt) {
                    return Some(sdt);
                }
                for child in sdt.content.iter_mut().flat_map(|content| &mut content.children) {
                    match child {
                        SdtContentChild::Paragraph(para) => {
                            nested.push(ScopeMut::Paragraph(para))
                        },
                        SdtContentChild::Table(table) => nested.push(ScopeMut::Table(table)),
                        SdtContentChild::Run(_) => {},
                    }
                }
            },
        }
        stack.extend(nested.into_iter().rev());
    }
    None
}
