/// Literal search and replace over text leaves.
///
/// Every `w:t` is searched on its own. A match that straddles two runs,
/// or two text nodes of one run, is not found.
use crate::ooxml::docx::document::Body;
use crate::ooxml::docx::run::{Run, RunChild};
use crate::ooxml::docx::walk;
use memchr::memmem;

/// Replace every occurrence of `search` in the body's text leaves.
///
/// Returns the number of occurrences replaced, counted per leaf without
/// overlap. An empty `search` leaves the tree untouched and returns 0.
pub fn replace_all(body: Option<&mut Body>, search: &str, replace: &str) -> usize {
    if search.is_empty() {
        return 0;
    }
    let finder = memmem::Finder::new(search.as_bytes());
    let mut total = 0;
    walk::run_sequences_mut(body, |runs| {
        for run in runs.iter_mut() {
            total += replace_in_run(run, &finder, search, replace);
        }
    });
    total
}

fn replace_in_run(run: &mut Run, finder: &memmem::Finder<'_>, search: &str, replace: &str) -> usize {
    let mut count = 0;
    for child in &mut run.children {
        let RunChild::Text(text) = child else {
            continue;
        };
        let hits = finder.find_iter(text.text.as_bytes()).count();
        if hits > 0 {
            let replaced = text.text.replace(search, replace);
            text.set_text(replaced);
            count += hits;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::document::DocumentChild;
    use crate::ooxml::docx::paragraph::Paragraph;
    use crate::ooxml::docx::table::Table;

    fn body_with(paragraphs: &[&str]) -> Body {
        Body {
            children: paragraphs
                .iter()
                .map(|text| DocumentChild::Paragraph(Paragraph::with_text(*text)))
                .collect(),
        }
    }

    fn texts(body: &Body) -> Vec<String> {
        let mut seen = Vec::new();
        walk::run_sequences(Some(body), |runs| {
            seen.extend(runs.iter().map(|run| run.text()));
        });
        seen
    }

    #[test]
    fn test_counts_non_overlapping_matches() {
        let mut body = body_with(&["aaaa", "banana", "none"]);
        assert_eq!(replace_all(Some(&mut body), "aa", "b"), 2);
        assert_eq!(texts(&body), vec!["bb", "banana", "none"]);
        assert_eq!(replace_all(Some(&mut body), "an", "AN"), 2);
        assert_eq!(texts(&body), vec!["bb", "bANANa", "none"]);
    }

    #[test]
    fn test_empty_search_is_a_no_op() {
        let mut body = body_with(&["text"]);
        let before = body.clone();
        assert_eq!(replace_all(Some(&mut body), "", "x"), 0);
        assert_eq!(body, before);
        assert_eq!(replace_all(None, "text", "x"), 0);
    }

    #[test]
    fn test_split_match_is_not_found() {
        let mut para = Paragraph::with_text("Hel");
        para.add_text("lo");
        let mut body = Body {
            children: vec![DocumentChild::Paragraph(para)],
        };
        assert_eq!(replace_all(Some(&mut body), "Hello", "Bye"), 0);
        assert_eq!(texts(&body), vec!["Hello"]);
    }

    #[test]
    fn test_replacement_keeps_edge_whitespace() {
        let mut body = body_with(&["name"]);
        assert_eq!(replace_all(Some(&mut body), "name", " padded "), 1);
        let DocumentChild::Paragraph(para) = &body.children[0] else {
            panic!("expected a paragraph");
        };
        let run = para.runs().next().unwrap();
        assert!(matches!(&run.children[0], RunChild::Text(text) if text.preserve_space));
    }

    #[test]
    fn test_nested_tables() {
        let mut table = Table::new();
        let cell = table.add_row().add_cell();
        cell.add_paragraph("x x");
        cell.add_table().add_row().add_cell().add_paragraph("x");
        let mut body = Body {
            children: vec![DocumentChild::Table(table)],
        };
        assert_eq!(replace_all(Some(&mut body), "x", "y"), 3);
        assert_eq!(texts(&body), vec!["y y", "y"]);
    }
}
