/// Reassembly and substitution of fields split across runs.
///
/// Producing applications break a field's markers over as many runs as they
/// like. The engine walks the leaves of one run sequence in order and tracks
/// where it is inside a field:
///
/// ```text
/// None --begin--> Begin --instrText--> Instr --separate--> Separate --end--> None
/// ```
///
/// Text leaves seen while in `Separate` form the field's result. Sequences
/// that do not follow this shape never produce a field. The state machine is
/// flat: a `begin` inside a field restarts it.
use crate::ooxml::docx::document::Body;
use crate::ooxml::docx::enums::FieldCharType;
use crate::ooxml::docx::field::Field;
use crate::ooxml::docx::run::{Run, RunChild};
use crate::ooxml::docx::walk;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Position of a leaf: (run index in the sequence, child index in the run).
type LeafPos = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    None,
    Begin,
    Instr,
    Separate,
}

/// A field whose `end` marker was reached after a `separate`.
struct CompletedField {
    instruction: String,
    results: SmallVec<[LeafPos; 4]>,
    dirty: bool,
}

struct FieldScanner {
    state: FieldState,
    instruction: String,
    results: SmallVec<[LeafPos; 4]>,
    dirty: bool,
}

impl FieldScanner {
    fn new() -> Self {
        Self {
            state: FieldState::None,
            instruction: String::new(),
            results: SmallVec::new(),
            dirty: false,
        }
    }

    fn reset(&mut self) {
        self.state = FieldState::None;
        self.instruction.clear();
        self.results.clear();
        self.dirty = false;
    }

    /// Feed one leaf. Returns the field closed by this leaf, if any.
    fn step(&mut self, child: &RunChild, pos: LeafPos) -> Option<CompletedField> {
        match child {
            RunChild::FieldChar(fc) => match fc.field_char_type {
                Some(FieldCharType::Begin) => {
                    self.reset();
                    self.state = FieldState::Begin;
                    self.dirty = fc.dirty.is_some_and(|dirty| dirty.is_on());
                },
                Some(FieldCharType::Separate) => {
                    self.state = FieldState::Separate;
                    self.results.clear();
                },
                Some(FieldCharType::End) => {
                    let completed = (self.state == FieldState::Separate).then(|| CompletedField {
                        instruction: self.instruction.trim().to_string(),
                        results: std::mem::take(&mut self.results),
                        dirty: self.dirty,
                    });
                    self.reset();
                    return completed;
                },
                None => log::trace!("ignoring field character without a type"),
            },
            RunChild::InstrText(code)
                if matches!(self.state, FieldState::Begin | FieldState::Instr) =>
            {
                self.instruction.push_str(&code.text);
                self.state = FieldState::Instr;
            },
            RunChild::Text(_) if self.state == FieldState::Separate => self.results.push(pos),
            _ => {},
        }
        None
    }
}

/// Rewrite the results of fields found in `runs`.
///
/// Returns the number of fields rewritten.
pub(crate) fn replace_in_sequence(runs: &mut [&mut Run], values: &HashMap<String, String>) -> usize {
    let mut scanner = FieldScanner::new();
    let mut count = 0;
    for run_idx in 0..runs.len() {
        for child_idx in 0..runs[run_idx].children.len() {
            let Some(field) = scanner.step(&runs[run_idx].children[child_idx], (run_idx, child_idx))
            else {
                continue;
            };
            let Some(value) = values.get(&field.instruction) else {
                log::trace!("no replacement for field {:?}", field.instruction);
                continue;
            };
            for (i, &(r, c)) in field.results.iter().enumerate() {
                if let RunChild::Text(text) = &mut runs[r].children[c] {
                    if i == 0 {
                        text.set_text(value.as_str());
                    } else {
                        text.text.clear();
                    }
                }
            }
            count += 1;
        }
    }
    count
}

/// Rewrite the results of every field of the body whose trimmed instruction
/// is a key of `values`.
///
/// Returns the number of fields rewritten. A field without result text
/// (no `separate` marker) is never rewritten.
pub fn replace_fields(body: Option<&mut Body>, values: &HashMap<String, String>) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut total = 0;
    walk::run_sequences_mut(body, |runs| total += replace_in_sequence(runs, values));
    total
}

/// List the complete fields of the body in document order.
pub fn fields(body: Option<&Body>) -> Vec<Field> {
    let mut found = Vec::new();
    walk::run_sequences(body, |runs| {
        let mut scanner = FieldScanner::new();
        for (run_idx, run) in runs.iter().enumerate() {
            for (child_idx, child) in run.children.iter().enumerate() {
                let Some(field) = scanner.step(child, (run_idx, child_idx)) else {
                    continue;
                };
                let result = (!field.results.is_empty()).then(|| {
                    let mut text = String::new();
                    for &(r, c) in &field.results {
                        if let RunChild::Text(t) = &runs[r].children[c] {
                            text.push_str(&t.text);
                        }
                    }
                    text
                });
                found.push(Field::new(field.instruction, result, field.dirty));
            }
        }
    });
    found
}
