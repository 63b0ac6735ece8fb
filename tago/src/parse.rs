//! Tag text parsing.
//!
//! Grammar: `directive (';' directive)*` with `directive := key ['=' value]`.
//! Whitespace around keys and values is dropped, `=` inside a value is kept,
//! and empty directives (stray separators) are skipped.

use crate::index::InstructionIndex;
use crate::instruction::{FieldName, Instruction};

pub const DIRECTIVE_SEPARATOR: char = ';';

/// Trim both halves of a directive and rejoin them. Empty results yield `None`.
pub(crate) fn normalize_directive(directive: &str) -> Option<String> {
    let normalized = match directive.split_once('=') {
        Some((key, value)) => format!("{}={}", key.trim(), value.trim()),
        None => directive.trim().to_string(),
    };

    if normalized.is_empty() { None } else { Some(normalized) }
}

/// Iterate the instructions in `raw`, in directive order.
pub fn parse_directives(raw: &str) -> impl Iterator<Item = Instruction> + '_ {
    raw.split(DIRECTIVE_SEPARATOR).filter_map(Instruction::parse)
}

/// Index a single field's tag text: every instruction maps to `[field_name]`.
pub fn parse_field_tag(field_name: &str, raw: &str) -> InstructionIndex {
    let mut index = InstructionIndex::default();
    if raw.is_empty() {
        return index;
    }

    for instruction in parse_directives(raw) {
        index.push(instruction, FieldName::from(field_name));
    }
    index
}
