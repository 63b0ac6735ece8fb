//! Running caller-supplied actions against the fields of an index.

use std::collections::HashMap;

use crate::index::InstructionIndex;
use crate::instruction::{FieldName, Instruction};

/// Boxed action, for mappings that mix different closures.
pub type Action<'a> = Box<dyn FnMut(&FieldName) + 'a>;

/// Instruction → action table accepted by [`apply`].
pub type ActionMap<'a> = HashMap<Instruction, Action<'a>>;

/// For every mapped instruction present in `index`, call its action once per
/// listed field, in list order. Unmapped and absent instructions are ignored.
pub fn apply<F>(index: &InstructionIndex, mapping: &mut HashMap<Instruction, F>)
where
    F: FnMut(&FieldName),
{
    for (instruction, action) in mapping.iter_mut() {
        if let Some(fields) = index.get(instruction) {
            fields.iter().for_each(&mut *action);
        }
    }
}

/// Call `action` once per field listed under `instruction`, if any.
pub fn apply_one<F>(instruction: &Instruction, index: &InstructionIndex, mut action: F)
where
    F: FnMut(&FieldName),
{
    if let Some(fields) = index.get(instruction) {
        fields.iter().for_each(&mut action);
    }
}
