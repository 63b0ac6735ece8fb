use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

use crate::dispatch;
use crate::instruction::{FieldName, Instruction};

/// Instruction → fields carrying it, e.g. `preload=true -> [author, comments.author]`.
///
/// Field lists keep encounter order and may repeat a field. The index is
/// read-only once returned; iteration order across instructions is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionIndex {
    entries: HashMap<Instruction, Vec<FieldName>>,
}

impl InstructionIndex {
    pub fn get(&self, instruction: &Instruction) -> Option<&[FieldName]> {
        self.entries.get(instruction).map(Vec::as_slice)
    }

    /// Fields listed under `instruction`, empty when absent.
    pub fn fields(&self, instruction: &Instruction) -> &[FieldName] {
        self.get(instruction).unwrap_or(&[])
    }

    pub fn contains(&self, instruction: &Instruction) -> bool {
        self.entries.contains_key(instruction)
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Instruction, &[FieldName])> {
        self.entries.iter().map(|(instruction, fields)| (instruction, fields.as_slice()))
    }

    /// Number of distinct instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_inner(self) -> HashMap<Instruction, Vec<FieldName>> {
        self.entries
    }

    /// See [`dispatch::apply`].
    pub fn apply<F>(&self, mapping: &mut HashMap<Instruction, F>)
    where
        F: FnMut(&FieldName),
    {
        dispatch::apply(self, mapping);
    }

    /// See [`dispatch::apply_one`].
    pub fn apply_one<F>(&self, instruction: &Instruction, action: F)
    where
        F: FnMut(&FieldName),
    {
        dispatch::apply_one(instruction, self, action);
    }

    pub(crate) fn push(&mut self, instruction: Instruction, field: FieldName) {
        self.entries.entry(instruction).or_default().push(field);
    }

    /// Append every list of `other` onto ours, prefixing each field name.
    pub(crate) fn concat(&mut self, other: InstructionIndex, prefix: &str) {
        for (instruction, fields) in other.entries {
            let target = self.entries.entry(instruction).or_default();
            if prefix.is_empty() {
                target.extend(fields);
            } else {
                target.extend(fields.iter().map(|field| field.add_prefix(prefix)));
            }
        }
    }
}

impl<'a> IntoIterator for &'a InstructionIndex {
    type Item = (&'a Instruction, &'a Vec<FieldName>);
    type IntoIter = hash_map::Iter<'a, Instruction, Vec<FieldName>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
