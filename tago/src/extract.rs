//! Building instruction indexes from record field tables.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::dispatch;
use crate::errors::{TagoError, TagoResult};
use crate::index::InstructionIndex;
use crate::instruction::{FieldName, Instruction};
use crate::parse::parse_field_tag;
use crate::record::{FieldDescriptor, RecordDescriptor};
use crate::registry::get_record_by_name;
use crate::shape::{Shape, TypeShape, element_shape, element_shape_of};

pub const DEFAULT_SEPARATOR: &str = ".";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Reader for one tag namespace, e.g. `gorm2` in `#[tag(gorm2 = "preload=true")]`.
///
/// ```
/// use tago::{Instruction, Tagged, Tago};
///
/// #[derive(Tagged)]
/// struct MyModel {
///     #[tag(gorm2 = "preload=true;otherOption=value")]
///     field1: String,
/// }
///
/// let tags = Tago::new("gorm2").get::<MyModel>();
/// assert_eq!(tags.fields(&Instruction::from("preload=true"))[0], "field1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tago {
    /// Tag namespace read from every visited field.
    pub name: String,
    /// Joins parent and child field names in nested extraction.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Tago {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            separator: default_separator(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Instructions declared on one field.
    pub fn get_from_field(&self, field: &FieldDescriptor) -> InstructionIndex {
        parse_field_tag(field.name, field.tag(&self.name))
    }

    /// Top-level fields of `T` only. `T` may be wrapped, e.g. `Vec<Box<T>>`.
    pub fn get<T: Shape + ?Sized>(&self) -> InstructionIndex {
        self.or_empty(self.try_get::<T>())
    }

    pub fn try_get<T: Shape + ?Sized>(&self) -> TagoResult<InstructionIndex> {
        let record = root_record(element_shape_of::<T>(), type_name::<T>())?;
        Ok(self.flat(&record))
    }

    /// Same as [`Tago::get`], inferring the type from a value.
    pub fn get_of<T: Shape + ?Sized>(&self, _model: &T) -> InstructionIndex {
        self.get::<T>()
    }

    /// All fields of `T` including nested records, joined with the configured separator.
    pub fn get_nested<T: Shape + ?Sized>(&self) -> InstructionIndex {
        self.get_nested_with::<T>(&self.separator)
    }

    pub fn get_nested_with<T: Shape + ?Sized>(&self, separator: &str) -> InstructionIndex {
        self.or_empty(self.try_get_nested_with::<T>(separator))
    }

    pub fn try_get_nested<T: Shape + ?Sized>(&self) -> TagoResult<InstructionIndex> {
        self.try_get_nested_with::<T>(&self.separator)
    }

    pub fn try_get_nested_with<T: Shape + ?Sized>(&self, separator: &str) -> TagoResult<InstructionIndex> {
        let record = root_record(element_shape_of::<T>(), type_name::<T>())?;
        let mut path = Vec::new();
        Ok(self.nested(&record, "", separator, &mut path))
    }

    /// Same as [`Tago::get_nested`], inferring the type from a value.
    pub fn get_nested_of<T: Shape + ?Sized>(&self, _model: &T) -> InstructionIndex {
        self.get_nested::<T>()
    }

    /// Flat extraction of a registered record looked up by name.
    pub fn get_by_name(&self, type_name: &str) -> TagoResult<InstructionIndex> {
        let record = registered_record(type_name)?;
        Ok(self.flat(&record))
    }

    /// Nested extraction of a registered record looked up by name.
    pub fn get_nested_by_name(&self, type_name: &str) -> TagoResult<InstructionIndex> {
        let record = registered_record(type_name)?;
        let mut path = Vec::new();
        Ok(self.nested(&record, "", &self.separator, &mut path))
    }

    /// Whether `instruction` appears on a top-level field of `T`.
    ///
    /// Extracts afresh on each call; query a kept [`InstructionIndex`] for repeated checks.
    pub fn has<T: Shape + ?Sized>(&self, instruction: &Instruction) -> bool {
        self.get::<T>().contains(instruction)
    }

    /// See [`dispatch::apply`].
    pub fn apply<F>(&self, index: &InstructionIndex, mapping: &mut HashMap<Instruction, F>)
    where
        F: FnMut(&FieldName),
    {
        dispatch::apply(index, mapping);
    }

    /// See [`dispatch::apply_one`].
    pub fn apply_one<F>(&self, instruction: &Instruction, index: &InstructionIndex, action: F)
    where
        F: FnMut(&FieldName),
    {
        dispatch::apply_one(instruction, index, action);
    }

    fn flat(&self, record: &RecordDescriptor) -> InstructionIndex {
        trace!("extracting `{}` tags from {}", self.name, record.name);
        let mut index = InstructionIndex::default();
        for field in &record.fields {
            index.concat(self.get_from_field(field), "");
        }
        index
    }

    /// `path` holds the records being traversed, root first. A nested record
    /// already on it is not entered again.
    fn nested(
        &self,
        record: &RecordDescriptor,
        prefix: &str,
        separator: &str,
        path: &mut Vec<TypeId>,
    ) -> InstructionIndex {
        trace!("extracting `{}` tags from {} at `{}`", self.name, record.name, prefix);
        path.push(record.type_id);

        let mut index = InstructionIndex::default();
        for field in &record.fields {
            index.concat(self.get_from_field(field), prefix);

            let TypeShape::Record(nested_fn) = element_shape(field.shape()) else {
                continue;
            };
            let nested = nested_fn();
            if path.contains(&nested.type_id) {
                debug!(
                    "not descending into {}{} ({} is already being traversed)",
                    prefix, field.name, nested.name
                );
                continue;
            }

            let nested_prefix = format!("{}{}{}", prefix, field.name, separator);
            index.concat(self.nested(&nested, &nested_prefix, separator, path), "");
        }

        path.pop();
        index
    }

    fn or_empty(&self, result: TagoResult<InstructionIndex>) -> InstructionIndex {
        result.unwrap_or_else(|err| {
            warn!("no `{}` tags extracted: {}", self.name, err);
            InstructionIndex::default()
        })
    }
}

/// `type_name` names the type the caller asked for, before unwrapping.
fn root_record(shape: TypeShape, type_name: &'static str) -> TagoResult<RecordDescriptor> {
    match shape {
        TypeShape::Record(record_fn) => Ok(record_fn()),
        _ => Err(TagoError::NotARecord { type_name }),
    }
}

fn registered_record(type_name: &str) -> TagoResult<RecordDescriptor> {
    get_record_by_name(type_name)
        .map(|registration| (registration.record_fn)())
        .ok_or_else(|| TagoError::UnknownRecord {
            name: type_name.to_string(),
        })
}
