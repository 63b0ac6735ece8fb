use std::any::TypeId;

use crate::shape::{Shape, TypeShape};

/// Field table of a record type, as emitted by `#[derive(Tagged)]`.
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
    pub name: &'static str,
    pub type_id: TypeId,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn of<T: 'static>(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One declared field: its name, declared type and raw tag text per namespace.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Declared type as written in the source.
    pub type_name: &'static str,
    pub shape: fn() -> TypeShape,
    /// `(namespace, raw)` pairs, e.g. `("gorm2", "preload=true")`.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// Raw tag text for `namespace`, `""` when the field carries none.
    pub fn tag(&self, namespace: &str) -> &'static str {
        self.lookup(namespace).unwrap_or("")
    }

    /// Like [`FieldDescriptor::tag`], but distinguishes a missing tag from an empty one.
    pub fn lookup(&self, namespace: &str) -> Option<&'static str> {
        self.tags.iter().find(|(ns, _)| *ns == namespace).map(|(_, raw)| *raw)
    }

    pub fn shape(&self) -> TypeShape {
        (self.shape)()
    }
}

/// Records exposing a field table. Implemented by `#[derive(Tagged)]`.
///
/// Implementing it by hand is supported; pair it with a [`Shape`] impl
/// returning [`TypeShape::Record`] so the type can be nested in other records.
pub trait Tagged: Shape + 'static {
    fn record() -> RecordDescriptor;
}
