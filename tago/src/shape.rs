//! How a field's declared type looks to the index builder.
//!
//! Every field type reports a [`TypeShape`]. The walker peels at most one
//! pointer, one collection and one pointer inside that collection, which
//! covers `T`, `Box<T>`, `Vec<T>` and `Vec<Box<T>>`.
//!
//! `Cell<T>` and `RefCell<T>` are interior mutability, not indirection: they
//! report exactly the shape of `T` and use up no unwrapping level.

use std::any::type_name;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::record::RecordDescriptor;

#[derive(Clone, Copy)]
pub enum TypeShape {
    /// Leaf type; carries its type name for diagnostics.
    Scalar(&'static str),
    /// One level of indirection (`Box`, `Rc`, `Arc`, references, `Option`).
    Pointer(fn() -> TypeShape),
    /// Ordered or unordered element container.
    Collection(fn() -> TypeShape),
    /// A record with a field table, usually from `#[derive(Tagged)]`.
    Record(fn() -> RecordDescriptor),
}

impl TypeShape {
    pub fn is_record(&self) -> bool {
        matches!(self, TypeShape::Record(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TypeShape::Scalar(_) => "scalar",
            TypeShape::Pointer(_) => "pointer",
            TypeShape::Collection(_) => "collection",
            TypeShape::Record(_) => "record",
        }
    }
}

impl std::fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeShape::Scalar(name) => f.debug_tuple("Scalar").field(name).finish(),
            TypeShape::Record(record) => f.debug_tuple("Record").field(&record().name).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Types that can appear as tagged record fields.
pub trait Shape {
    fn shape() -> TypeShape;
}

/// Peel pointer, then collection, then a pointer inside the collection.
pub fn element_shape(shape: TypeShape) -> TypeShape {
    let mut shape = shape;
    if let TypeShape::Pointer(inner) = shape {
        shape = inner();
    }
    if let TypeShape::Collection(inner) = shape {
        shape = inner();
        if let TypeShape::Pointer(inner) = shape {
            shape = inner();
        }
    }
    shape
}

/// Walked shape of `T`.
pub fn element_shape_of<T: Shape + ?Sized>() -> TypeShape {
    element_shape(T::shape())
}

/// Shape used for `#[tagged(opaque)]` fields.
pub fn opaque<T: ?Sized>() -> TypeShape {
    TypeShape::Scalar(type_name::<T>())
}

macro_rules! scalar_shapes {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Shape for $ty {
                fn shape() -> TypeShape {
                    TypeShape::Scalar(type_name::<$ty>())
                }
            }
        )*
    };
}

scalar_shapes!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, (), str, String, PathBuf,
    Duration,
);

macro_rules! pointer_shapes {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Shape + ?Sized> Shape for $ptr<T> {
                fn shape() -> TypeShape {
                    TypeShape::Pointer(T::shape)
                }
            }
        )*
    };
}

pointer_shapes!(Box, Rc, Arc);

impl<T: Shape + ?Sized> Shape for &T {
    fn shape() -> TypeShape {
        TypeShape::Pointer(T::shape)
    }
}

impl<T: Shape + ?Sized> Shape for &mut T {
    fn shape() -> TypeShape {
        TypeShape::Pointer(T::shape)
    }
}

/// `Option<Box<T>>` is a single nullable pointer, so an inner pointer level
/// is folded into the option's.
impl<T: Shape> Shape for Option<T> {
    fn shape() -> TypeShape {
        match T::shape() {
            TypeShape::Pointer(inner) => TypeShape::Pointer(inner),
            _ => TypeShape::Pointer(T::shape),
        }
    }
}

impl<T: Shape> Shape for Cell<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Shape> Shape for RefCell<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

macro_rules! collection_shapes {
    ($($coll:ident),* $(,)?) => {
        $(
            impl<T: Shape> Shape for $coll<T> {
                fn shape() -> TypeShape {
                    TypeShape::Collection(T::shape)
                }
            }
        )*
    };
}

collection_shapes!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Shape, S> Shape for HashSet<T, S> {
    fn shape() -> TypeShape {
        TypeShape::Collection(T::shape)
    }
}

impl<T: Shape> Shape for [T] {
    fn shape() -> TypeShape {
        TypeShape::Collection(T::shape)
    }
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::Collection(T::shape)
    }
}

impl<K, V, S> Shape for HashMap<K, V, S> {
    fn shape() -> TypeShape {
        TypeShape::Scalar(type_name::<Self>())
    }
}

impl<K, V> Shape for BTreeMap<K, V> {
    fn shape() -> TypeShape {
        TypeShape::Scalar(type_name::<Self>())
    }
}

impl<T: ?Sized> Shape for PhantomData<T> {
    fn shape() -> TypeShape {
        TypeShape::Scalar(type_name::<Self>())
    }
}
